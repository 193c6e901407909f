//! # Saturated Unit Weight
//!
//! Empirical step table from SPT N-value to saturated unit weight γsat.
//! Table boundaries are fixed calibration points and are not interpolated.
//!
//! | N         | γsat (kN/m³) |
//! |-----------|--------------|
//! | < 5       | 15           |
//! | 5 - 7     | 16           |
//! | 8 - 10    | 17           |
//! | 11 - 26   | 18           |
//! | 27 - 34   | 19           |
//! | ≥ 35      | 20           |
//!
//! A missing or zero N-value yields 0.

/// Saturated unit weight (kN/m³) from SPT N.
///
/// ```rust
/// use geotech_core::calculations::unit_weight::gamma_sat;
///
/// assert_eq!(gamma_sat(Some(4.0)), 15.0);
/// assert_eq!(gamma_sat(Some(27.0)), 19.0);
/// assert_eq!(gamma_sat(None), 0.0);
/// ```
pub fn gamma_sat(n_value: Option<f64>) -> f64 {
    let n = match n_value {
        Some(n) if n != 0.0 => n,
        _ => return 0.0,
    };

    if n < 5.0 {
        15.0
    } else if n < 8.0 {
        16.0
    } else if n < 11.0 {
        17.0
    } else if n < 27.0 {
        18.0
    } else if n < 35.0 {
        19.0
    } else {
        20.0
    }
}
