//! # Shear Strength
//!
//! Undrained shear strength for clay and effective friction angle for sand,
//! both from the corrected blow count.
//!
//! - Clay: `Su = Ncor × α × 9.81` with α = 0.6739 (CH) or 0.5077 (CL)
//! - Sand: `φ' = 27.1 + 0.3 Ncor − 0.00054 Ncor²` (degrees)
//!
//! The two are mutually exclusive: a layer gets either Su or φ', never both.

use crate::soil::{ClayCode, SoilType};

/// Pressure factor converting α × N into kN/m²
pub const SU_PRESSURE_FACTOR: f64 = 9.81;

/// Su/N ratio for high-plasticity clay (CH)
pub const ALPHA_HIGH_PLASTICITY: f64 = 0.6739;

/// Su/N ratio for low-plasticity clay (CL)
pub const ALPHA_LOW_PLASTICITY: f64 = 0.5077;

/// Undrained shear strength Su (kN/m²), clay only.
///
/// ```rust
/// use geotech_core::calculations::strength::undrained_shear_strength;
/// use geotech_core::soil::SoilType;
///
/// let su = undrained_shear_strength(Some(10.0), &SoilType::classify("CH")).unwrap();
/// assert!((su - 66.11).abs() < 0.01);
/// ```
pub fn undrained_shear_strength(ncor: Option<f64>, soil_type: &SoilType) -> Option<f64> {
    let ncor = ncor?;
    match soil_type {
        SoilType::Clay(code) => {
            let alpha = match code {
                ClayCode::Ch => ALPHA_HIGH_PLASTICITY,
                ClayCode::Cl => ALPHA_LOW_PLASTICITY,
            };
            Some(ncor * alpha * SU_PRESSURE_FACTOR)
        }
        SoilType::Sand(_) | SoilType::Unknown => None,
    }
}

/// Effective friction angle φ' (degrees), sand only.
pub fn friction_angle(ncor: Option<f64>, soil_type: &SoilType) -> Option<f64> {
    let ncor = ncor?;
    match soil_type {
        SoilType::Sand(_) => Some(27.1 + 0.3 * ncor - 0.00054 * ncor * ncor),
        SoilType::Clay(_) | SoilType::Unknown => None,
    }
}
