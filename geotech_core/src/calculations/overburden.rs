//! # SPT Overburden Correction
//!
//! Normalizes the field N-value of sand layers to a reference overburden of
//! 100 kN/m². Clay layers are not corrected.
//!
//! - `CN = √(100 / σv')` (sand only, 0 when σv' ≤ 0)
//! - Liao and Whitman (1986): `Ncor = CN × N`
//! - Terzaghi (1984): `Ncor = N` for N ≤ 15, else `15 + 0.5(N − 15)`
//!
//! CN is not clamped to the 0.6 - 2.0 range quoted in the literature; shallow
//! sand layers can therefore report CN well above 2.

use crate::settings::CorrectionMethod;
use crate::soil::SoilType;

/// Reference overburden pressure (kN/m²) CN normalizes to
pub const REFERENCE_PRESSURE_KPA: f64 = 100.0;

/// N-value above which the Terzaghi (1984) correction halves the excess
pub const TERZAGHI_THRESHOLD: f64 = 15.0;

/// Overburden correction factor CN. `None` for anything but sand.
///
/// ```rust
/// use geotech_core::calculations::overburden::cn;
/// use geotech_core::soil::SoilType;
///
/// let sand = SoilType::classify("SM");
/// assert_eq!(cn(25.0, &sand), Some(2.0));
/// assert_eq!(cn(0.0, &sand), Some(0.0));
/// assert_eq!(cn(25.0, &SoilType::classify("CL")), None);
/// ```
pub fn cn(sigma_v: f64, soil_type: &SoilType) -> Option<f64> {
    match soil_type {
        SoilType::Sand(_) => Some(cn_factor(sigma_v)),
        SoilType::Clay(_) | SoilType::Unknown => None,
    }
}

/// `√(100 / σv')`, or 0 when σv' ≤ 0.
pub fn cn_factor(sigma_v: f64) -> f64 {
    if sigma_v <= 0.0 {
        0.0
    } else {
        (REFERENCE_PRESSURE_KPA / sigma_v).sqrt()
    }
}

/// Corrected blow count. Sand is corrected per `method`; any other soil
/// passes N through unchanged. A missing N yields `None`.
pub fn ncor(n_value: Option<f64>, cn: Option<f64>, soil_type: &SoilType, method: CorrectionMethod) -> Option<f64> {
    let n = n_value?;
    let corrected = match soil_type {
        SoilType::Sand(_) => match method {
            CorrectionMethod::LiaoWhitman1986 => cn.unwrap_or(0.0) * n,
            CorrectionMethod::Terzaghi1984 => terzaghi(n),
        },
        SoilType::Clay(_) | SoilType::Unknown => n,
    };
    Some(corrected)
}

fn terzaghi(n: f64) -> f64 {
    if n > TERZAGHI_THRESHOLD {
        TERZAGHI_THRESHOLD + 0.5 * (n - TERZAGHI_THRESHOLD)
    } else {
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sand() -> SoilType {
        SoilType::classify("SC")
    }

    #[test]
    fn test_cn_reference_values() {
        assert!((cn_factor(100.0) - 1.0).abs() < 1e-12);
        assert!((cn_factor(25.0) - 2.0).abs() < 1e-12);
        assert!((cn_factor(400.0) - 0.5).abs() < 1e-12);
        assert_eq!(cn_factor(0.0), 0.0);
        assert_eq!(cn_factor(-5.0), 0.0);
    }

    #[test]
    fn test_cn_formula() {
        for sigma in [1.0, 12.5, 50.0, 180.0, 1000.0] {
            assert!((cn_factor(sigma) - (100.0 / sigma).sqrt()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_cn_only_for_sand() {
        assert!(cn(50.0, &sand()).is_some());
        assert_eq!(cn(50.0, &SoilType::classify("CH")), None);
        assert_eq!(cn(50.0, &SoilType::Unknown), None);
    }

    #[test]
    fn test_correction_methods() {
        // n = 20, σv' = 50
        let cn = cn(50.0, &sand());
        assert!((cn.unwrap() - 1.414).abs() < 1e-3);

        let liao = ncor(Some(20.0), cn, &sand(), CorrectionMethod::LiaoWhitman1986).unwrap();
        assert!((liao - 28.28).abs() < 0.01);

        let terzaghi = ncor(Some(20.0), cn, &sand(), CorrectionMethod::Terzaghi1984).unwrap();
        assert_eq!(terzaghi, 17.5);
    }

    #[test]
    fn test_terzaghi_threshold() {
        assert_eq!(ncor(Some(15.0), Some(1.0), &sand(), CorrectionMethod::Terzaghi1984), Some(15.0));
        assert_eq!(ncor(Some(9.0), Some(1.0), &sand(), CorrectionMethod::Terzaghi1984), Some(9.0));
        assert_eq!(ncor(Some(25.0), Some(1.0), &sand(), CorrectionMethod::Terzaghi1984), Some(20.0));
    }

    #[test]
    fn test_clay_uncorrected() {
        let clay = SoilType::classify("CL");
        assert_eq!(ncor(Some(12.0), None, &clay, CorrectionMethod::LiaoWhitman1986), Some(12.0));
        assert_eq!(ncor(Some(30.0), None, &clay, CorrectionMethod::Terzaghi1984), Some(30.0));
    }

    #[test]
    fn test_missing_n() {
        assert_eq!(ncor(None, Some(1.2), &sand(), CorrectionMethod::LiaoWhitman1986), None);
    }
}
