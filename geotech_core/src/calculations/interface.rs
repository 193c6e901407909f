//! # Interface Friction
//!
//! Strength reduction factor Rint between soil and the structure surface.
//!
//! Clay depends on the construction method. Driven elements ramp linearly
//! from full adhesion at Su = 2.5 kN/m² down to 0.5 at Su = 7.5 kN/m²;
//! bored elements use a constant 0.45.
//!
//! Sand depends on the contact surface only:
//!
//! | Surface         | Rint |
//! |-----------------|------|
//! | Rough Concrete  | 1.0  |
//! | Smooth Concrete | 0.8  |
//! | Rough Steel     | 0.7  |
//! | Smooth Steel    | 0.5  |
//! | Timber          | 0.8  |

use crate::settings::{ConstructionMethod, SurfaceType};
use crate::soil::SoilType;

/// Rint for clay around bored elements
pub const RINT_CLAY_BORED: f64 = 0.45;

/// Interface friction ratio.
///
/// ```rust
/// use geotech_core::calculations::interface::rint;
/// use geotech_core::settings::{ConstructionMethod, SurfaceType};
/// use geotech_core::soil::SoilType;
///
/// let clay = SoilType::classify("CH");
/// let r = rint(&clay, Some(5.0), ConstructionMethod::Driven, SurfaceType::Timber);
/// assert!((r - 0.75).abs() < 1e-12);
/// ```
pub fn rint(soil_type: &SoilType, su: Option<f64>, method: ConstructionMethod, surface_type: SurfaceType) -> f64 {
    match soil_type {
        SoilType::Clay(_) => match method {
            ConstructionMethod::Driven => match su {
                Some(su) if su != 0.0 => driven_clay(su),
                _ => 0.0,
            },
            ConstructionMethod::Bored => RINT_CLAY_BORED,
        },
        SoilType::Sand(_) => sand_surface(surface_type),
        SoilType::Unknown => 0.0,
    }
}

fn driven_clay(su: f64) -> f64 {
    if su < 2.5 {
        1.0
    } else if su < 7.5 {
        1.0 - 0.5 * ((su - 2.5) / 5.0)
    } else {
        0.5
    }
}

/// Sand Rint by surface; 0 for an unspecified surface.
pub fn sand_surface(surface_type: SurfaceType) -> f64 {
    match surface_type {
        SurfaceType::RoughConcrete => 1.0,
        SurfaceType::SmoothConcrete => 0.8,
        SurfaceType::RoughSteel => 0.7,
        SurfaceType::SmoothSteel => 0.5,
        SurfaceType::Timber => 0.8,
        SurfaceType::Unspecified => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clay() -> SoilType {
        SoilType::classify("CL")
    }

    #[test]
    fn test_driven_clay_ramp() {
        let r = |su: f64| rint(&clay(), Some(su), ConstructionMethod::Driven, SurfaceType::RoughSteel);
        assert_eq!(r(1.0), 1.0);
        assert!((r(2.5) - 1.0).abs() < 1e-12);
        assert!((r(5.0) - 0.75).abs() < 1e-12);
        assert_eq!(r(7.5), 0.5);
        assert_eq!(r(50.0), 0.5);
    }

    #[test]
    fn test_driven_clay_without_su() {
        assert_eq!(rint(&clay(), None, ConstructionMethod::Driven, SurfaceType::Timber), 0.0);
        assert_eq!(rint(&clay(), Some(0.0), ConstructionMethod::Driven, SurfaceType::Timber), 0.0);
    }

    #[test]
    fn test_bored_clay_constant() {
        for su in [None, Some(1.0), Some(5.0), Some(80.0)] {
            assert_eq!(rint(&clay(), su, ConstructionMethod::Bored, SurfaceType::RoughConcrete), 0.45);
        }
    }

    #[test]
    fn test_sand_surfaces() {
        let sand = SoilType::classify("SM");
        let expected = [
            (SurfaceType::RoughConcrete, 1.0),
            (SurfaceType::SmoothConcrete, 0.8),
            (SurfaceType::RoughSteel, 0.7),
            (SurfaceType::SmoothSteel, 0.5),
            (SurfaceType::Timber, 0.8),
            (SurfaceType::Unspecified, 0.0),
        ];
        for (surface, value) in expected {
            assert_eq!(rint(&sand, None, ConstructionMethod::Driven, surface), value);
        }
    }

    #[test]
    fn test_unknown_soil() {
        assert_eq!(rint(&SoilType::Unknown, Some(5.0), ConstructionMethod::Driven, SurfaceType::RoughConcrete), 0.0);
    }
}
