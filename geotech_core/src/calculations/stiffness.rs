//! # Elastic Parameters
//!
//! Young's modulus and Poisson's ratio for the FEM material definitions.
//!
//! Clay: `E = α × Su`, α from the structure type and the Su bucket.
//!
//! | Structure                 | Su ≤ 2.5 | 2.5 < Su ≤ 5 | Su > 5 |
//! |---------------------------|----------|--------------|--------|
//! | Sheet Pile                | 150      | 300          | 500    |
//! | Earth Retaining Structure | 250      | 350          | 500    |
//! | Diaphragm Wall            | 500      | 750          | 1000   |
//!
//! Sand: `E' = β × Ncor` with β = 1000 (earth retaining structure) or 2000
//! (diaphragm wall) kN/m². Sheet piles in sand are not covered by the
//! correlation and report E' = 0.

use crate::settings::StructureType;
use crate::soil::SoilType;

/// Poisson's ratio for undrained clay (near incompressible)
pub const POISSON_CLAY: f64 = 0.495;

/// Poisson's ratio for sand
pub const POISSON_SAND: f64 = 0.333;

/// E/Su multiplier for clay.
pub fn clay_alpha(structure_type: StructureType, su: f64) -> f64 {
    let (low, mid, high) = match structure_type {
        StructureType::SheetPile => (150.0, 300.0, 500.0),
        StructureType::EarthRetainingStructure => (250.0, 350.0, 500.0),
        StructureType::DiaphragmWall => (500.0, 750.0, 1000.0),
    };

    if su <= 2.5 {
        low
    } else if su <= 5.0 {
        mid
    } else {
        high
    }
}

/// E'/Ncor multiplier for sand (kN/m²).
pub fn sand_beta(structure_type: StructureType) -> f64 {
    match structure_type {
        StructureType::SheetPile => 0.0,
        StructureType::EarthRetainingStructure => 1000.0,
        StructureType::DiaphragmWall => 2000.0,
    }
}

/// Young's modulus E (clay) or E' (sand), kN/m².
///
/// ```rust
/// use geotech_core::calculations::stiffness::elastic_modulus;
/// use geotech_core::settings::StructureType;
/// use geotech_core::soil::SoilType;
///
/// let clay = SoilType::classify("CL");
/// assert_eq!(elastic_modulus(&clay, Some(50.0), None, StructureType::EarthRetainingStructure), 25_000.0);
///
/// let sand = SoilType::classify("SM");
/// assert_eq!(elastic_modulus(&sand, None, Some(20.0), StructureType::DiaphragmWall), 40_000.0);
/// ```
pub fn elastic_modulus(soil_type: &SoilType, su: Option<f64>, ncor: Option<f64>, structure_type: StructureType) -> f64 {
    match soil_type {
        SoilType::Clay(_) => match su {
            Some(su) if su != 0.0 => clay_alpha(structure_type, su) * su,
            _ => 0.0,
        },
        SoilType::Sand(_) => match ncor {
            Some(n) if n != 0.0 => sand_beta(structure_type) * n,
            _ => 0.0,
        },
        SoilType::Unknown => 0.0,
    }
}

/// Poisson's ratio ν by soil family; 0 for unknown soil.
pub fn poisson_ratio(soil_type: &SoilType) -> f64 {
    match soil_type {
        SoilType::Clay(_) => POISSON_CLAY,
        SoilType::Sand(_) => POISSON_SAND,
        SoilType::Unknown => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clay_alpha_table() {
        use StructureType::*;
        let rows = [
            (SheetPile, [150.0, 300.0, 500.0]),
            (EarthRetainingStructure, [250.0, 350.0, 500.0]),
            (DiaphragmWall, [500.0, 750.0, 1000.0]),
        ];
        for (structure, [low, mid, high]) in rows {
            assert_eq!(clay_alpha(structure, 1.0), low);
            assert_eq!(clay_alpha(structure, 2.5), low);
            assert_eq!(clay_alpha(structure, 2.6), mid);
            assert_eq!(clay_alpha(structure, 5.0), mid);
            assert_eq!(clay_alpha(structure, 5.1), high);
        }
    }

    #[test]
    fn test_clay_modulus() {
        let clay = SoilType::classify("CH");
        assert_eq!(elastic_modulus(&clay, Some(4.0), Some(1.0), StructureType::SheetPile), 1200.0);
        assert_eq!(elastic_modulus(&clay, Some(66.0), None, StructureType::DiaphragmWall), 66_000.0);
        assert_eq!(elastic_modulus(&clay, None, Some(10.0), StructureType::DiaphragmWall), 0.0);
        assert_eq!(elastic_modulus(&clay, Some(0.0), Some(10.0), StructureType::DiaphragmWall), 0.0);
    }

    #[test]
    fn test_sand_modulus() {
        let sand = SoilType::classify("SC");
        assert_eq!(elastic_modulus(&sand, None, Some(20.0), StructureType::SheetPile), 0.0);
        assert_eq!(elastic_modulus(&sand, None, Some(20.0), StructureType::EarthRetainingStructure), 20_000.0);
        assert_eq!(elastic_modulus(&sand, None, None, StructureType::DiaphragmWall), 0.0);
    }

    #[test]
    fn test_unknown_soil() {
        assert_eq!(elastic_modulus(&SoilType::Unknown, Some(50.0), Some(20.0), StructureType::DiaphragmWall), 0.0);
        assert_eq!(poisson_ratio(&SoilType::Unknown), 0.0);
    }

    #[test]
    fn test_poisson() {
        assert_eq!(poisson_ratio(&SoilType::classify("CL")), 0.495);
        assert_eq!(poisson_ratio(&SoilType::classify("SM")), 0.333);
    }
}
