//! # Earth Pressure at Rest
//!
//! - Clay: fixed K0 = 0.65 for sheet piles, 0.80 otherwise
//! - Sand: Jaky (1944), `K0 = 1 − sin φ'`

use crate::settings::StructureType;
use crate::soil::SoilType;

/// K0 for clay against sheet piles
pub const K0_CLAY_SHEET_PILE: f64 = 0.65;

/// K0 for clay against any other structure
pub const K0_CLAY_DEFAULT: f64 = 0.80;

/// Coefficient of lateral earth pressure at rest.
///
/// Returns 0 for sand without a friction angle and for unknown soil.
///
/// ```rust
/// use geotech_core::calculations::earth_pressure::k0;
/// use geotech_core::settings::StructureType;
/// use geotech_core::soil::SoilType;
///
/// let sand = SoilType::classify("SM");
/// assert!((k0(&sand, Some(30.0), StructureType::DiaphragmWall) - 0.5).abs() < 1e-12);
/// ```
pub fn k0(soil_type: &SoilType, phi_deg: Option<f64>, structure_type: StructureType) -> f64 {
    match soil_type {
        SoilType::Clay(_) => match structure_type {
            StructureType::SheetPile => K0_CLAY_SHEET_PILE,
            StructureType::EarthRetainingStructure | StructureType::DiaphragmWall => K0_CLAY_DEFAULT,
        },
        SoilType::Sand(_) => phi_deg.map(jaky).unwrap_or(0.0),
        SoilType::Unknown => 0.0,
    }
}

/// Jaky's K0 for a friction angle in degrees.
pub fn jaky(phi_deg: f64) -> f64 {
    1.0 - phi_deg.to_radians().sin()
}
