//! # Calculation Settings
//!
//! Enumerated choices fixed for a whole borehole run: the retaining structure
//! being designed, its construction method, the structural surface in contact
//! with the soil, and the SPT overburden correction method.
//!
//! Every setting serializes to its human label (e.g. `"Sheet Pile"`) and
//! deserializes leniently from any string. Unrecognized values resolve to an
//! explicit default variant rather than failing, so a settings document
//! written by an older tool still loads.
//!
//! ## Example
//!
//! ```rust
//! use geotech_core::settings::{CalculationSettings, CorrectionMethod, StructureType};
//!
//! let json = r#"{
//!     "structure_type": "Sheet Pile",
//!     "method": "Driven",
//!     "surface_type": "Rough Steel",
//!     "correction_method": "Liao and Whitman (1986)"
//! }"#;
//! let settings: CalculationSettings = serde_json::from_str(json).unwrap();
//! assert_eq!(settings.structure_type, StructureType::SheetPile);
//!
//! // Unknown correction methods fall back to Terzaghi (1984)
//! assert_eq!(CorrectionMethod::parse_lenient("Skempton"), CorrectionMethod::Terzaghi1984);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalize a label for lenient matching: uppercase, separators stripped.
fn normalize(s: &str) -> String {
    s.trim()
        .to_uppercase()
        .replace([' ', '_', '-', '(', ')', '.'], "")
}

/// Structure type, which sets the strain level assumed for stiffness and K0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StructureType {
    /// Steel sheet pile wall (high strain)
    SheetPile,
    /// Generic earth retaining structure (medium strain)
    EarthRetainingStructure,
    /// Diaphragm wall (low strain)
    DiaphragmWall,
}

impl StructureType {
    /// All structure types for UI selection
    pub const ALL: [StructureType; 3] = [
        StructureType::SheetPile,
        StructureType::EarthRetainingStructure,
        StructureType::DiaphragmWall,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            StructureType::SheetPile => "Sheet Pile",
            StructureType::EarthRetainingStructure => "Earth Retaining Structure",
            StructureType::DiaphragmWall => "Diaphragm Wall",
        }
    }

    /// Parse from a label or variant name. Anything unrecognized is treated
    /// as a diaphragm wall.
    pub fn parse_lenient(s: &str) -> Self {
        match normalize(s).as_str() {
            "SHEETPILE" => StructureType::SheetPile,
            "EARTHRETAININGSTRUCTURE" | "ERS" => StructureType::EarthRetainingStructure,
            "DIAPHRAGMWALL" | "DWALL" => StructureType::DiaphragmWall,
            _ => {
                tracing::warn!(value = s, "Unrecognized structure type, using Diaphragm Wall");
                StructureType::DiaphragmWall
            }
        }
    }
}

/// Construction method of the wall or pile; drives clay interface friction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConstructionMethod {
    /// Driven or pushed
    Driven,
    /// Bored / cast in place
    Bored,
}

impl ConstructionMethod {
    /// All construction methods for UI selection
    pub const ALL: [ConstructionMethod; 2] = [ConstructionMethod::Driven, ConstructionMethod::Bored];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            ConstructionMethod::Driven => "Driven",
            ConstructionMethod::Bored => "Bored",
        }
    }

    /// Parse from a label. Anything that is not "Driven" is treated as bored.
    pub fn parse_lenient(s: &str) -> Self {
        match normalize(s).as_str() {
            "DRIVEN" => ConstructionMethod::Driven,
            "BORED" => ConstructionMethod::Bored,
            _ => {
                tracing::warn!(value = s, "Unrecognized construction method, using Bored");
                ConstructionMethod::Bored
            }
        }
    }
}

/// Structural surface in contact with sand; drives sand interface friction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SurfaceType {
    RoughConcrete,
    SmoothConcrete,
    RoughSteel,
    SmoothSteel,
    Timber,
    /// Surface not recognized; yields no interface friction for sand
    Unspecified,
}

impl SurfaceType {
    /// Selectable surface types (excludes `Unspecified`)
    pub const ALL: [SurfaceType; 5] = [
        SurfaceType::RoughConcrete,
        SurfaceType::SmoothConcrete,
        SurfaceType::RoughSteel,
        SurfaceType::SmoothSteel,
        SurfaceType::Timber,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            SurfaceType::RoughConcrete => "Rough Concrete",
            SurfaceType::SmoothConcrete => "Smooth Concrete",
            SurfaceType::RoughSteel => "Rough Steel",
            SurfaceType::SmoothSteel => "Smooth Steel",
            SurfaceType::Timber => "Timber",
            SurfaceType::Unspecified => "Unspecified",
        }
    }

    /// Parse from a label. Anything unrecognized becomes `Unspecified`.
    pub fn parse_lenient(s: &str) -> Self {
        match normalize(s).as_str() {
            "ROUGHCONCRETE" => SurfaceType::RoughConcrete,
            "SMOOTHCONCRETE" => SurfaceType::SmoothConcrete,
            "ROUGHSTEEL" => SurfaceType::RoughSteel,
            "SMOOTHSTEEL" => SurfaceType::SmoothSteel,
            "TIMBER" => SurfaceType::Timber,
            "UNSPECIFIED" => SurfaceType::Unspecified,
            _ => {
                tracing::warn!(value = s, "Unrecognized surface type, interface friction will be 0");
                SurfaceType::Unspecified
            }
        }
    }
}

/// SPT overburden correction method (sand only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CorrectionMethod {
    /// Ncor = CN x N
    LiaoWhitman1986,
    /// Ncor = 15 + 0.5(N - 15) above N = 15
    Terzaghi1984,
}

impl CorrectionMethod {
    /// All correction methods for UI selection
    pub const ALL: [CorrectionMethod; 2] = [CorrectionMethod::LiaoWhitman1986, CorrectionMethod::Terzaghi1984];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            CorrectionMethod::LiaoWhitman1986 => "Liao and Whitman (1986)",
            CorrectionMethod::Terzaghi1984 => "Terzaghi (1984)",
        }
    }

    /// Parse from a label. Anything other than Liao and Whitman is treated
    /// as Terzaghi (1984).
    pub fn parse_lenient(s: &str) -> Self {
        match normalize(s).as_str() {
            "LIAOANDWHITMAN1986" | "LIAOWHITMAN1986" | "LIAOWHITMAN" => CorrectionMethod::LiaoWhitman1986,
            "TERZAGHI1984" | "TERZAGHI" => CorrectionMethod::Terzaghi1984,
            _ => {
                tracing::warn!(value = s, "Unrecognized correction method, using Terzaghi (1984)");
                CorrectionMethod::Terzaghi1984
            }
        }
    }
}

macro_rules! label_conversions {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<String> for $ty {
                fn from(s: String) -> Self {
                    <$ty>::parse_lenient(&s)
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.label().to_string()
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.label())
                }
            }
        )*
    };
}

label_conversions!(StructureType, ConstructionMethod, SurfaceType, CorrectionMethod);

/// Settings shared by every layer of a borehole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationSettings {
    /// Structure being designed
    pub structure_type: StructureType,

    /// Construction method (clay interface friction)
    pub method: ConstructionMethod,

    /// Contact surface (sand interface friction)
    pub surface_type: SurfaceType,

    /// SPT overburden correction method
    pub correction_method: CorrectionMethod,
}

impl Default for CalculationSettings {
    fn default() -> Self {
        CalculationSettings {
            structure_type: StructureType::EarthRetainingStructure,
            method: ConstructionMethod::Driven,
            surface_type: SurfaceType::SmoothConcrete,
            correction_method: CorrectionMethod::LiaoWhitman1986,
        }
    }
}
