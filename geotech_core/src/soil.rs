//! # Soil Classification
//!
//! Maps USCS classification codes from the boring log onto the soil families
//! the empirical correlations distinguish, and classifies consistency for
//! reporting.
//!
//! Only five codes take part in the calculations:
//!
//! | Code  | Family | Description                        |
//! |-------|--------|------------------------------------|
//! | CL    | Clay   | Lean clay, low plasticity          |
//! | CH    | Clay   | Fat clay, high plasticity          |
//! | SM    | Sand   | Silty sand                         |
//! | SC    | Sand   | Clayey sand                        |
//! | SP-SM | Sand   | Poorly graded sand with silt       |
//!
//! Every other code classifies as [`SoilType::Unknown`].
//!
//! ## Example
//!
//! ```rust
//! use geotech_core::soil::{ClayCode, SoilType};
//!
//! assert_eq!(SoilType::classify("CH"), SoilType::Clay(ClayCode::Ch));
//! assert!(SoilType::classify("SP-SM").is_sand());
//! assert_eq!(SoilType::classify("GW"), SoilType::Unknown);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Clay classification codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClayCode {
    /// Lean clay
    #[serde(rename = "CL")]
    Cl,
    /// Fat clay
    #[serde(rename = "CH")]
    Ch,
}

/// Sand classification codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SandCode {
    /// Silty sand
    #[serde(rename = "SM")]
    Sm,
    /// Clayey sand
    #[serde(rename = "SC")]
    Sc,
    /// Poorly graded sand with silt
    #[serde(rename = "SP-SM")]
    SpSm,
}

/// Soil family with the originating code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "family", content = "code")]
pub enum SoilType {
    Clay(ClayCode),
    Sand(SandCode),
    Unknown,
}

impl SoilType {
    /// Classify a raw USCS code by exact match. Total: unrecognized codes
    /// (including padded ones) map to `Unknown`.
    pub fn classify(code: &str) -> Self {
        match code {
            "CL" => SoilType::Clay(ClayCode::Cl),
            "CH" => SoilType::Clay(ClayCode::Ch),
            "SM" => SoilType::Sand(SandCode::Sm),
            "SC" => SoilType::Sand(SandCode::Sc),
            "SP-SM" => SoilType::Sand(SandCode::SpSm),
            _ => SoilType::Unknown,
        }
    }

    pub fn is_clay(&self) -> bool {
        matches!(self, SoilType::Clay(_))
    }

    pub fn is_sand(&self) -> bool {
        matches!(self, SoilType::Sand(_))
    }

    /// Family name as shown in tables ("Clay", "Sand", or empty)
    pub fn family_name(&self) -> &'static str {
        match self {
            SoilType::Clay(_) => "Clay",
            SoilType::Sand(_) => "Sand",
            SoilType::Unknown => "",
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.family_name())
    }
}

// ============================================================================
// Consistency
// ============================================================================

/// Descriptive consistency of a layer, for logs and reports only.
///
/// Clay thresholds are on Su (kN/m²), sand thresholds on the raw SPT N-value.
/// The clay scale reports "Hard Clay" both for 25 ≤ Su < 50 and for
/// Su ≥ 200; the thresholds are kept exactly as used on existing logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Consistency {
    #[serde(rename = "Very Soft Clay")]
    VerySoftClay,
    #[serde(rename = "Soft Clay")]
    SoftClay,
    #[serde(rename = "Hard Clay")]
    HardClay,
    #[serde(rename = "Stiff Clay")]
    StiffClay,
    #[serde(rename = "Very Stiff Clay")]
    VeryStiffClay,
    #[serde(rename = "Very Loose Sand")]
    VeryLooseSand,
    #[serde(rename = "Loose Sand")]
    LooseSand,
    #[serde(rename = "Medium Dense Sand")]
    MediumDenseSand,
    #[serde(rename = "Dense Sand")]
    DenseSand,
    #[serde(rename = "Very Dense Sand")]
    VeryDenseSand,
}

impl Consistency {
    /// Classify a layer. Returns `None` for unknown soil or when the
    /// governing value is missing.
    pub fn classify(soil_type: &SoilType, n_value: Option<f64>, su: Option<f64>) -> Option<Self> {
        match soil_type {
            SoilType::Clay(_) => su.map(Self::for_clay),
            SoilType::Sand(_) => n_value.map(Self::for_sand),
            SoilType::Unknown => None,
        }
    }

    /// Clay consistency from Su (kN/m²)
    pub fn for_clay(su: f64) -> Self {
        if su < 12.0 {
            Consistency::VerySoftClay
        } else if su < 25.0 {
            Consistency::SoftClay
        } else if su < 50.0 {
            Consistency::HardClay
        } else if su < 100.0 {
            Consistency::StiffClay
        } else if su < 200.0 {
            Consistency::VeryStiffClay
        } else {
            Consistency::HardClay
        }
    }

    /// Sand consistency from SPT N
    pub fn for_sand(n_value: f64) -> Self {
        if n_value < 4.0 {
            Consistency::VeryLooseSand
        } else if n_value < 10.0 {
            Consistency::LooseSand
        } else if n_value < 30.0 {
            Consistency::MediumDenseSand
        } else if n_value < 50.0 {
            Consistency::DenseSand
        } else {
            Consistency::VeryDenseSand
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Consistency::VerySoftClay => "Very Soft Clay",
            Consistency::SoftClay => "Soft Clay",
            Consistency::HardClay => "Hard Clay",
            Consistency::StiffClay => "Stiff Clay",
            Consistency::VeryStiffClay => "Very Stiff Clay",
            Consistency::VeryLooseSand => "Very Loose Sand",
            Consistency::LooseSand => "Loose Sand",
            Consistency::MediumDenseSand => "Medium Dense Sand",
            Consistency::DenseSand => "Dense Sand",
            Consistency::VeryDenseSand => "Very Dense Sand",
        }
    }
}

impl fmt::Display for Consistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_codes() {
        assert_eq!(SoilType::classify("CL"), SoilType::Clay(ClayCode::Cl));
        assert_eq!(SoilType::classify("CH"), SoilType::Clay(ClayCode::Ch));
        assert_eq!(SoilType::classify("SM"), SoilType::Sand(SandCode::Sm));
        assert_eq!(SoilType::classify("SC"), SoilType::Sand(SandCode::Sc));
        assert_eq!(SoilType::classify("SP-SM"), SoilType::Sand(SandCode::SpSm));
    }

    #[test]
    fn test_classify_unknown() {
        for code in ["", "ML", "GW", "SP", "ch", "Clay", " CL", "SM "] {
            assert_eq!(SoilType::classify(code), SoilType::Unknown, "code {:?}", code);
        }
    }

    #[test]
    fn test_soil_type_serialization() {
        let json = serde_json::to_string(&SoilType::Sand(SandCode::SpSm)).unwrap();
        assert_eq!(json, r#"{"family":"Sand","code":"SP-SM"}"#);
        let unknown = serde_json::to_string(&SoilType::Unknown).unwrap();
        assert_eq!(unknown, r#"{"family":"Unknown"}"#);

        let roundtrip: SoilType = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, SoilType::Sand(SandCode::SpSm));
    }

    #[test]
    fn test_clay_consistency_thresholds() {
        assert_eq!(Consistency::for_clay(11.9), Consistency::VerySoftClay);
        assert_eq!(Consistency::for_clay(12.0), Consistency::SoftClay);
        assert_eq!(Consistency::for_clay(25.0), Consistency::HardClay);
        assert_eq!(Consistency::for_clay(50.0), Consistency::StiffClay);
        assert_eq!(Consistency::for_clay(100.0), Consistency::VeryStiffClay);
        assert_eq!(Consistency::for_clay(200.0), Consistency::HardClay);
    }

    #[test]
    fn test_sand_consistency_thresholds() {
        assert_eq!(Consistency::for_sand(3.0), Consistency::VeryLooseSand);
        assert_eq!(Consistency::for_sand(4.0), Consistency::LooseSand);
        assert_eq!(Consistency::for_sand(10.0), Consistency::MediumDenseSand);
        assert_eq!(Consistency::for_sand(30.0), Consistency::DenseSand);
        assert_eq!(Consistency::for_sand(50.0), Consistency::VeryDenseSand);
    }

    #[test]
    fn test_consistency_dispatch() {
        let clay = SoilType::Clay(ClayCode::Cl);
        let sand = SoilType::Sand(SandCode::Sm);
        assert_eq!(Consistency::classify(&clay, Some(40.0), Some(60.0)), Some(Consistency::StiffClay));
        assert_eq!(Consistency::classify(&clay, Some(40.0), None), None);
        assert_eq!(Consistency::classify(&sand, Some(40.0), Some(60.0)), Some(Consistency::DenseSand));
        assert_eq!(Consistency::classify(&SoilType::Unknown, Some(40.0), Some(60.0)), None);
    }

    #[test]
    fn test_consistency_label_serialization() {
        let json = serde_json::to_string(&Consistency::MediumDenseSand).unwrap();
        assert_eq!(json, "\"Medium Dense Sand\"");
    }
}
