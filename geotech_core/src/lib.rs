//! # geotech_core - Soil Parameter Derivation Engine
//!
//! `geotech_core` turns SPT borehole logs into the soil parameters needed for
//! retaining-structure and foundation analysis: unit weight, effective stress,
//! corrected blow counts, strength, stiffness, earth pressure at rest and
//! interface friction. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Auditable**: Every correlation is listed in the equation registry
//!
//! ## Quick Start
//!
//! ```rust
//! use geotech_core::calculations::{calculate, BoreholeInput};
//! use geotech_core::settings::CalculationSettings;
//!
//! let borehole = BoreholeInput::new("BH-1", 99.054, -0.70)
//!     .with_layer(1.45, Some(8.0), "CH")
//!     .with_layer(3.45, Some(15.0), "SM");
//!
//! let layers = calculate(&borehole, &CalculationSettings::default()).unwrap();
//! let json = serde_json::to_string_pretty(&layers).unwrap();
//! assert!(json.contains("sigma_v_effective"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The per-layer correlations and the borehole pipeline
//! - [`soil`] - USCS classification and consistency
//! - [`settings`] - Structure, construction method, surface and correction options
//! - [`lab`] - Laboratory data and overrides
//! - [`report`] - Per-borehole result envelope
//! - [`project`] - Project container, metadata and parallel calculation
//! - [`equations`] - Equation registry for auditing
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod lab;
pub mod project;
pub mod report;
pub mod settings;
pub mod soil;

// Re-export commonly used types at crate root for convenience
pub use calculations::{BoreholeInput, BoreholeLayerInput, LayerResult};
pub use errors::{CalcError, CalcResult};
pub use lab::{LabDataProvider, LabDataTable, Overridable, Provenance};
pub use project::{Project, ProjectMetadata};
pub use report::BoreholeReport;
pub use settings::CalculationSettings;
pub use soil::{Consistency, SoilType};
