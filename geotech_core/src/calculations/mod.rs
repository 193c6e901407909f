//! # Geotechnical Calculations
//!
//! Each empirical relation lives in its own module as a pure function of the
//! layer's soil type, corrected blow count and the project settings. The
//! [`borehole`] module chains them together for a whole boring log:
//!
//! - `BoreholeInput` - Borehole constants and layers (JSON-serializable)
//! - `LayerResult` - Derived parameters per depth (JSON-serializable)
//! - `calculate(input, settings) -> Result<Vec<LayerResult>, CalcError>`
//!
//! ## Available Calculations
//!
//! - [`unit_weight`] - Saturated unit weight from SPT N
//! - [`effective_stress`] - Vertical effective stress accumulation
//! - [`overburden`] - CN and corrected N
//! - [`strength`] - Undrained shear strength and friction angle
//! - [`stiffness`] - Young's modulus and Poisson's ratio
//! - [`earth_pressure`] - K0
//! - [`interface`] - Rint
//! - [`borehole`] - The per-borehole pipeline

pub mod borehole;
pub mod earth_pressure;
pub mod effective_stress;
pub mod interface;
pub mod overburden;
pub mod stiffness;
pub mod strength;
pub mod unit_weight;

// Re-export commonly used types
pub use borehole::{calculate, calculate_with_lab, BoreholeConfig, BoreholeInput, BoreholeLayerInput, LayerResult};
pub use effective_stress::StressState;
