//! # Borehole Parameter Derivation
//!
//! Runs the per-layer pipeline over one borehole in ascending depth order:
//!
//! ```text
//! classify -> γsat -> σv' -> CN, Ncor -> Su / φ' -> E, ν -> K0 -> Rint
//! ```
//!
//! Only the span from the first to the last layer carrying both an N-value
//! and a classification code is emitted. Inside that span, layers without
//! SPT data are gap-filled: γsat is carried over from the layer above
//! (tagged `Estimated`) unless the laboratory supplied one for that depth,
//! σv' keeps accumulating with an exact split at the water table, and the
//! soil-specific fields stay empty. Tested layers never read laboratory data
//! for their own calculation.
//!
//! σv' is threaded from layer to layer through an immutable accumulator, so
//! the whole run is a single fold. Layers must therefore arrive sorted by
//! depth; unsorted input is rejected before any calculation.
//!
//! ## Example
//!
//! ```rust
//! use geotech_core::calculations::borehole::{calculate, BoreholeInput};
//! use geotech_core::settings::CalculationSettings;
//!
//! let input = BoreholeInput::new("BH-1", 99.054, -0.70)
//!     .with_layer(1.45, Some(8.0), "CH")
//!     .with_layer(2.45, Some(12.0), "CL")
//!     .with_layer(3.45, Some(15.0), "SM");
//!
//! let results = calculate(&input, &CalculationSettings::default()).unwrap();
//! assert_eq!(results.len(), 3);
//! assert!(results[0].su.value().is_some());
//! assert!(results[2].phi.value().is_some());
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::effective_stress::{self, StressState};
use crate::calculations::{earth_pressure, interface, overburden, stiffness, strength, unit_weight};
use crate::errors::{CalcError, CalcResult};
use crate::lab::{apply_lab_overrides, LabDataProvider, LabParameter, NoLabData, Overridable};
use crate::settings::CalculationSettings;
use crate::soil::{Consistency, SoilType};

/// γsat assumed for a gap layer when no layer above has one (kN/m³)
pub const DEFAULT_GAP_GAMMA_SAT: f64 = 18.0;

// ============================================================================
// Input
// ============================================================================

/// One field record from the boring log.
///
/// ## JSON Example
///
/// ```json
/// { "depth": 3.45, "n_value": 15, "classification": "SM" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoreholeLayerInput {
    /// Depth below ground surface (m)
    pub depth: f64,

    /// SPT blow count per 0.3 m; `None` when no test was made at this depth
    #[serde(default)]
    pub n_value: Option<f64>,

    /// USCS classification code (may be empty or unrecognized)
    #[serde(default)]
    pub classification: String,
}

impl BoreholeLayerInput {
    pub fn new(depth: f64, n_value: Option<f64>, classification: impl Into<String>) -> Self {
        BoreholeLayerInput {
            depth,
            n_value,
            classification: classification.into(),
        }
    }

    /// True when the layer carries both an N-value and a classification
    pub fn has_spt_data(&self) -> bool {
        self.n_value.is_some() && !self.classification.is_empty()
    }
}

/// Per-borehole constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoreholeConfig {
    /// Ground surface elevation (m, project datum)
    pub ground_elevation: f64,

    /// Water table relative to ground (m); negative = below ground
    pub water_depth: f64,
}

impl BoreholeConfig {
    pub fn water_level_elevation(&self) -> f64 {
        effective_stress::water_level_elevation(self.ground_elevation, self.water_depth)
    }

    pub fn elevation_at(&self, depth: f64) -> f64 {
        effective_stress::elevation(self.ground_elevation, depth)
    }
}

/// A borehole as supplied by the caller.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "BH-1",
///   "ground_elevation": 99.054,
///   "water_depth": -0.70,
///   "layers": [
///     { "depth": 1.45, "n_value": 8, "classification": "CH" },
///     { "depth": 2.45, "n_value": 12, "classification": "CL" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoreholeInput {
    /// Borehole name (e.g., "BH-1"); also the laboratory data key
    pub name: String,

    #[serde(flatten)]
    pub config: BoreholeConfig,

    /// Layers in ascending depth order
    #[serde(default)]
    pub layers: Vec<BoreholeLayerInput>,
}

impl BoreholeInput {
    pub fn new(name: impl Into<String>, ground_elevation: f64, water_depth: f64) -> Self {
        BoreholeInput {
            name: name.into(),
            config: BoreholeConfig {
                ground_elevation,
                water_depth,
            },
            layers: Vec::new(),
        }
    }

    /// Builder-style layer append
    pub fn with_layer(mut self, depth: f64, n_value: Option<f64>, classification: impl Into<String>) -> Self {
        self.layers.push(BoreholeLayerInput::new(depth, n_value, classification));
        self
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.name.trim().is_empty() {
            return Err(CalcError::missing_field("name"));
        }
        if !self.config.ground_elevation.is_finite() {
            return Err(CalcError::invalid_input(
                "ground_elevation",
                self.config.ground_elevation.to_string(),
                "Ground elevation must be a finite number",
            ));
        }
        if !self.config.water_depth.is_finite() {
            return Err(CalcError::invalid_input(
                "water_depth",
                self.config.water_depth.to_string(),
                "Water depth must be a finite number",
            ));
        }
        if self.layers.is_empty() {
            return Err(CalcError::empty_borehole(&self.name));
        }

        let mut previous: Option<f64> = None;
        for (index, layer) in self.layers.iter().enumerate() {
            if !layer.depth.is_finite() || layer.depth < 0.0 {
                return Err(CalcError::invalid_input(
                    format!("layers[{}].depth", index),
                    layer.depth.to_string(),
                    "Depth must be a finite, non-negative distance below ground",
                ));
            }
            if let Some(prev) = previous {
                if layer.depth <= prev {
                    return Err(CalcError::depth_order(&self.name, index, prev, layer.depth));
                }
            }
            previous = Some(layer.depth);
        }
        Ok(())
    }

    /// Index range of the layers from the first to the last one with SPT data
    pub fn spt_span(&self) -> Option<(usize, usize)> {
        let first = self.layers.iter().position(BoreholeLayerInput::has_spt_data)?;
        let last = self.layers.iter().rposition(BoreholeLayerInput::has_spt_data)?;
        Some((first, last))
    }
}

// ============================================================================
// Output
// ============================================================================

/// Derived parameters for one depth.
///
/// Pipeline layers fill every field. Gap layers (no SPT data) carry only
/// depth, elevation, the estimated γsat and σv', plus any laboratory Su/φ'.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerResult {
    /// Depth below ground (m)
    pub depth: f64,

    /// Elevation (m, project datum)
    pub elevation: f64,

    /// Saturated unit weight γsat (kN/m³)
    pub gamma_sat: Overridable,

    /// Classification code as logged
    pub classification: String,

    pub soil_type: SoilType,

    /// Field SPT N
    pub n_value: Option<f64>,

    /// Vertical effective stress σv' (kN/m²)
    pub sigma_v_effective: f64,

    /// Overburden correction factor (sand only)
    pub cn: Option<f64>,

    /// Corrected N
    pub ncor: Option<f64>,

    /// Undrained shear strength Su (kN/m², clay only)
    pub su: Overridable,

    /// Effective friction angle φ' (degrees, sand only)
    pub phi: Overridable,

    /// Young's modulus E / E' (kN/m²)
    pub e_modulus: Option<f64>,

    /// Poisson's ratio ν
    pub poisson_ratio: Option<f64>,

    /// Earth pressure coefficient at rest
    pub k0: Option<f64>,

    /// Interface friction ratio
    pub rint: Option<f64>,

    /// Descriptive consistency from the effective Su (clay) or N (sand)
    pub consistency: Option<Consistency>,
}

impl LayerResult {
    /// True for layers produced by the gap fill rather than the pipeline
    pub fn is_gap_fill(&self) -> bool {
        self.n_value.is_none()
    }

    /// Recompute [`consistency`](Self::consistency) from the current values.
    pub fn refresh_consistency(&mut self) {
        self.consistency = Consistency::classify(&self.soil_type, self.n_value, self.su.value());
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// State threaded from one emitted layer to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Accumulator {
    stress: StressState,
    /// γsat that drove the layer above, for gap fill
    previous_gamma: Option<f64>,
}

impl Accumulator {
    const START: Accumulator = Accumulator {
        stress: StressState::SURFACE,
        previous_gamma: None,
    };
}

/// Derive parameters for every layer in the SPT span of `input`.
///
/// Returns an empty list when no layer carries both an N-value and a
/// classification.
///
/// # Errors
///
/// * `CalcError::EmptyBorehole` - no layers at all
/// * `CalcError::DepthOrder` - depths not strictly ascending
/// * `CalcError::InvalidInput` / `MissingField` - malformed borehole constants
pub fn calculate(input: &BoreholeInput, settings: &CalculationSettings) -> CalcResult<Vec<LayerResult>> {
    run(input, settings, &NoLabData)
}

/// [`calculate`] with laboratory data, followed by [`apply_lab_overrides`].
///
/// A laboratory γsat at a gap-filled depth replaces the carried-over
/// estimate in σv' and is inherited by the gap layers below it.
pub fn calculate_with_lab(
    input: &BoreholeInput,
    settings: &CalculationSettings,
    lab: &dyn LabDataProvider,
) -> CalcResult<Vec<LayerResult>> {
    let mut results = run(input, settings, lab)?;
    apply_lab_overrides(&mut results, &input.name, lab);
    Ok(results)
}

fn run(input: &BoreholeInput, settings: &CalculationSettings, lab: &dyn LabDataProvider) -> CalcResult<Vec<LayerResult>> {
    input.validate()?;

    let Some((first, last)) = input.spt_span() else {
        tracing::warn!(borehole = %input.name, "No layer has both an N-value and a classification");
        return Ok(Vec::new());
    };

    let span = &input.layers[first..=last];
    let (results, _) = span.iter().fold(
        (Vec::with_capacity(span.len()), Accumulator::START),
        |(mut results, acc), layer| {
            let (result, next) = if layer.has_spt_data() {
                pipeline_layer(&input.name, layer, &input.config, settings, acc)
            } else {
                gap_layer(&input.name, layer, &input.config, lab, acc)
            };
            results.push(result);
            (results, next)
        },
    );

    tracing::info!(
        borehole = %input.name,
        layers = results.len(),
        gap_filled = results.iter().filter(|r| r.is_gap_fill()).count(),
        "Calculated borehole parameters"
    );

    Ok(results)
}

fn pipeline_layer(
    borehole: &str,
    layer: &BoreholeLayerInput,
    config: &BoreholeConfig,
    settings: &CalculationSettings,
    acc: Accumulator,
) -> (LayerResult, Accumulator) {
    let elevation = config.elevation_at(layer.depth);
    let soil_type = SoilType::classify(&layer.classification);
    if soil_type == SoilType::Unknown {
        tracing::warn!(borehole, depth = layer.depth, code = %layer.classification, "Unrecognized soil classification");
    }

    let gamma_sat = unit_weight::gamma_sat(layer.n_value);
    let stress = acc
        .stress
        .advance(gamma_sat, layer.depth, elevation, config.water_level_elevation());

    let cn = overburden::cn(stress.sigma_v, &soil_type);
    let ncor = overburden::ncor(layer.n_value, cn, &soil_type, settings.correction_method);

    let su = strength::undrained_shear_strength(ncor, &soil_type);
    let phi = strength::friction_angle(ncor, &soil_type);

    let e_modulus = stiffness::elastic_modulus(&soil_type, su, ncor, settings.structure_type);
    let poisson_ratio = stiffness::poisson_ratio(&soil_type);
    let k0 = earth_pressure::k0(&soil_type, phi, settings.structure_type);
    let rint = interface::rint(&soil_type, su, settings.method, settings.surface_type);

    tracing::debug!(
        borehole,
        depth = layer.depth,
        soil = %soil_type,
        sigma_v = stress.sigma_v,
        "Computed layer"
    );

    let mut result = LayerResult {
        depth: layer.depth,
        elevation,
        gamma_sat: Overridable::calculated(Some(gamma_sat)),
        classification: layer.classification.clone(),
        soil_type,
        n_value: layer.n_value,
        sigma_v_effective: stress.sigma_v,
        cn,
        ncor,
        su: Overridable::calculated(su),
        phi: Overridable::calculated(phi),
        e_modulus: Some(e_modulus),
        poisson_ratio: Some(poisson_ratio),
        k0: Some(k0),
        rint: Some(rint),
        consistency: None,
    };
    result.refresh_consistency();

    let next = Accumulator {
        stress,
        previous_gamma: Some(gamma_sat),
    };
    (result, next)
}

fn gap_layer(
    borehole: &str,
    layer: &BoreholeLayerInput,
    config: &BoreholeConfig,
    lab: &dyn LabDataProvider,
    acc: Accumulator,
) -> (LayerResult, Accumulator) {
    let elevation = config.elevation_at(layer.depth);
    let estimated = acc.previous_gamma.unwrap_or(DEFAULT_GAP_GAMMA_SAT);
    let gamma_sat = lab
        .lab_override(borehole, layer.depth, LabParameter::GammaSat)
        .unwrap_or(estimated);
    let stress = acc.stress.advance_split(
        gamma_sat,
        layer.depth,
        config.ground_elevation,
        config.water_level_elevation(),
    );

    tracing::debug!(borehole, depth = layer.depth, gamma_sat, sigma_v = stress.sigma_v, "Gap-filled layer");

    let result = LayerResult {
        depth: layer.depth,
        elevation,
        gamma_sat: Overridable::estimated(Some(estimated)),
        classification: layer.classification.clone(),
        soil_type: SoilType::Unknown,
        n_value: None,
        sigma_v_effective: stress.sigma_v,
        cn: None,
        ncor: None,
        su: Overridable::estimated(None),
        phi: Overridable::estimated(None),
        e_modulus: None,
        poisson_ratio: None,
        k0: None,
        rint: None,
        consistency: None,
    };

    let next = Accumulator {
        stress,
        previous_gamma: Some(gamma_sat),
    };
    (result, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lab::{LabDataTable, LabParameter, NoLabData, Provenance};
    use crate::settings::{ConstructionMethod, CorrectionMethod, StructureType, SurfaceType};

    fn sample_borehole() -> BoreholeInput {
        BoreholeInput::new("BH-1", 99.054, -0.70)
            .with_layer(1.45, Some(8.0), "CH")
            .with_layer(2.45, Some(12.0), "CL")
            .with_layer(3.45, Some(15.0), "SM")
            .with_layer(4.95, Some(20.0), "SC")
            .with_layer(6.45, Some(25.0), "SM")
    }

    #[test]
    fn test_reference_two_layer_stress() {
        let input = BoreholeInput::new("BH-REF", 100.0, -2.0)
            .with_layer(2.0, Some(15.0), "CL")
            .with_layer(4.0, Some(15.0), "CL");
        let results = calculate(&input, &CalculationSettings::default()).unwrap();

        assert_eq!(results[0].gamma_sat.value(), Some(18.0));
        assert!((results[0].sigma_v_effective - 36.0).abs() < 1e-9);
        assert!((results[1].sigma_v_effective - 52.38).abs() < 1e-9);
        assert!((results[0].elevation - 98.0).abs() < 1e-9);
    }

    #[test]
    fn test_full_pipeline_sample() {
        let results = calculate(&sample_borehole(), &CalculationSettings::default()).unwrap();
        assert_eq!(results.len(), 5);

        // Layer 1: CH, N = 8, fully below water (elev 97.604 < 98.354)
        let l1 = &results[0];
        assert_eq!(l1.gamma_sat.value(), Some(17.0));
        assert!((l1.sigma_v_effective - (17.0 - 9.81) * 1.45).abs() < 1e-9);
        assert_eq!(l1.cn, None);
        assert_eq!(l1.ncor, Some(8.0));
        let su = l1.su.value().unwrap();
        assert!((su - 8.0 * 0.6739 * 9.81).abs() < 1e-9);
        assert_eq!(l1.phi.value(), None);
        assert_eq!(l1.e_modulus, Some(500.0 * su));
        assert_eq!(l1.poisson_ratio, Some(0.495));
        assert_eq!(l1.k0, Some(0.80));
        assert_eq!(l1.rint, Some(0.5));

        // Layer 3: SM, Liao and Whitman correction
        let l3 = &results[2];
        let cn = l3.cn.unwrap();
        assert!((cn - (100.0 / l3.sigma_v_effective).sqrt()).abs() < 1e-12);
        assert!((l3.ncor.unwrap() - cn * 15.0).abs() < 1e-12);
        assert!(l3.su.value().is_none());
        let phi = l3.phi.value().unwrap();
        assert!((l3.k0.unwrap() - (1.0 - phi.to_radians().sin())).abs() < 1e-12);
        assert_eq!(l3.rint, Some(0.8));
        assert_eq!(l3.e_modulus, Some(1000.0 * l3.ncor.unwrap()));
        assert_eq!(l3.consistency, Some(Consistency::MediumDenseSand));
    }

    #[test]
    fn test_settings_flow_through() {
        let settings = CalculationSettings {
            structure_type: StructureType::SheetPile,
            method: ConstructionMethod::Bored,
            surface_type: SurfaceType::RoughSteel,
            correction_method: CorrectionMethod::Terzaghi1984,
        };
        let results = calculate(&sample_borehole(), &settings).unwrap();

        let clay = &results[1];
        assert_eq!(clay.k0, Some(0.65));
        assert_eq!(clay.rint, Some(0.45));

        let sand = &results[3];
        assert_eq!(sand.ncor, Some(17.5));
        assert_eq!(sand.e_modulus, Some(0.0));
        assert_eq!(sand.rint, Some(0.7));
    }

    #[test]
    fn test_stress_non_decreasing() {
        let results = calculate(&sample_borehole(), &CalculationSettings::default()).unwrap();
        for pair in results.windows(2) {
            assert!(pair[1].sigma_v_effective >= pair[0].sigma_v_effective);
        }
    }

    #[test]
    fn test_span_trims_layers_without_spt() {
        let input = BoreholeInput::new("BH-2", 50.0, -1.0)
            .with_layer(0.5, None, "")
            .with_layer(1.0, Some(6.0), "CL")
            .with_layer(2.0, None, "CL")
            .with_layer(3.0, Some(10.0), "SM")
            .with_layer(4.0, Some(12.0), "")
            .with_layer(5.0, None, "");
        let results = calculate(&input, &CalculationSettings::default()).unwrap();

        let depths: Vec<f64> = results.iter().map(|r| r.depth).collect();
        assert_eq!(depths, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_gap_layer_fill() {
        // Ground +10, water at +8.5; gap from 1.0 to 2.0 straddles the table
        let input = BoreholeInput::new("BH-3", 10.0, -1.5)
            .with_layer(1.0, Some(6.0), "CL")
            .with_layer(2.0, None, "CL")
            .with_layer(3.0, Some(12.0), "CL");
        let results = calculate(&input, &CalculationSettings::default()).unwrap();

        let first = &results[0];
        assert!((first.sigma_v_effective - 16.0).abs() < 1e-9);

        let gap = &results[1];
        assert!(gap.is_gap_fill());
        assert_eq!(gap.gamma_sat.value(), Some(16.0));
        assert_eq!(gap.gamma_sat.source(), Provenance::Estimated);
        assert_eq!(gap.soil_type, SoilType::Unknown);
        assert_eq!(gap.classification, "CL");
        let expected = 16.0 + 16.0 * 0.5 + (16.0 - 9.81) * 0.5;
        assert!((gap.sigma_v_effective - expected).abs() < 1e-9);
        assert_eq!(gap.su.value(), None);
        assert_eq!(gap.su.source(), Provenance::Estimated);
        assert_eq!(gap.e_modulus, None);
        assert_eq!(gap.k0, None);

        // Following pipeline layer continues from the gap layer
        let next = &results[2];
        assert!((next.sigma_v_effective - (expected + (18.0 - 9.81) * 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_zero_n_value() {
        let input = BoreholeInput::new("BH-4", 20.0, -5.0)
            .with_layer(1.0, Some(0.0), "SM")
            .with_layer(2.0, Some(10.0), "SM");
        let results = calculate(&input, &CalculationSettings::default()).unwrap();
        let first = &results[0];
        assert_eq!(first.gamma_sat.value(), Some(0.0));
        assert_eq!(first.sigma_v_effective, 0.0);
        assert_eq!(first.cn, Some(0.0));
        assert_eq!(first.ncor, Some(0.0));
        assert_eq!(first.e_modulus, Some(0.0));
    }

    #[test]
    fn test_unknown_soil_layer() {
        let input = BoreholeInput::new("BH-5", 20.0, -5.0).with_layer(1.5, Some(10.0), "ML");
        let results = calculate(&input, &CalculationSettings::default()).unwrap();
        let layer = &results[0];
        assert_eq!(layer.soil_type, SoilType::Unknown);
        assert!((layer.sigma_v_effective - 25.5).abs() < 1e-9);
        assert_eq!(layer.su.value(), None);
        assert_eq!(layer.phi.value(), None);
        assert_eq!(layer.e_modulus, Some(0.0));
        assert_eq!(layer.k0, Some(0.0));
        assert_eq!(layer.rint, Some(0.0));
        assert_eq!(layer.consistency, None);
    }

    #[test]
    fn test_no_spt_data_yields_empty() {
        let input = BoreholeInput::new("BH-6", 20.0, -5.0)
            .with_layer(1.0, None, "CL")
            .with_layer(2.0, Some(5.0), "");
        let results = calculate(&input, &CalculationSettings::default()).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_rejects_out_of_order_depths() {
        let input = BoreholeInput::new("BH-7", 20.0, -5.0)
            .with_layer(2.0, Some(5.0), "CL")
            .with_layer(1.0, Some(5.0), "CL");
        let err = calculate(&input, &CalculationSettings::default()).unwrap_err();
        assert_eq!(err, CalcError::depth_order("BH-7", 1, 2.0, 1.0));

        let duplicate = BoreholeInput::new("BH-7", 20.0, -5.0)
            .with_layer(2.0, Some(5.0), "CL")
            .with_layer(2.0, Some(6.0), "CL");
        assert_eq!(calculate(&duplicate, &CalculationSettings::default()).unwrap_err().error_code(), "DEPTH_ORDER");
    }

    #[test]
    fn test_rejects_malformed_input() {
        let empty = BoreholeInput::new("BH-8", 20.0, -5.0);
        assert_eq!(empty.validate().unwrap_err(), CalcError::empty_borehole("BH-8"));

        let unnamed = BoreholeInput::new("  ", 20.0, -5.0).with_layer(1.0, Some(5.0), "CL");
        assert_eq!(unnamed.validate().unwrap_err().error_code(), "MISSING_FIELD");

        let negative = BoreholeInput::new("BH-8", 20.0, -5.0).with_layer(-1.0, Some(5.0), "CL");
        assert_eq!(negative.validate().unwrap_err().error_code(), "INVALID_INPUT");

        let nan_ground = BoreholeInput::new("BH-8", f64::NAN, -5.0).with_layer(1.0, Some(5.0), "CL");
        assert!(nan_ground.validate().is_err());
    }

    #[test]
    fn test_inputs_not_mutated_and_runs_repeatable() {
        let input = sample_borehole();
        let before = input.clone();
        let a = calculate(&input, &CalculationSettings::default()).unwrap();
        let b = calculate(&input, &CalculationSettings::default()).unwrap();
        assert_eq!(input, before);
        assert_eq!(a, b);
    }

    #[test]
    fn test_lab_override_and_revert() {
        let input = sample_borehole();
        let settings = CalculationSettings::default();
        let mut lab = LabDataTable::new();
        lab.insert("BH-1", 2.45, LabParameter::Su, "80.0");
        lab.insert("BH-1", 3.45, LabParameter::Phi, 33.0);
        lab.insert("BH-1", 3.45, LabParameter::GammaSat, "not tested");

        let mut results = calculate_with_lab(&input, &settings, &lab).unwrap();
        let calculated_su = results[1].su.calculated;
        assert_eq!(results[1].su.value(), Some(80.0));
        assert_eq!(results[1].su.source(), Provenance::Lab);
        assert_eq!(results[1].consistency, Some(Consistency::StiffClay));
        assert_eq!(results[2].phi.value(), Some(33.0));
        assert_eq!(results[2].gamma_sat.source(), Provenance::Calculated);

        // Idempotent
        let snapshot = results.clone();
        apply_lab_overrides(&mut results, "BH-1", &lab);
        assert_eq!(results, snapshot);

        // Removing the override restores the calculated value
        lab.remove("BH-1", 2.45, LabParameter::Su);
        apply_lab_overrides(&mut results, "BH-1", &lab);
        assert_eq!(results[1].su.value(), calculated_su);
        assert_eq!(results[1].su.source(), Provenance::Calculated);

        apply_lab_overrides(&mut results, "BH-1", &NoLabData);
        assert_eq!(results, calculate(&input, &settings).unwrap());
    }

    #[test]
    fn test_lab_on_gap_layer_reverts_to_estimated() {
        let input = BoreholeInput::new("BH-9", 10.0, -1.5)
            .with_layer(1.0, Some(6.0), "CL")
            .with_layer(2.0, None, "")
            .with_layer(3.0, Some(12.0), "CL");
        let mut lab = LabDataTable::new();
        lab.insert("BH-9", 2.0, LabParameter::GammaSat, 17.4);

        let mut results = calculate_with_lab(&input, &CalculationSettings::default(), &lab).unwrap();
        assert_eq!(results[1].gamma_sat.value(), Some(17.4));
        assert_eq!(results[1].gamma_sat.source(), Provenance::Lab);

        lab.remove("BH-9", 2.0, LabParameter::GammaSat);
        apply_lab_overrides(&mut results, "BH-9", &lab);
        assert_eq!(results[1].gamma_sat.value(), Some(16.0));
        assert_eq!(results[1].gamma_sat.source(), Provenance::Estimated);
    }

    #[test]
    fn test_lab_gamma_drives_gap_stress() {
        let input = BoreholeInput::new("BH-5", 10.0, -5.0)
            .with_layer(1.0, Some(6.0), "CL")
            .with_layer(2.0, None, "")
            .with_layer(3.0, None, "")
            .with_layer(4.0, Some(12.0), "CL");
        let settings = CalculationSettings::default();
        let mut lab = LabDataTable::new();
        lab.insert("BH-5", 2.0, LabParameter::GammaSat, 20.0);

        let results = calculate_with_lab(&input, &settings, &lab).unwrap();
        let stress: Vec<f64> = results.iter().map(|r| r.sigma_v_effective).collect();
        for (got, want) in stress.iter().zip([16.0, 36.0, 56.0, 74.0]) {
            assert!((got - want).abs() < 1e-9, "σv' {} != {}", got, want);
        }
        assert_eq!(results[1].gamma_sat.value(), Some(20.0));
        assert_eq!(results[1].gamma_sat.source(), Provenance::Lab);
        // The gap below inherits the laboratory weight as its estimate
        assert_eq!(results[2].gamma_sat.value(), Some(20.0));
        assert_eq!(results[2].gamma_sat.source(), Provenance::Estimated);

        let plain = calculate(&input, &settings).unwrap();
        assert!((plain[1].sigma_v_effective - 32.0).abs() < 1e-9);
        assert!((plain[2].sigma_v_effective - 48.0).abs() < 1e-9);
    }

    #[test]
    fn test_padded_classification_is_spt_data() {
        let input = BoreholeInput::new("BH-6", 10.0, -5.0)
            .with_layer(1.0, Some(6.0), " CL")
            .with_layer(2.0, Some(8.0), "CL");
        let results = calculate(&input, &CalculationSettings::default()).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].soil_type, SoilType::Unknown);
        assert_eq!(results[0].classification, " CL");
    }

    #[test]
    fn test_input_json() {
        let json = r#"{
            "name": "BH-1",
            "ground_elevation": 100.0,
            "water_depth": -2.0,
            "layers": [
                { "depth": 2.0, "n_value": 15, "classification": "CL" },
                { "depth": 3.0 }
            ]
        }"#;
        let input: BoreholeInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.config.ground_elevation, 100.0);
        assert_eq!(input.layers[1].n_value, None);
        assert_eq!(input.layers[1].classification, "");
    }
}
