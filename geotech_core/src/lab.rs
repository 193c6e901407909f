//! # Laboratory Overrides
//!
//! Laboratory test results take precedence over the empirical estimates for
//! three fields: saturated unit weight, undrained shear strength, and
//! friction angle. This module holds:
//!
//! - [`Provenance`] / [`Overridable`] - a field value that remembers both the
//!   pipeline's own value and any laboratory value laid over it
//! - [`LabDataProvider`] - the lookup contract for laboratory data
//! - [`LabDataTable`] - an in-memory provider fed from JSON
//! - [`apply_lab_overrides`] - the merge step
//!
//! Because each field keeps its calculated value underneath the override,
//! merging is idempotent and removing a laboratory value restores the
//! calculated number and its provenance.
//!
//! ## Example
//!
//! ```rust
//! use geotech_core::lab::{LabDataTable, LabParameter, Overridable, Provenance};
//!
//! let mut field = Overridable::calculated(Some(18.0));
//! field.set_lab(Some(19.2));
//! assert_eq!(field.value(), Some(19.2));
//! assert_eq!(field.source(), Provenance::Lab);
//!
//! field.set_lab(None);
//! assert_eq!(field.value(), Some(18.0));
//! assert_eq!(field.source(), Provenance::Calculated);
//!
//! let mut table = LabDataTable::new();
//! table.insert("BH-1", 3.45, LabParameter::Phi, "32.5");
//! table.insert("BH-1", 4.95, LabParameter::Su, "n/a"); // ignored: not numeric
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculations::borehole::LayerResult;

/// Depths closer than this (m) address the same laboratory sample
pub const DEPTH_TOLERANCE: f64 = 1e-6;

// ============================================================================
// Provenance
// ============================================================================

/// Where a field's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provenance {
    /// Laboratory measurement
    Lab,
    /// Empirical pipeline on a layer with SPT data
    Calculated,
    /// Gap-fill heuristic on a layer without SPT data
    Estimated,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Provenance::Lab => "Lab",
            Provenance::Calculated => "Calculated",
            Provenance::Estimated => "Estimated",
        };
        write!(f, "{}", s)
    }
}

/// A numeric field that a laboratory value may override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Overridable {
    /// Value produced by the pipeline (or gap fill)
    pub calculated: Option<f64>,

    /// Laboratory value, if one is currently applied
    pub lab: Option<f64>,

    /// Provenance of `calculated`: `Calculated` or `Estimated`
    pub basis: Provenance,
}

impl Overridable {
    /// Field computed by the full pipeline
    pub fn calculated(value: Option<f64>) -> Self {
        Overridable {
            calculated: value,
            lab: None,
            basis: Provenance::Calculated,
        }
    }

    /// Field filled in by the gap heuristic
    pub fn estimated(value: Option<f64>) -> Self {
        Overridable {
            calculated: value,
            lab: None,
            basis: Provenance::Estimated,
        }
    }

    /// Effective value: the laboratory value when present, else the calculated one
    pub fn value(&self) -> Option<f64> {
        self.lab.or(self.calculated)
    }

    /// Provenance of [`value`](Self::value)
    pub fn source(&self) -> Provenance {
        if self.lab.is_some() {
            Provenance::Lab
        } else {
            self.basis
        }
    }

    pub fn is_lab(&self) -> bool {
        self.lab.is_some()
    }

    /// Replace the laboratory value; `None` removes the override.
    pub fn set_lab(&mut self, lab: Option<f64>) {
        self.lab = lab.filter(|v| v.is_finite());
    }
}

// ============================================================================
// Provider contract
// ============================================================================

/// Fields a laboratory may supply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabParameter {
    #[serde(rename = "gamma_sat")]
    GammaSat,
    #[serde(rename = "su")]
    Su,
    #[serde(rename = "phi")]
    Phi,
}

impl LabParameter {
    pub const ALL: [LabParameter; 3] = [LabParameter::GammaSat, LabParameter::Su, LabParameter::Phi];
}

/// Which laboratory fields exist for a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabFlags {
    pub has_gamma_sat: bool,
    pub has_su: bool,
    pub has_phi: bool,
}

impl LabFlags {
    pub fn has(&self, parameter: LabParameter) -> bool {
        match parameter {
            LabParameter::GammaSat => self.has_gamma_sat,
            LabParameter::Su => self.has_su,
            LabParameter::Phi => self.has_phi,
        }
    }
}

/// Read-only source of laboratory results, addressed by borehole and depth.
///
/// A flag may be set while [`lab_value`](Self::lab_value) still returns
/// `None` (e.g. the entry is not a number); the merge treats that as no
/// override.
pub trait LabDataProvider {
    fn lab_flags(&self, borehole: &str, depth: f64) -> LabFlags;

    fn lab_value(&self, borehole: &str, depth: f64, parameter: LabParameter) -> Option<f64>;

    /// Usable laboratory value: flagged and numeric.
    fn lab_override(&self, borehole: &str, depth: f64, parameter: LabParameter) -> Option<f64> {
        if self.lab_flags(borehole, depth).has(parameter) {
            self.lab_value(borehole, depth, parameter).filter(|v| v.is_finite())
        } else {
            None
        }
    }
}

/// Provider with no laboratory data at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLabData;

impl LabDataProvider for NoLabData {
    fn lab_flags(&self, _borehole: &str, _depth: f64) -> LabFlags {
        LabFlags::default()
    }

    fn lab_value(&self, _borehole: &str, _depth: f64, _parameter: LabParameter) -> Option<f64> {
        None
    }
}

// ============================================================================
// In-memory table
// ============================================================================

/// A laboratory entry as typed by the technician: a number or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawLabValue {
    Number(f64),
    Text(String),
}

impl RawLabValue {
    /// Numeric value; blank or non-numeric text yields `None`.
    pub fn parse(&self) -> Option<f64> {
        let value = match self {
            RawLabValue::Number(n) => *n,
            RawLabValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for RawLabValue {
    fn from(n: f64) -> Self {
        RawLabValue::Number(n)
    }
}

impl From<&str> for RawLabValue {
    fn from(s: &str) -> Self {
        RawLabValue::Text(s.to_string())
    }
}

impl From<String> for RawLabValue {
    fn from(s: String) -> Self {
        RawLabValue::Text(s)
    }
}

/// Laboratory results for one sample depth
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LabSample {
    /// Sample depth (m)
    pub depth: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamma_sat: Option<RawLabValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub su: Option<RawLabValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phi: Option<RawLabValue>,
}

impl LabSample {
    fn slot(&self, parameter: LabParameter) -> Option<&RawLabValue> {
        match parameter {
            LabParameter::GammaSat => self.gamma_sat.as_ref(),
            LabParameter::Su => self.su.as_ref(),
            LabParameter::Phi => self.phi.as_ref(),
        }
    }

    fn slot_mut(&mut self, parameter: LabParameter) -> &mut Option<RawLabValue> {
        match parameter {
            LabParameter::GammaSat => &mut self.gamma_sat,
            LabParameter::Su => &mut self.su,
            LabParameter::Phi => &mut self.phi,
        }
    }

    fn is_empty(&self) -> bool {
        self.gamma_sat.is_none() && self.su.is_none() && self.phi.is_none()
    }
}

/// Laboratory results for any number of boreholes.
///
/// ## JSON Example
///
/// ```json
/// {
///   "BH-1": [
///     { "depth": 2.45, "su": "38.5" },
///     { "depth": 3.45, "gamma_sat": 18.6, "phi": 31.0 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabDataTable {
    boreholes: BTreeMap<String, Vec<LabSample>>,
}

impl LabDataTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample at `depth` in `borehole`, if recorded
    pub fn sample(&self, borehole: &str, depth: f64) -> Option<&LabSample> {
        self.boreholes
            .get(borehole)?
            .iter()
            .find(|s| (s.depth - depth).abs() < DEPTH_TOLERANCE)
    }

    /// Record a raw laboratory entry, replacing any previous one.
    pub fn insert(&mut self, borehole: impl Into<String>, depth: f64, parameter: LabParameter, value: impl Into<RawLabValue>) {
        let samples = self.boreholes.entry(borehole.into()).or_default();
        let index = match samples.iter().position(|s| (s.depth - depth).abs() < DEPTH_TOLERANCE) {
            Some(index) => index,
            None => {
                samples.push(LabSample {
                    depth,
                    ..LabSample::default()
                });
                samples.sort_by(|a, b| a.depth.total_cmp(&b.depth));
                samples
                    .iter()
                    .position(|s| (s.depth - depth).abs() < DEPTH_TOLERANCE)
                    .unwrap_or(samples.len() - 1)
            }
        };
        *samples[index].slot_mut(parameter) = Some(value.into());
    }

    /// Remove one laboratory entry. Returns the removed raw value.
    pub fn remove(&mut self, borehole: &str, depth: f64, parameter: LabParameter) -> Option<RawLabValue> {
        let samples = self.boreholes.get_mut(borehole)?;
        let index = samples.iter().position(|s| (s.depth - depth).abs() < DEPTH_TOLERANCE)?;
        let removed = samples[index].slot_mut(parameter).take();
        if samples[index].is_empty() {
            samples.remove(index);
        }
        if samples.is_empty() {
            self.boreholes.remove(borehole);
        }
        removed
    }

    /// Names of boreholes with at least one sample
    pub fn borehole_names(&self) -> impl Iterator<Item = &str> {
        self.boreholes.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.boreholes.is_empty()
    }
}

impl LabDataProvider for LabDataTable {
    fn lab_flags(&self, borehole: &str, depth: f64) -> LabFlags {
        match self.sample(borehole, depth) {
            Some(sample) => LabFlags {
                has_gamma_sat: sample.gamma_sat.is_some(),
                has_su: sample.su.is_some(),
                has_phi: sample.phi.is_some(),
            },
            None => LabFlags::default(),
        }
    }

    fn lab_value(&self, borehole: &str, depth: f64, parameter: LabParameter) -> Option<f64> {
        self.sample(borehole, depth)?.slot(parameter)?.parse()
    }
}

// ============================================================================
// Merge
// ============================================================================

/// Lay laboratory values over `results` for `borehole`.
///
/// Every overridable field is reset from the provider on each call, so
/// calling this again after the laboratory data changed applies new values
/// and drops removed ones. The provider is only read.
///
/// Only the reported fields change. A laboratory γsat at a gap-filled depth
/// also drives σv', but that takes a fresh
/// [`calculate_with_lab`](crate::calculations::borehole::calculate_with_lab).
pub fn apply_lab_overrides(results: &mut [LayerResult], borehole: &str, lab: &dyn LabDataProvider) {
    for result in results.iter_mut() {
        let depth = result.depth;

        for parameter in LabParameter::ALL {
            let value = lab.lab_override(borehole, depth, parameter);

            let field = match parameter {
                LabParameter::GammaSat => &mut result.gamma_sat,
                LabParameter::Su => &mut result.su,
                LabParameter::Phi => &mut result.phi,
            };

            let was_lab = field.is_lab();
            field.set_lab(value);
            match (was_lab, field.is_lab()) {
                (false, true) => tracing::trace!(borehole, depth, ?parameter, "Applied laboratory override"),
                (true, false) => tracing::trace!(borehole, depth, ?parameter, "Reverted laboratory override"),
                _ => {}
            }
        }

        result.refresh_consistency();
    }
}
