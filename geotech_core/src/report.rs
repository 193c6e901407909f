//! # Borehole Reports
//!
//! A [`BoreholeReport`] wraps one borehole's layer results with the context
//! a renderer needs: which settings produced them, where the water table
//! sits, and when the run happened.
//!
//! ```rust
//! use geotech_core::calculations::BoreholeInput;
//! use geotech_core::lab::NoLabData;
//! use geotech_core::report::BoreholeReport;
//! use geotech_core::settings::CalculationSettings;
//!
//! let input = BoreholeInput::new("BH-1", 100.0, -2.0).with_layer(2.0, Some(15.0), "CL");
//! let report = BoreholeReport::generate(&input, &CalculationSettings::default(), &NoLabData).unwrap();
//! assert_eq!(report.borehole, "BH-1");
//! assert!((report.water_level_elevation - 98.0).abs() < 1e-9);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::borehole::{self, BoreholeInput, LayerResult};
use crate::errors::CalcResult;
use crate::lab::{apply_lab_overrides, LabDataProvider};
use crate::settings::CalculationSettings;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoreholeReport {
    /// Unique id of this calculation run
    pub run_id: Uuid,

    /// Borehole name
    pub borehole: String,

    pub calculated_at: DateTime<Utc>,

    /// Settings the layers were computed with
    pub settings: CalculationSettings,

    /// Water table elevation (m, project datum)
    pub water_level_elevation: f64,

    pub layers: Vec<LayerResult>,
}

impl BoreholeReport {
    /// Run the pipeline for `input` and merge laboratory data.
    pub fn generate(
        input: &BoreholeInput,
        settings: &CalculationSettings,
        lab: &dyn LabDataProvider,
    ) -> CalcResult<Self> {
        let layers = borehole::calculate_with_lab(input, settings, lab)?;
        Ok(BoreholeReport {
            run_id: Uuid::new_v4(),
            borehole: input.name.clone(),
            calculated_at: Utc::now(),
            settings: *settings,
            water_level_elevation: input.config.water_level_elevation(),
            layers,
        })
    }

    /// Re-merge laboratory data into the existing layers.
    pub fn refresh_lab_overrides(&mut self, lab: &dyn LabDataProvider) {
        apply_lab_overrides(&mut self.layers, &self.borehole, lab);
    }

    /// Number of layers produced by the gap fill
    pub fn gap_fill_count(&self) -> usize {
        self.layers.iter().filter(|l| l.is_gap_fill()).count()
    }

    /// Layer at `depth`, if one was emitted there
    pub fn layer_at(&self, depth: f64) -> Option<&LayerResult> {
        self.layers
            .iter()
            .find(|l| (l.depth - depth).abs() < crate::lab::DEPTH_TOLERANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lab::{LabDataTable, LabParameter, NoLabData};

    fn input() -> BoreholeInput {
        BoreholeInput::new("BH-1", 100.0, -2.0)
            .with_layer(2.0, Some(15.0), "CL")
            .with_layer(3.0, None, "")
            .with_layer(4.0, Some(15.0), "SM")
    }

    #[test]
    fn test_generate() {
        let report = BoreholeReport::generate(&input(), &CalculationSettings::default(), &NoLabData).unwrap();
        assert_eq!(report.layers.len(), 3);
        assert_eq!(report.gap_fill_count(), 1);
        assert!(report.layer_at(3.0).unwrap().is_gap_fill());
        assert!(report.layer_at(3.5).is_none());
    }

    #[test]
    fn test_run_ids_unique() {
        let a = BoreholeReport::generate(&input(), &CalculationSettings::default(), &NoLabData).unwrap();
        let b = BoreholeReport::generate(&input(), &CalculationSettings::default(), &NoLabData).unwrap();
        assert_ne!(a.run_id, b.run_id);
        assert_eq!(a.layers, b.layers);
    }

    #[test]
    fn test_refresh_lab_overrides() {
        let mut report = BoreholeReport::generate(&input(), &CalculationSettings::default(), &NoLabData).unwrap();
        let mut lab = LabDataTable::new();
        lab.insert("BH-1", 2.0, LabParameter::Su, "45");

        report.refresh_lab_overrides(&lab);
        assert_eq!(report.layer_at(2.0).unwrap().su.value(), Some(45.0));

        lab.remove("BH-1", 2.0, LabParameter::Su);
        report.refresh_lab_overrides(&lab);
        assert!(!report.layer_at(2.0).unwrap().su.is_lab());
    }

    #[test]
    fn test_serialization() {
        let report = BoreholeReport::generate(&input(), &CalculationSettings::default(), &NoLabData).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let roundtrip: BoreholeReport = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.run_id, report.run_id);
        assert_eq!(roundtrip.calculated_at, report.calculated_at);
        assert_eq!(roundtrip.layers.len(), 3);
        assert_eq!(roundtrip.layers[1].soil_type, report.layers[1].soil_type);
    }
}
