//! # Project Data Structures
//!
//! The `Project` struct is the root container for a site investigation.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: CalculationSettings (structure, method, surface, correction)
//! ├── boreholes: Vec<BoreholeInput> (boring logs, in report order)
//! └── lab_data: LabDataTable (laboratory results keyed by borehole and depth)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use geotech_core::calculations::BoreholeInput;
//! use geotech_core::project::Project;
//!
//! let mut project = Project::new("Jane Engineer", "25-042", "ACME Corp");
//! project.add_borehole(
//!     BoreholeInput::new("BH-1", 99.054, -0.70)
//!         .with_layer(1.45, Some(8.0), "CH")
//!         .with_layer(3.45, Some(15.0), "SM"),
//! );
//!
//! let reports = project.calculate_all();
//! assert_eq!(reports.len(), 1);
//! assert_eq!(reports[0].as_ref().unwrap().layers.len(), 2);
//! ```

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::calculations::BoreholeInput;
use crate::errors::CalcResult;
use crate::lab::LabDataTable;
use crate::report::BoreholeReport;
use crate::settings::CalculationSettings;

/// Current schema version for project documents
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    #[serde(default)]
    pub meta: ProjectMetadata,

    /// Settings shared by every borehole
    #[serde(default)]
    pub settings: CalculationSettings,

    /// Boring logs; names are unique
    #[serde(default)]
    pub boreholes: Vec<BoreholeInput>,

    /// Laboratory results
    #[serde(default)]
    pub lab_data: LabDataTable,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Arguments
    ///
    /// * `engineer` - Name of the responsible engineer
    /// * `job_id` - Job/project number (e.g., "25-001")
    /// * `client` - Client name
    ///
    /// # Example
    ///
    /// ```rust
    /// use geotech_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// assert!(project.boreholes.is_empty());
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: CalculationSettings::default(),
            boreholes: Vec::new(),
            lab_data: LabDataTable::new(),
        }
    }

    /// Parse a project from its JSON form.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Add a borehole, replacing any existing one with the same name.
    ///
    /// Returns the replaced borehole if there was one.
    pub fn add_borehole(&mut self, borehole: BoreholeInput) -> Option<BoreholeInput> {
        self.touch();
        match self.boreholes.iter_mut().find(|b| b.name == borehole.name) {
            Some(existing) => Some(std::mem::replace(existing, borehole)),
            None => {
                self.boreholes.push(borehole);
                None
            }
        }
    }

    /// Remove a borehole by name.
    pub fn remove_borehole(&mut self, name: &str) -> Option<BoreholeInput> {
        let index = self.boreholes.iter().position(|b| b.name == name)?;
        self.touch();
        Some(self.boreholes.remove(index))
    }

    pub fn borehole(&self, name: &str) -> Option<&BoreholeInput> {
        self.boreholes.iter().find(|b| b.name == name)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Calculate every borehole in parallel.
    ///
    /// Boreholes are independent; one failing does not affect the others.
    /// Reports come back in the same order as [`boreholes`](Self::boreholes).
    pub fn calculate_all(&self) -> Vec<CalcResult<BoreholeReport>> {
        tracing::info!(boreholes = self.boreholes.len(), "Calculating project");
        self.boreholes
            .par_iter()
            .map(|borehole| BoreholeReport::generate(borehole, &self.settings, &self.lab_data))
            .collect()
    }

    /// Calculate a single borehole by name.
    pub fn calculate_borehole(&self, name: &str) -> Option<CalcResult<BoreholeReport>> {
        self.borehole(name)
            .map(|borehole| BoreholeReport::generate(borehole, &self.settings, &self.lab_data))
    }

    /// Re-merge the current laboratory data into existing reports.
    ///
    /// Only reported fields change; σv' is not recomputed.
    pub fn refresh_lab_overrides(&self, reports: &mut [BoreholeReport]) {
        reports
            .par_iter_mut()
            .for_each(|report| report.refresh_lab_overrides(&self.lab_data));
    }

    pub fn borehole_count(&self) -> usize {
        self.boreholes.len()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the document header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    #[serde(default)]
    pub engineer: String,

    /// Job/project number
    #[serde(default)]
    pub job_id: String,

    /// Client name
    #[serde(default)]
    pub client: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        let now = Utc::now();
        ProjectMetadata {
            version: SCHEMA_VERSION.to_string(),
            engineer: String::new(),
            job_id: String::new(),
            client: String::new(),
            created: now,
            modified: now,
        }
    }
}
