//! JSON session input for the distance analysis.
//!
//! A session is what the host application exports for one image: its title,
//! the calibration and the ROI list.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use vesicle_distance_core::{AnalysisParams, BoundarySelection, Calibration, DistanceAnalyzer, Roi};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::report::DistanceReport;

#[derive(thiserror::Error, Debug)]
pub enum SessionIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Optional overrides on top of [`AnalysisParams::default`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisOverrides {
    #[serde(default)]
    pub boundary_selection: Option<BoundarySelection>,
    #[serde(default)]
    pub max_samples: Option<usize>,
}

fn default_title() -> String {
    "Untitled".to_string()
}

/// One image's worth of ROIs plus calibration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "Calibration::uncalibrated")]
    pub calibration: Calibration,
    pub rois: Vec<Roi>,
    #[serde(default)]
    pub analysis: Option<AnalysisOverrides>,
    #[serde(default)]
    pub output_path: Option<String>,
}

impl Session {
    pub fn new(title: impl Into<String>, calibration: Calibration, rois: Vec<Roi>) -> Self {
        Self {
            title: title.into(),
            calibration,
            rois,
            analysis: None,
            output_path: None,
        }
    }

    /// Load a JSON session from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SessionIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this session to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SessionIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the report path, if the session names one.
    pub fn output_path(&self) -> Option<PathBuf> {
        self.output_path.as_ref().map(PathBuf::from)
    }

    /// Build analysis parameters, applying overrides from the session.
    pub fn build_params(&self) -> AnalysisParams {
        let mut params = AnalysisParams::default();
        if let Some(overrides) = self.analysis.as_ref() {
            if let Some(selection) = overrides.boundary_selection {
                params.boundary_selection = selection;
            }
            if let Some(max_samples) = overrides.max_samples {
                params.resample.max_samples = max_samples;
            }
        }
        params
    }

    /// Run the analysis with explicit parameters.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, params), fields(title = %self.title))
    )]
    pub fn run_with(
        &self,
        params: AnalysisParams,
    ) -> Result<DistanceReport, vesicle_distance_core::Error> {
        let outcome = DistanceAnalyzer::new(params).analyze(&self.rois, &self.calibration)?;
        Ok(DistanceReport::new(
            self.title.clone(),
            self.calibration.clone(),
            outcome,
        ))
    }

    /// Run the analysis with the session's own parameters.
    pub fn run(&self) -> Result<DistanceReport, vesicle_distance_core::Error> {
        self.run_with(self.build_params())
    }
}
