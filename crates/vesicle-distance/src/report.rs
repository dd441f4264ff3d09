//! Presentation of distance results.

use std::{fs, io::Write, path::Path};

use serde::{Deserialize, Serialize};
use vesicle_distance_core::{AnalysisOutcome, Calibration, DistanceResult};

use crate::io::SessionIoError;

/// Column header of the text report.
pub const TEXT_HEADER: &str = "Roi Coordinates \t Minimum Distance";

/// Per-image distance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceReport {
    pub title: String,
    pub calibration: Calibration,
    pub boundary_index: usize,
    pub boundary_vertices: usize,
    pub boundary_samples: usize,
    pub results: Vec<DistanceResult>,
}

impl DistanceReport {
    pub fn new(title: String, calibration: Calibration, outcome: AnalysisOutcome) -> Self {
        Self {
            title,
            calibration,
            boundary_index: outcome.boundary_index,
            boundary_vertices: outcome.boundary.len(),
            boundary_samples: outcome.path.len(),
            results: outcome.results,
        }
    }

    /// Report as log lines: title, calibration, header, then one
    /// `"<point>\t<distance>"` line per marker.
    pub fn log_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.results.len() + 3);
        lines.push(self.title.clone());
        lines.push(format!("The calibration is {}", self.calibration));
        lines.push(TEXT_HEADER.to_string());
        lines.extend(self.results.iter().map(result_line));
        lines
    }

    pub fn write_text<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        for line in self.log_lines() {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SessionIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SessionIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

fn result_line(r: &DistanceResult) -> String {
    format!("{}\t{:?}", r.point, r.distance)
}
