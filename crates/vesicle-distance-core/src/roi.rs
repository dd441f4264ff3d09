//! Region-of-interest inputs supplied by the host application.

use serde::{Deserialize, Serialize};

use crate::point::PixelPoint;

/// ROI classification, fixed when the ROI is ingested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiKind {
    /// Open polyline (straight, segmented or freehand line). Boundary candidate.
    Line,
    /// Point selection. Each one is a vesicle marker.
    Point,
    /// Closed area. Ignored by the distance analysis.
    Area,
}

/// One ROI: a kind plus its vertex chain in pixel coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Roi {
    #[serde(default)]
    pub name: Option<String>,
    pub kind: RoiKind,
    pub vertices: Vec<PixelPoint>,
}

impl Roi {
    pub fn new(kind: RoiKind, vertices: Vec<PixelPoint>) -> Self {
        Self {
            name: None,
            kind,
            vertices,
        }
    }

    pub fn line(vertices: impl IntoIterator<Item = [f64; 2]>) -> Self {
        Self::new(RoiKind::Line, vertices.into_iter().map(Into::into).collect())
    }

    pub fn point(x: f64, y: f64) -> Self {
        Self::new(RoiKind::Point, vec![PixelPoint::new(x, y)])
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Query vertex of a marker: the first one, if any.
    #[inline]
    pub fn anchor(&self) -> Option<PixelPoint> {
        self.vertices.first().copied()
    }
}
