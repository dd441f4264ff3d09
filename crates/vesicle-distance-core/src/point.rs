//! Coordinate-space tagged points.
//!
//! `PixelPoint` lives in raw image coordinates, `PhysicalPoint` in calibrated
//! units. The only conversion is [`Calibration::to_physical`](crate::Calibration::to_physical).

use core::fmt;

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// A vertex in raw pixel coordinates, as handed over by the host.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for PixelPoint {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// A point in physical (calibrated) units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct PhysicalPoint(Point2<f64>);

impl PhysicalPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self(Point2::new(x, y))
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    /// Displacement from `origin` to `self`.
    #[inline]
    pub fn offset_from(&self, origin: &PhysicalPoint) -> Vector2<f64> {
        self.0 - origin.0
    }

    /// Translate by a physical displacement.
    #[inline]
    pub fn translated(&self, delta: &Vector2<f64>) -> PhysicalPoint {
        PhysicalPoint(self.0 + *delta)
    }

    /// Euclidean distance in calibration units.
    #[inline]
    pub fn distance(&self, other: &PhysicalPoint) -> f64 {
        nalgebra::distance(&self.0, &other.0)
    }
}

impl From<[f64; 2]> for PhysicalPoint {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<PhysicalPoint> for [f64; 2] {
    fn from(p: PhysicalPoint) -> Self {
        [p.x(), p.y()]
    }
}

impl fmt::Display for PhysicalPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.x(), self.y())
    }
}
