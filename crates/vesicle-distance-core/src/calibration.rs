//! Per-axis pixel calibration.

use core::fmt;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::point::{PhysicalPoint, PixelPoint};

fn default_unit() -> String {
    "pixel".to_string()
}

/// Raw calibration record as it appears in session files.
///
/// Converted into a validated [`Calibration`] on deserialisation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalibrationSpec {
    /// Physical units per pixel along x.
    pub pixel_width: f64,
    /// Physical units per pixel along y.
    pub pixel_height: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Pixel x coordinate of the physical origin.
    #[serde(default)]
    pub x_origin: f64,
    /// Pixel y coordinate of the physical origin.
    #[serde(default)]
    pub y_origin: f64,
}

/// Validated pixel-to-physical mapping.
///
/// The two scale factors are always applied independently; an anisotropic
/// calibration is never collapsed into a single scale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CalibrationSpec", into = "CalibrationSpec")]
pub struct Calibration {
    pixel_width: f64,
    pixel_height: f64,
    unit: String,
    x_origin: f64,
    y_origin: f64,
}

impl Calibration {
    /// Build a calibration with per-axis scale factors.
    pub fn new(pixel_width: f64, pixel_height: f64, unit: impl Into<String>) -> Result<Self> {
        check_scale("pixel_width", pixel_width)?;
        check_scale("pixel_height", pixel_height)?;
        Ok(Self {
            pixel_width,
            pixel_height,
            unit: unit.into(),
            x_origin: 0.0,
            y_origin: 0.0,
        })
    }

    /// Same scale factor on both axes.
    pub fn isotropic(units_per_pixel: f64, unit: impl Into<String>) -> Result<Self> {
        Self::new(units_per_pixel, units_per_pixel, unit)
    }

    /// Identity calibration: one unit per pixel, labelled `pixel`.
    pub fn uncalibrated() -> Self {
        Self {
            pixel_width: 1.0,
            pixel_height: 1.0,
            unit: default_unit(),
            x_origin: 0.0,
            y_origin: 0.0,
        }
    }

    /// Move the physical origin to pixel `(x, y)`.
    pub fn with_origin(mut self, x: f64, y: f64) -> Result<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::InvalidCalibration {
                reason: format!("origin must be finite, got ({x}, {y})"),
            });
        }
        self.x_origin = x;
        self.y_origin = y;
        Ok(self)
    }

    #[inline]
    pub fn pixel_width(&self) -> f64 {
        self.pixel_width
    }

    #[inline]
    pub fn pixel_height(&self) -> f64 {
        self.pixel_height
    }

    #[inline]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    #[inline]
    pub fn origin(&self) -> (f64, f64) {
        (self.x_origin, self.y_origin)
    }

    pub fn is_isotropic(&self) -> bool {
        self.pixel_width == self.pixel_height
    }

    /// Convert a pixel coordinate to physical units.
    #[inline]
    pub fn to_physical(&self, p: PixelPoint) -> PhysicalPoint {
        PhysicalPoint::new(
            (p.x - self.x_origin) * self.pixel_width,
            (p.y - self.y_origin) * self.pixel_height,
        )
    }

    /// Scale a displacement per axis. No origin offset is applied.
    #[inline]
    pub fn to_physical_delta(&self, d: Vector2<f64>) -> Vector2<f64> {
        Vector2::new(d.x * self.pixel_width, d.y * self.pixel_height)
    }

    /// Copy with both scale factors multiplied by `k`.
    pub fn scaled(&self, k: f64) -> Result<Self> {
        let mut out = Self::new(self.pixel_width * k, self.pixel_height * k, self.unit.clone())?;
        out.x_origin = self.x_origin;
        out.y_origin = self.y_origin;
        Ok(out)
    }
}

fn check_scale(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidCalibration {
            reason: format!("{name} must be finite and > 0, got {value}"),
        })
    }
}

impl TryFrom<CalibrationSpec> for Calibration {
    type Error = Error;

    fn try_from(spec: CalibrationSpec) -> Result<Self> {
        Calibration::new(spec.pixel_width, spec.pixel_height, spec.unit)?
            .with_origin(spec.x_origin, spec.y_origin)
    }
}

impl From<Calibration> for CalibrationSpec {
    fn from(cal: Calibration) -> Self {
        Self {
            pixel_width: cal.pixel_width,
            pixel_height: cal.pixel_height,
            unit: cal.unit,
            x_origin: cal.x_origin,
            y_origin: cal.y_origin,
        }
    }
}

impl fmt::Display for Calibration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "w={:?}, h={:?}, unit={}",
            self.pixel_width, self.pixel_height, self.unit
        )?;
        if self.x_origin != 0.0 || self.y_origin != 0.0 {
            write!(f, ", xorigin={:?}, yorigin={:?}", self.x_origin, self.y_origin)?;
        }
        Ok(())
    }
}
