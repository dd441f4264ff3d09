use crate::calibration::Calibration;
use crate::point::{PhysicalPoint, PixelPoint};

/// Convert a pixel vertex chain to physical units, preserving order.
pub fn extract_points(vertices: &[PixelPoint], calibration: &Calibration) -> Vec<PhysicalPoint> {
    vertices
        .iter()
        .map(|&p| calibration.to_physical(p))
        .collect()
}
