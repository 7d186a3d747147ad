//! 2D rotation helpers for the resize and rotate transitions.

use kurbo::{Point, Vec2};

/// Convert an angle in degrees to radians.
///
/// Exact conversion, no wrap-around: angles beyond ±360° pass through.
pub fn degree_to_radian(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Convert an angle in radians to degrees.
pub fn radian_to_degree(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// Rotate a vector by `degrees` around the origin.
pub fn rotate_vector(v: Vec2, degrees: f64) -> Vec2 {
    let theta = degree_to_radian(degrees);
    let (sin, cos) = theta.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Rotate an absolute point by `degrees` around `center`.
///
/// Callers un-rotate a cursor into a layer's unrotated frame by passing the
/// negated rotation angle.
pub fn rotate_about(p: Point, degrees: f64, center: Point) -> Point {
    center + rotate_vector(p - center, degrees)
}
