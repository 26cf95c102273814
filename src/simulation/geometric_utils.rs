//! Geometric utility functions for distance calculations and spatial operations.

use std::f32::consts::TAU;

use geo::algorithm::Distance;
use geo::{Euclidean, Point};
use ndarray::Array1;

/// Euclidean distance between two 2D positions.
pub fn distance(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    Euclidean.distance(Point::new(a[0], a[1]), Point::new(b[0], b[1]))
}

/// Angle of the vector from `from` to `to`, in radians.
pub fn bearing(from: &Array1<f32>, to: &Array1<f32>) -> f32 {
    (to[1] - from[1]).atan2(to[0] - from[0])
}

/// Normalizes an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid may round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Wraps a position vector around the simulation box boundaries (toroidal topology).
///
/// # Arguments
///
/// * `v` - Mutable position vector to wrap
/// * `box_width` - Width of the simulation box
/// * `box_height` - Height of the simulation box
pub fn wrap_around_mut(v: &mut Array1<f32>, box_width: f32, box_height: f32) {
    v[0] = v[0].rem_euclid(box_width);
    v[1] = v[1].rem_euclid(box_height);
}
