//! Stateless scalar and point helpers used by the path transforms.

use tube_core::{Result, Tolerance, TubeError};

use crate::{Point3, Vector3};

/// Linear interpolation between two scalars.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Linear interpolation between two points.
pub fn lerp_point(a: Point3, b: Point3, t: f64) -> Point3 {
    a.lerp(b, t)
}

/// Circular taper: the half-chord of a unit circle at distance `t` from its center.
///
/// Used for rounded caps, where `t` runs from 0 at the cap base to 1 at the tip.
pub fn taper_profile(t: f64) -> f64 {
    (1.0 - t * t).max(0.0).sqrt()
}

/// Parameter along a segment of `segment_length` at which a join of `radius` starts.
///
/// The inset distance from the corner is `radius / 2`, clamped to half the segment
/// so neighbouring joins on the same segment never cross.
pub fn bevel_parameter(segment_length: f64, radius: f64) -> Result<f64> {
    if Tolerance::default().is_zero_length(segment_length) {
        return Err(TubeError::degenerate(format!(
            "join on a segment of length {segment_length}"
        )));
    }
    if radius < 0.0 || !radius.is_finite() {
        return Err(TubeError::invalid_parameter(format!("join radius {radius}")));
    }
    let inset = (radius * 0.5).min(segment_length * 0.5);
    Ok((segment_length - inset) / segment_length)
}

/// Unit direction from `from` to `to`.
pub fn direction(from: Point3, to: Point3) -> Result<Vector3> {
    let delta = to - from;
    if Tolerance::default().is_zero_length(delta.length()) {
        return Err(TubeError::degenerate(format!(
            "zero-length direction from {from} to {to}"
        )));
    }
    Ok(delta.normalize())
}
