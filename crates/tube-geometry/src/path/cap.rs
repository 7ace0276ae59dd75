//! End treatments for open paths: square and rounded caps, radius taper.

use tube_core::{Result, Tolerance, TubeError};
use tube_math::{direction, taper_profile, Vector3};

use super::Path;
use crate::control_point::ControlPoint;

/// Local parameter used to probe the tangent next to the start point.
const START_PROBE: f64 = 0.1;
/// Local parameter used to probe the tangent next to the end point.
const END_PROBE: f64 = 0.9;

#[derive(Debug, Clone, Copy)]
enum CapProfile {
    Square,
    Round { segments: usize },
}

impl Path {
    /// Extend both open ends by `radius` at full profile size.
    pub fn with_square_caps(&self, radius: f64) -> Result<Path> {
        self.with_caps(radius, CapProfile::Square)
    }

    /// Close both open ends with a hemispherical taper of length `radius`.
    ///
    /// `segments` points are added per end; the outermost has radius zero.
    pub fn with_rounded_caps(&self, radius: f64, segments: usize) -> Result<Path> {
        if segments == 0 {
            return Err(TubeError::invalid_parameter(
                "rounded caps need at least one segment",
            ));
        }
        self.with_caps(radius, CapProfile::Round { segments })
    }

    /// Ramp the radius linearly from zero at each open end to full size at the middle.
    pub fn taper(&self) -> Result<Path> {
        if self.closed {
            return Ok(self.clone());
        }
        self.require_segments()?;

        let lengths = self.segment_lengths()?;
        let total: f64 = lengths.iter().sum();
        if Tolerance::default().is_zero_length(total) {
            return Err(TubeError::degenerate("cannot taper a path of zero length"));
        }

        let mut distance = 0.0;
        let mut points = self.points.clone();
        for (i, point) in points.iter_mut().enumerate() {
            if i > 0 {
                distance += lengths[i - 1];
            }
            let s = distance / total;
            point.radius *= 1.0 - (2.0 * s - 1.0).abs();
        }
        Ok(Path::new(points))
    }

    fn with_caps(&self, radius: f64, profile: CapProfile) -> Result<Path> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(TubeError::invalid_parameter(format!("cap radius {radius}")));
        }
        if self.closed {
            return Ok(self.clone());
        }
        self.require_segments()?;

        let n = self.points.len();
        let first = self.points[0];
        let last = self.points[n - 1];

        let [_, near_start, _] = ControlPoint::divide(&first, &self.points[1], START_PROBE);
        let [_, near_end, _] = ControlPoint::divide(&self.points[n - 2], &last, END_PROBE);
        let start_outward = direction(near_start.position, first.position)?;
        let end_outward = direction(near_end.position, last.position)?;

        let start_cap = cap_points(&first, start_outward, radius, profile);
        let end_cap = cap_points(&last, end_outward, radius, profile);

        let lead = start_cap.len();
        let mut points = Vec::with_capacity(n + lead + end_cap.len());
        points.extend(start_cap.into_iter().rev());
        points.extend_from_slice(&self.points);
        points.extend(end_cap);

        // The old ends are interior now; handles pointing off the path would bend the caps.
        points[lead].left_handle = None;
        points[lead + n - 1].right_handle = None;

        Ok(Path::new(points))
    }
}

/// Cap points for one end, ordered moving away from the path.
fn cap_points(
    end: &ControlPoint,
    outward: Vector3,
    radius: f64,
    profile: CapProfile,
) -> Vec<ControlPoint> {
    let base = end.without_handles();
    match profile {
        CapProfile::Square => vec![ControlPoint {
            position: end.position + outward * radius,
            ..base
        }],
        CapProfile::Round { segments } => (1..=segments)
            .map(|k| {
                let t = k as f64 / segments as f64;
                ControlPoint {
                    position: end.position + outward * (radius * t),
                    radius: end.radius * taper_profile(t),
                    ..base
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use tube_math::DVec3;

    fn straight() -> Path {
        Path::from_positions([DVec3::ZERO, DVec3::new(10.0, 0.0, 0.0)])
    }

    #[test]
    fn test_square_caps() {
        let path = straight().with_square_caps(1.5).unwrap();
        let xs: Vec<f64> = path.points.iter().map(|p| p.position.x).collect();
        assert_eq!(xs.len(), 4);
        assert_abs_diff_eq!(xs[0], -1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(xs[3], 11.5, epsilon = 1e-12);
        assert!(path.points.iter().all(|p| p.radius == 1.0));
    }

    #[test]
    fn test_rounded_caps_profile() {
        let path = straight().with_rounded_caps(2.0, 4).unwrap();
        assert_eq!(path.len(), 2 + 8);

        // Outermost points close the tube
        assert_abs_diff_eq!(path.points[0].radius, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(path.points[9].radius, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(path.points[0].position.x, -2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(path.points[9].position.x, 12.0, epsilon = 1e-12);

        // Circular profile: radius^2 + (offset / cap radius)^2 == 1
        for p in &path.points[6..] {
            let t = (p.position.x - 10.0) / 2.0;
            assert_abs_diff_eq!(p.radius * p.radius + t * t, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_caps_follow_curved_end_tangent() {
        let path = Path::new(vec![
            ControlPoint::new(DVec3::ZERO),
            ControlPoint::new(DVec3::new(2.0, 2.0, 0.0))
                .with_left_handle(DVec3::new(2.0, 0.0, 0.0)),
        ]);
        let capped = path.with_square_caps(1.0).unwrap();
        let end = capped.points[capped.len() - 1].position;
        // The curve arrives heading mostly along +Y
        assert!(end.y > 2.8);
        assert!(end.x > 2.0 && end.x < 2.3);
    }

    #[test]
    fn test_caps_strip_outer_handles() {
        let mut path = straight();
        path.points[0].left_handle = Some(DVec3::new(-1.0, 1.0, 0.0));
        let capped = path.with_square_caps(1.0).unwrap();
        assert!(capped.points[1].left_handle.is_none());
        assert!(!capped.has_non_poly());
    }

    #[test]
    fn test_caps_skip_closed_paths() {
        let mut path = Path::from_positions([DVec3::ZERO, DVec3::X, DVec3::Y]);
        path.closed = true;
        assert_eq!(path.with_rounded_caps(1.0, 3).unwrap(), path);
    }

    #[test]
    fn test_caps_reject_bad_parameters() {
        assert!(straight().with_square_caps(0.0).is_err());
        assert!(straight().with_rounded_caps(1.0, 0).is_err());
    }

    #[test]
    fn test_taper() {
        let path = Path::from_positions([
            DVec3::ZERO,
            DVec3::new(2.5, 0.0, 0.0),
            DVec3::new(5.0, 0.0, 0.0),
            DVec3::new(10.0, 0.0, 0.0),
        ])
        .taper()
        .unwrap();
        let radii: Vec<f64> = path.points.iter().map(|p| p.radius).collect();
        for (r, expected) in radii.iter().zip([0.0, 0.5, 1.0, 0.0]) {
            assert_abs_diff_eq!(*r, expected, epsilon = 1e-12);
        }
    }
}
