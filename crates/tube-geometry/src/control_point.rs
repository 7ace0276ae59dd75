//! Path vertices and the curve segment implied by two adjacent vertices.

use serde::{Deserialize, Serialize};
use tube_core::{Result, Tolerance, TubeError};
use tube_math::{lerp, Point3};

use crate::curve::{cumulative_lengths, polyline_length, Segment};

/// Samples used when measuring the arc length of a curved segment.
pub const LENGTH_SAMPLES: usize = 32;

fn default_radius() -> f64 {
    1.0
}

/// A path vertex with optional Bezier handles, a profile radius and a roll angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub position: Point3,
    /// Handle shaping the segment that ends at this point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_handle: Option<Point3>,
    /// Handle shaping the segment that starts at this point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_handle: Option<Point3>,
    /// Uniform scale applied to the cross-section at this point.
    #[serde(default = "default_radius")]
    pub radius: f64,
    /// Roll of the cross-section about the path tangent, in radians.
    #[serde(default)]
    pub tilt: f64,
}

impl ControlPoint {
    pub fn new(position: Point3) -> Self {
        Self {
            position,
            left_handle: None,
            right_handle: None,
            radius: default_radius(),
            tilt: 0.0,
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_tilt(mut self, tilt: f64) -> Self {
        self.tilt = tilt;
        self
    }

    pub fn with_left_handle(mut self, handle: Point3) -> Self {
        self.left_handle = Some(handle);
        self
    }

    pub fn with_right_handle(mut self, handle: Point3) -> Self {
        self.right_handle = Some(handle);
        self
    }

    pub fn without_handles(mut self) -> Self {
        self.left_handle = None;
        self.right_handle = None;
        self
    }

    pub fn has_handles(&self) -> bool {
        self.left_handle.is_some() || self.right_handle.is_some()
    }

    /// The curve running from `start` to `end`.
    pub fn segment(start: &ControlPoint, end: &ControlPoint) -> Segment {
        Segment::from_handles(
            start.position,
            start.right_handle,
            end.left_handle,
            end.position,
        )
    }

    /// Split the segment `start -> end` at `t`, returning `[start', mid, end']`.
    ///
    /// `start'` and `end'` keep their outer handles; their inner handles and the
    /// handles of `mid` come from the de Casteljau split. Radius and tilt of `mid`
    /// are interpolated linearly by `t`.
    pub fn divide(start: &ControlPoint, end: &ControlPoint, t: f64) -> [ControlPoint; 3] {
        let mut first = *start;
        let mut last = *end;
        let mut mid = ControlPoint {
            position: start.position,
            left_handle: None,
            right_handle: None,
            radius: lerp(start.radius, end.radius, t),
            tilt: lerp(start.tilt, end.tilt, t),
        };

        match Self::segment(start, end) {
            Segment::Line(line) => {
                mid.position = line.split(t).0.end;
            }
            Segment::Quadratic(curve) => {
                let (a, b) = curve.split(t);
                mid.position = a.p2;
                if start.right_handle.is_some() {
                    first.right_handle = Some(a.p1);
                    mid.right_handle = Some(b.p1);
                } else {
                    mid.left_handle = Some(a.p1);
                    last.left_handle = Some(b.p1);
                }
            }
            Segment::Cubic(curve) => {
                let (a, b) = curve.split(t);
                first.right_handle = Some(a.p1);
                mid.left_handle = Some(a.p2);
                mid.position = a.p3;
                mid.right_handle = Some(b.p1);
                last.left_handle = Some(b.p2);
            }
        }

        [first, mid, last]
    }

    /// Approximate arc length of the segment `start -> end`.
    pub fn length(start: &ControlPoint, end: &ControlPoint) -> Result<f64> {
        let points = Self::segment(start, end).sample(LENGTH_SAMPLES)?;
        Ok(polyline_length(&points))
    }

    /// Positions along the segment; a line yields only its endpoints.
    pub fn to_vectors(
        start: &ControlPoint,
        end: &ControlPoint,
        segments: usize,
    ) -> Result<Vec<Point3>> {
        Self::segment(start, end).sample(segments)
    }

    /// Flatten the segment into handle-free points.
    ///
    /// Radius and tilt follow the chord-length fraction of each sample rather than
    /// its curve parameter, so they stay even along the arc.
    pub fn to_poly(
        start: &ControlPoint,
        end: &ControlPoint,
        segments: usize,
    ) -> Result<Vec<ControlPoint>> {
        let segment = Self::segment(start, end);
        if segment.is_line() {
            return Ok(vec![start.without_handles(), end.without_handles()]);
        }

        let positions = segment.sample(segments)?;
        let distances = cumulative_lengths(&positions);
        let total = distances.last().copied().unwrap_or(0.0);
        if Tolerance::default().is_zero_length(total) {
            return Err(TubeError::degenerate(format!(
                "curved segment from {} to {} has zero length",
                start.position, end.position
            )));
        }

        Ok(positions
            .into_iter()
            .zip(distances)
            .map(|(position, distance)| {
                let s = distance / total;
                ControlPoint {
                    position,
                    left_handle: None,
                    right_handle: None,
                    radius: lerp(start.radius, end.radius, s),
                    tilt: lerp(start.tilt, end.tilt, s),
                }
            })
            .collect())
    }
}

impl Default for ControlPoint {
    fn default() -> Self {
        Self::new(Point3::ZERO)
    }
}

impl From<Point3> for ControlPoint {
    fn from(position: Point3) -> Self {
        Self::new(position)
    }
}
