//! Curve trait, Bezier evaluation and splitting, and control-point segments.

mod bezier;
mod line;

use tube_core::{Result, TubeError};
use tube_math::Point3;

pub use bezier::{
    cubic_bezier, divide_cubic_bezier, divide_quadratic_bezier, quadratic_bezier, CubicBezier,
    QuadraticBezier,
};
pub use line::Line;

/// Trait for parametric curves in 3D space.
pub trait Curve: Send + Sync {
    /// Evaluate the curve at parameter `t`.
    fn point_at(&self, t: f64) -> Point3;

    /// Return the parameter domain `(t_min, t_max)`.
    fn domain(&self) -> (f64, f64);

    /// Sample `segments` points at uniform parameter steps across the domain.
    ///
    /// The first and last samples are the curve's endpoints.
    fn sample(&self, segments: usize) -> Result<Vec<Point3>> {
        if segments < 2 {
            return Err(TubeError::invalid_parameter(format!(
                "curve sampling needs at least 2 samples, got {segments}"
            )));
        }
        let (t_min, t_max) = self.domain();
        let step = (t_max - t_min) / (segments - 1) as f64;
        let mut points: Vec<Point3> = (0..segments - 1)
            .map(|i| self.point_at(t_min + step * i as f64))
            .collect();
        points.push(self.point_at(t_max));
        Ok(points)
    }
}

/// The curve joining two adjacent control points.
///
/// The kind is inferred from handle presence on the start's right and the end's
/// left: neither is a line, one is a quadratic, both is a cubic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line(Line),
    Quadratic(QuadraticBezier),
    Cubic(CubicBezier),
}

impl Segment {
    pub fn from_handles(
        start: Point3,
        start_handle: Option<Point3>,
        end_handle: Option<Point3>,
        end: Point3,
    ) -> Self {
        match (start_handle, end_handle) {
            (None, None) => Segment::Line(Line::new(start, end)),
            (Some(control), None) | (None, Some(control)) => {
                Segment::Quadratic(QuadraticBezier::new(start, control, end))
            }
            (Some(c0), Some(c1)) => Segment::Cubic(CubicBezier::new(start, c0, c1, end)),
        }
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Segment::Line(_))
    }

    pub fn as_curve(&self) -> &dyn Curve {
        match self {
            Segment::Line(line) => line,
            Segment::Quadratic(curve) => curve,
            Segment::Cubic(curve) => curve,
        }
    }

    /// Sample positions along the segment. A line yields only its two endpoints.
    pub fn sample(&self, segments: usize) -> Result<Vec<Point3>> {
        match self {
            Segment::Line(line) => Ok(vec![line.start, line.end]),
            _ => self.as_curve().sample(segments),
        }
    }
}

/// Total length of a polyline.
pub fn polyline_length(points: &[Point3]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Running length at each polyline vertex, starting at 0.
pub fn cumulative_lengths(points: &[Point3]) -> Vec<f64> {
    let mut total = 0.0;
    let mut lengths = Vec::with_capacity(points.len());
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            total += points[i - 1].distance(*p);
        }
        lengths.push(total);
    }
    lengths
}
