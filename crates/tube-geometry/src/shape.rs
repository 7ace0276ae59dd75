//! Cross-section profiles swept along a path.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use tube_core::{Result, TubeError, Validate};
use tube_math::Vector3;

/// An ordered cross-section polygon in its local XY plane.
///
/// Offsets are unscaled; the extruder scales them by each path point's radius.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Shape {
    pub points: Vec<Vector3>,
    #[serde(default)]
    pub closed: bool,
}

impl Shape {
    pub fn new(points: Vec<Vector3>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// A closed circle of `segments` points.
    ///
    /// Point `k` sits at angle `2*pi*k / segments`, measured clockwise from +Y, so the
    /// seam is not duplicated: `circle(1.0, 4)` yields (0,1), (1,0), (0,-1), (-1,0).
    pub fn circle(radius: f64, segments: usize) -> Result<Shape> {
        if segments < 3 {
            return Err(TubeError::invalid_parameter(format!(
                "circle needs at least 3 segments, got {segments}"
            )));
        }
        let points = (0..segments)
            .map(|k| {
                let angle = TAU * k as f64 / segments as f64;
                Vector3::new(radius * angle.sin(), radius * angle.cos(), 0.0)
            })
            .collect();
        Ok(Shape::new(points, true))
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Index pairs of consecutive profile vertices, plus the wrap-around pair when closed.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> {
        let n = self.points.len();
        let open_edges = n.saturating_sub(1);
        let wrap = usize::from(self.closed && n > 2);
        (0..open_edges + wrap).map(move |i| (i, (i + 1) % n))
    }
}

impl Validate for Shape {
    fn validate(&self) -> Result<()> {
        if self.points.len() < 2 {
            return Err(TubeError::TooFewPoints {
                min: 2,
                actual: self.points.len(),
            });
        }
        if let Some(i) = self.points.iter().position(|p| !p.is_finite()) {
            return Err(TubeError::Validation(format!(
                "profile point {i} has a non-finite coordinate"
            )));
        }
        Ok(())
    }
}
