//! Line segment curve.

use serde::{Deserialize, Serialize};
use tube_math::{lerp_point, Point3};

use super::Curve;

/// A line segment from `start` to `end`, parameterized over `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point3,
    pub end: Point3,
}

impl Line {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// Split at `t` into two lines sharing the split point.
    pub fn split(&self, t: f64) -> (Self, Self) {
        let mid = self.point_at(t);
        (Self::new(self.start, mid), Self::new(mid, self.end))
    }
}

impl Curve for Line {
    fn point_at(&self, t: f64) -> Point3 {
        lerp_point(self.start, self.end, t)
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}
