//! Quadratic and cubic Bezier curves.

use serde::{Deserialize, Serialize};
use tube_core::Result;
use tube_math::Point3;

use super::Curve;

/// A quadratic Bezier curve `B(t) = (1-t)^2 p0 + 2(1-t)t p1 + t^2 p2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadraticBezier {
    pub p0: Point3,
    pub p1: Point3,
    pub p2: Point3,
}

impl QuadraticBezier {
    pub fn new(p0: Point3, p1: Point3, p2: Point3) -> Self {
        Self { p0, p1, p2 }
    }

    /// De Casteljau split at `t`; both halves share the split point.
    pub fn split(&self, t: f64) -> (Self, Self) {
        let a = self.p0.lerp(self.p1, t);
        let b = self.p1.lerp(self.p2, t);
        let mid = a.lerp(b, t);
        (Self::new(self.p0, a, mid), Self::new(mid, b, self.p2))
    }
}

impl Curve for QuadraticBezier {
    fn point_at(&self, t: f64) -> Point3 {
        if t <= 0.0 {
            return self.p0;
        }
        if t >= 1.0 {
            return self.p2;
        }
        let mt = 1.0 - t;
        mt * mt * self.p0 + 2.0 * mt * t * self.p1 + t * t * self.p2
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}

/// A cubic Bezier curve with endpoints `p0`, `p3` and controls `p1`, `p2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub p0: Point3,
    pub p1: Point3,
    pub p2: Point3,
    pub p3: Point3,
}

impl CubicBezier {
    pub fn new(p0: Point3, p1: Point3, p2: Point3, p3: Point3) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// De Casteljau split at `t`; both halves share the split point.
    pub fn split(&self, t: f64) -> (Self, Self) {
        let ab = self.p0.lerp(self.p1, t);
        let bc = self.p1.lerp(self.p2, t);
        let cd = self.p2.lerp(self.p3, t);
        let abc = ab.lerp(bc, t);
        let bcd = bc.lerp(cd, t);
        let mid = abc.lerp(bcd, t);
        (
            Self::new(self.p0, ab, abc, mid),
            Self::new(mid, bcd, cd, self.p3),
        )
    }
}

impl Curve for CubicBezier {
    fn point_at(&self, t: f64) -> Point3 {
        if t <= 0.0 {
            return self.p0;
        }
        if t >= 1.0 {
            return self.p3;
        }
        let mt = 1.0 - t;
        mt * mt * mt * self.p0
            + 3.0 * mt * mt * t * self.p1
            + 3.0 * mt * t * t * self.p2
            + t * t * t * self.p3
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}

/// Sample a quadratic Bezier at `segments` uniform parameter steps.
pub fn quadratic_bezier(p0: Point3, p1: Point3, p2: Point3, segments: usize) -> Result<Vec<Point3>> {
    QuadraticBezier::new(p0, p1, p2).sample(segments)
}

/// Sample a cubic Bezier at `segments` uniform parameter steps.
pub fn cubic_bezier(
    p0: Point3,
    p1: Point3,
    p2: Point3,
    p3: Point3,
    segments: usize,
) -> Result<Vec<Point3>> {
    CubicBezier::new(p0, p1, p2, p3).sample(segments)
}

pub fn divide_quadratic_bezier(
    p0: Point3,
    p1: Point3,
    p2: Point3,
    t: f64,
) -> (QuadraticBezier, QuadraticBezier) {
    QuadraticBezier::new(p0, p1, p2).split(t)
}

pub fn divide_cubic_bezier(
    p0: Point3,
    p1: Point3,
    p2: Point3,
    p3: Point3,
    t: f64,
) -> (CubicBezier, CubicBezier) {
    CubicBezier::new(p0, p1, p2, p3).split(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tube_math::DVec3;

    fn arch() -> (Point3, Point3, Point3) {
        (
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 2.0, 0.5),
            DVec3::new(2.0, 0.0, 1.0),
        )
    }

    #[test]
    fn test_quadratic_endpoints_exact() {
        let (p0, p1, p2) = arch();
        for segments in [2, 3, 7, 32] {
            let pts = quadratic_bezier(p0, p1, p2, segments).unwrap();
            assert_eq!(pts.len(), segments);
            assert_eq!(pts[0], p0);
            assert_eq!(*pts.last().unwrap(), p2);
        }
    }

    #[test]
    fn test_cubic_endpoints_exact() {
        let p3 = DVec3::new(3.0, -1.0, 2.0);
        let pts = cubic_bezier(DVec3::ZERO, DVec3::Y, DVec3::X, p3, 11).unwrap();
        assert_eq!(pts[0], DVec3::ZERO);
        assert_eq!(pts[10], p3);
    }

    #[test]
    fn test_quadratic_midpoint() {
        let (p0, p1, p2) = arch();
        let curve = QuadraticBezier::new(p0, p1, p2);
        let mid = curve.point_at(0.5);
        let expected = 0.25 * p0 + 0.5 * p1 + 0.25 * p2;
        assert!((mid - expected).length() < 1e-12);
    }

    #[test]
    fn test_quadratic_split_reproduces_samples() {
        let (p0, p1, p2) = arch();
        let whole = quadratic_bezier(p0, p1, p2, 9).unwrap();
        let (a, b) = divide_quadratic_bezier(p0, p1, p2, 0.5);
        let mut halves = a.sample(5).unwrap();
        halves.extend(b.sample(5).unwrap().into_iter().skip(1));
        assert_eq!(halves.len(), whole.len());
        for (x, y) in halves.iter().zip(&whole) {
            assert!((*x - *y).length() < 1e-10, "{x} != {y}");
        }
    }

    #[test]
    fn test_cubic_split_shares_point() {
        let curve = CubicBezier::new(
            DVec3::ZERO,
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
        );
        let (a, b) = curve.split(0.25);
        assert_eq!(a.p3, b.p0);
        assert!((a.p3 - curve.point_at(0.25)).length() < 1e-12);
    }
}
