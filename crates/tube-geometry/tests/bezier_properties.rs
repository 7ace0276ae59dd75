// Property tests for Bezier evaluation and de Casteljau splitting

use proptest::prelude::*;
use tube_geometry::{
    cubic_bezier, divide_cubic_bezier, divide_quadratic_bezier, quadratic_bezier, Curve,
};
use tube_math::DVec3;

fn point() -> impl Strategy<Value = DVec3> {
    (-100.0..100.0f64, -100.0..100.0f64, -100.0..100.0f64).prop_map(|(x, y, z)| DVec3::new(x, y, z))
}

proptest! {
    #[test]
    fn quadratic_samples_hit_endpoints(p0 in point(), p1 in point(), p2 in point(), segments in 2usize..64) {
        let samples = quadratic_bezier(p0, p1, p2, segments).unwrap();
        prop_assert_eq!(samples.len(), segments);
        prop_assert_eq!(samples[0], p0);
        prop_assert_eq!(samples[segments - 1], p2);
    }

    #[test]
    fn cubic_samples_hit_endpoints(p0 in point(), p1 in point(), p2 in point(), p3 in point(), segments in 2usize..64) {
        let samples = cubic_bezier(p0, p1, p2, p3, segments).unwrap();
        prop_assert_eq!(samples[0], p0);
        prop_assert_eq!(samples[segments - 1], p3);
    }

    #[test]
    fn quadratic_split_halves_trace_original(p0 in point(), p1 in point(), p2 in point(), t in 0.0..=1.0f64, s in 0.0..=1.0f64) {
        let (a, b) = divide_quadratic_bezier(p0, p1, p2, t);
        let whole = tube_geometry::QuadraticBezier::new(p0, p1, p2);
        prop_assert!((a.point_at(s) - whole.point_at(s * t)).length() < 1e-9);
        prop_assert!((b.point_at(s) - whole.point_at(t + s * (1.0 - t))).length() < 1e-9);
        prop_assert_eq!(a.p2, b.p0);
    }

    #[test]
    fn cubic_split_halves_trace_original(p0 in point(), p1 in point(), p2 in point(), p3 in point(), t in 0.0..=1.0f64, s in 0.0..=1.0f64) {
        let (a, b) = divide_cubic_bezier(p0, p1, p2, p3, t);
        let whole = tube_geometry::CubicBezier::new(p0, p1, p2, p3);
        prop_assert!((a.point_at(s) - whole.point_at(s * t)).length() < 1e-9);
        prop_assert!((b.point_at(s) - whole.point_at(t + s * (1.0 - t))).length() < 1e-9);
        prop_assert_eq!(a.p3, b.p0);
    }
}

#[test]
fn cubic_split_concatenation_matches_samples() {
    let (p0, p1, p2, p3) = (
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 3.0, 0.0),
        DVec3::new(3.0, -2.0, 1.0),
        DVec3::new(4.0, 0.0, 0.0),
    );
    let whole = cubic_bezier(p0, p1, p2, p3, 17).unwrap();
    let (a, b) = divide_cubic_bezier(p0, p1, p2, p3, 0.25);
    let mut joined = a.sample(5).unwrap();
    joined.extend(b.sample(13).unwrap().into_iter().skip(1));
    assert_eq!(joined.len(), whole.len());
    for (x, y) in joined.iter().zip(&whole) {
        assert!((*x - *y).length() < 1e-10);
    }
}
