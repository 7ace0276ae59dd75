use tube_core::{Result, TubeError};

use crate::{DAffine3, DMat3, Point3, Vector3};

/// Squared cross-product length below which the up axis counts as parallel to the tangent.
const PARALLEL_EPSILON: f64 = 1e-12;

/// Affine placement of a cross-section: rotation, roll, uniform scale, then translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub affine: DAffine3,
}

impl Transform {
    /// Place a cross-section ring at `position` facing along `tangent`.
    ///
    /// The local XY plane of the profile becomes the plane orthogonal to the tangent,
    /// following a look-at frame built from `up`: local X maps to `tangent x up`,
    /// local Y to the resulting orthogonal up, local -Z to the tangent. When `up` is
    /// parallel to the tangent the frame falls back to +Z, then +X. The frame is then
    /// rolled by `tilt` radians about the tangent and scaled uniformly by `scale`.
    pub fn ring(
        position: Point3,
        tangent: Vector3,
        up: Vector3,
        tilt: f64,
        scale: f64,
    ) -> Result<Self> {
        let forward = tangent
            .try_normalize()
            .ok_or_else(|| TubeError::degenerate("ring tangent has zero length"))?;
        let side = [up, Vector3::Z, Vector3::X]
            .into_iter()
            .map(|axis| forward.cross(axis))
            .find(|side| side.length_squared() > PARALLEL_EPSILON)
            .map(|side| side.normalize())
            .ok_or_else(|| TubeError::degenerate("no up axis orthogonal to the ring tangent"))?;
        let local_up = side.cross(forward);

        let orientation = DMat3::from_cols(side, local_up, -forward);
        let roll = DMat3::from_axis_angle(forward, tilt);
        let linear = roll * orientation * DMat3::from_diagonal(Vector3::splat(scale));

        Ok(Self {
            affine: DAffine3::from_mat3_translation(linear, position),
        })
    }

    pub fn transform_point(&self, p: Point3) -> Point3 {
        self.affine.transform_point3(p)
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec3;
    use std::f64::consts::FRAC_PI_2;

    /// Image of the profile axis `v` relative to the ring center.
    fn axis(t: &Transform, v: Vector3) -> Vector3 {
        t.transform_point(v) - t.transform_point(Point3::ZERO)
    }

    #[test]
    fn test_ring_centered_on_position() {
        let position = dvec3(1.0, 2.0, 3.0);
        let t = Transform::ring(position, Vector3::Z, Vector3::Y, 0.3, 4.0).unwrap();
        assert!((t.transform_point(Point3::ZERO) - position).length() < 1e-10);
    }

    #[test]
    fn test_ring_faces_tangent() {
        let t = Transform::ring(dvec3(5.0, 0.0, 0.0), Vector3::X, Vector3::Y, 0.0, 1.0).unwrap();
        // Profile plane normal (local Z) points against the tangent
        assert!((axis(&t, Vector3::Z) + Vector3::X).length() < 1e-10);
        // Profile Y stays world up, profile X becomes +Z
        assert!((axis(&t, Vector3::Y) - Vector3::Y).length() < 1e-10);
        assert!((t.transform_point(Vector3::X) - dvec3(5.0, 0.0, 1.0)).length() < 1e-10);
    }

    #[test]
    fn test_ring_scale_and_tilt() {
        let t = Transform::ring(Point3::ZERO, Vector3::X, Vector3::Y, FRAC_PI_2, 2.0).unwrap();
        let p = t.transform_point(Vector3::Y);
        assert!((p.length() - 2.0).abs() < 1e-10);
        // A quarter roll moves profile up off the world Y axis
        assert!(p.y.abs() < 1e-10);
        assert!(p.x.abs() < 1e-10);
    }

    #[test]
    fn test_ring_tangent_parallel_to_up() {
        let t = Transform::ring(Point3::ZERO, Vector3::Y, Vector3::Y, 0.0, 1.0).unwrap();
        assert!((axis(&t, Vector3::Z) + Vector3::Y).length() < 1e-10);
    }

    #[test]
    fn test_ring_zero_tangent() {
        let result = Transform::ring(Point3::ZERO, Vector3::ZERO, Vector3::Y, 0.0, 1.0);
        assert!(matches!(result, Err(TubeError::DegenerateGeometry(_))));
    }
}
