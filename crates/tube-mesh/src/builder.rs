//! Batch transforms over many paths sharing one cross-section.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;
use tube_core::{Result, TubeError};
use tube_geometry::{Path, Shape};

use crate::options::ExtrudeOptions;
use crate::tube::Tube;

/// A set of paths and the shape to sweep along all of them.
///
/// Every transform returns a new builder; the receiver is left untouched.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    paths: Vec<Path>,
    shape: Option<Arc<Shape>>,
}

impl Builder {
    pub fn new(paths: Vec<Path>) -> Self {
        Self { paths, shape: None }
    }

    pub fn from_path(path: Path) -> Self {
        Self::new(vec![path])
    }

    #[must_use]
    pub fn with_shape(mut self, shape: impl Into<Arc<Shape>>) -> Self {
        self.shape = Some(shape.into());
        self
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn shape(&self) -> Option<&Shape> {
        self.shape.as_deref()
    }

    /// An independent builder with the same paths, sharing the shape.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    fn map_paths(&self, f: impl Fn(&Path) -> Result<Path>) -> Result<Self> {
        let paths = self.paths.iter().map(f).collect::<Result<Vec<_>>>()?;
        Ok(Self {
            paths,
            shape: self.shape.clone(),
        })
    }

    pub fn bevel_join(&self, radius: f64) -> Result<Self> {
        self.map_paths(|p| p.bevel_join(radius))
    }

    pub fn round_join(&self, radius: f64) -> Result<Self> {
        self.map_paths(|p| p.round_join(radius))
    }

    pub fn miter_join(&self, radius: f64) -> Result<Self> {
        self.map_paths(|p| p.miter_join(radius))
    }

    pub fn with_rounded_caps(&self, radius: f64, segments: usize) -> Result<Self> {
        self.map_paths(|p| p.with_rounded_caps(radius, segments))
    }

    pub fn with_square_caps(&self, radius: f64) -> Result<Self> {
        self.map_paths(|p| p.with_square_caps(radius))
    }

    pub fn taper(&self) -> Result<Self> {
        self.map_paths(Path::taper)
    }

    pub fn to_poly(&self, segments_per_curve: usize) -> Result<Self> {
        self.map_paths(|p| p.to_poly(segments_per_curve))
    }

    pub fn evenly_distributed(&self, step: f64) -> Result<Self> {
        self.map_paths(|p| p.evenly_distributed(step))
    }

    /// Dash every path; each input path may become zero or more paths.
    pub fn dash(&self, dash_length: f64, gap_length: f64, offset: f64) -> Result<Self> {
        let mut paths = Vec::new();
        for path in &self.paths {
            paths.extend(path.dash(dash_length, gap_length, offset)?);
        }
        debug!(input = self.paths.len(), output = paths.len(), "Dashed builder paths");
        Ok(Self {
            paths,
            shape: self.shape.clone(),
        })
    }

    /// Extrude every path against the shared shape and join the results in path order.
    pub fn apply(&self, options: &ExtrudeOptions) -> Result<Tube> {
        let shape = self
            .shape
            .as_deref()
            .ok_or_else(|| TubeError::InvalidOperation("builder has no shape".into()))?;

        let tubes = self
            .paths
            .par_iter()
            .map(|path| Tube::extrude(path, shape, options))
            .collect::<Result<Vec<_>>>()?;
        let tube = Tube::from_tubes(tubes);

        debug!(
            paths = self.paths.len(),
            vertices = tube.vertex_count(),
            triangles = tube.triangle_count(),
            "Applied builder"
        );
        Ok(tube)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tube_math::DVec3;

    fn elbow(offset: f64) -> Path {
        Path::from_positions([
            DVec3::new(0.0, 0.0, offset),
            DVec3::new(4.0, 0.0, offset),
            DVec3::new(4.0, 4.0, offset),
        ])
    }

    #[test]
    fn test_transforms_keep_path_count() {
        let builder = Builder::new(vec![elbow(0.0), elbow(1.0)]);
        let joined = builder.bevel_join(1.0).unwrap();
        assert_eq!(joined.paths().len(), 2);
        assert_eq!(joined.paths()[0].len(), 4);
        // The source is unchanged
        assert_eq!(builder.paths()[0].len(), 3);
    }

    #[test]
    fn test_dash_flat_maps() {
        let builder = Builder::new(vec![
            Path::from_positions([DVec3::ZERO, DVec3::new(9.0, 0.0, 0.0)]),
            Path::from_positions([DVec3::ZERO, DVec3::new(4.0, 0.0, 0.0)]),
        ]);
        let dashed = builder.dash(2.0, 1.0, 0.0).unwrap();
        assert_eq!(dashed.paths().len(), 3 + 2);
    }

    #[test]
    fn test_apply_requires_shape() {
        let builder = Builder::from_path(elbow(0.0));
        assert!(matches!(
            builder.apply(&ExtrudeOptions::default()),
            Err(TubeError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_apply_joins_in_order() {
        let shape = Shape::circle(0.5, 6).unwrap();
        let builder = Builder::new(vec![elbow(0.0), elbow(10.0)]).with_shape(shape);
        let tube = builder.apply(&ExtrudeOptions::default()).unwrap();
        assert_eq!(tube.vertex_count(), 2 * 3 * 6);
        assert_eq!(tube.triangle_count(), 2 * 2 * 6 * 2);
        assert_eq!(tube.positions[18].z, 10.0);
        assert!(tube.positions[..18].iter().all(|p| p.z.abs() <= 0.5 + 1e-12));
    }

    #[test]
    fn test_copy_shares_shape() {
        let builder = Builder::from_path(elbow(0.0)).with_shape(Shape::circle(1.0, 4).unwrap());
        let copy = builder.copy();
        assert_eq!(copy.paths(), builder.paths());
        assert!(std::ptr::eq(
            copy.shape().unwrap(),
            builder.shape().unwrap()
        ));
    }
}
