//! Sweeping a cross-section along a path.
//!
//! Each path point becomes one ring of `shape.vertex_count()` vertices, placed by
//! [`Transform::ring`]. Consecutive rings are bridged with two triangles per shape
//! edge, wound so face normals point away from the path.

use tracing::{debug, trace};
use tube_core::{Result, Tolerance, TubeError, Validate};
use tube_geometry::curve::cumulative_lengths;
use tube_geometry::{Path, Shape};
use tube_math::{direction, Point2, Point3, Transform, Vector3};

use crate::options::{CapFill, ExtrudeOptions};
use crate::tube::Tube;

/// Ring vertices and bridge triangles accumulated while walking the path.
struct Sweep {
    positions: Vec<Point3>,
    indices: Vec<u32>,
}

impl Sweep {
    fn with_capacity(rings: usize, ring_size: usize, edges: usize) -> Self {
        Self {
            positions: Vec::with_capacity(rings * ring_size + 2),
            indices: Vec::with_capacity(rings * edges * 6),
        }
    }

    /// Append a ring and return the index of its first vertex.
    fn push_ring(&mut self, ring: impl IntoIterator<Item = Point3>) -> u32 {
        let base = self.positions.len() as u32;
        self.positions.extend(ring);
        base
    }
}

fn bridge(indices: &mut Vec<u32>, a: u32, b: u32, edges: &[(usize, usize)]) {
    for &(j, k) in edges {
        let (a1, a2) = (a + j as u32, a + k as u32);
        let (b1, b2) = (b + j as u32, b + k as u32);
        indices.extend([b1, a1, a2, a2, b2, b1]);
    }
}

/// Per-vertex tangents: the normalized sum of the unit incoming and outgoing directions.
fn vertex_tangents(positions: &[Point3], closed: bool) -> Result<Vec<Vector3>> {
    let n = positions.len();
    (0..n)
        .map(|i| {
            let incoming = if closed || i > 0 {
                Some(direction(positions[(i + n - 1) % n], positions[i])?)
            } else {
                None
            };
            let outgoing = if closed || i + 1 < n {
                Some(direction(positions[i], positions[(i + 1) % n])?)
            } else {
                None
            };
            match (incoming, outgoing) {
                (Some(a), Some(b)) => (a + b).try_normalize().ok_or_else(|| {
                    TubeError::degenerate(format!("path reverses on itself at point {i}"))
                }),
                (Some(d), None) | (None, Some(d)) => Ok(d),
                (None, None) => Err(TubeError::TooFewPoints { min: 2, actual: n }),
            }
        })
        .collect()
}

impl Tube {
    /// Sweep `shape` along `path`.
    ///
    /// A path that still has handles is flattened first with
    /// `options.segments_per_curve` samples per curved segment.
    pub fn extrude(path: &Path, shape: &Shape, options: &ExtrudeOptions) -> Result<Tube> {
        path.validate()?;
        shape.validate()?;

        let flattened;
        let path = if path.has_non_poly() {
            flattened = path.to_poly(options.segments_per_curve)?;
            &flattened
        } else {
            path
        };

        let positions = path.positions();
        let tangents = vertex_tangents(&positions, path.closed)?;
        let edges: Vec<(usize, usize)> = shape.edges().collect();
        let ring_size = shape.vertex_count();

        let mut sweep = path.points.iter().zip(&tangents).try_fold(
            Sweep::with_capacity(path.len(), ring_size, edges.len()),
            |mut sweep, (point, &tangent)| {
                let frame =
                    Transform::ring(point.position, tangent, options.up, point.tilt, point.radius)?;
                let base = sweep
                    .push_ring(shape.points.iter().map(|&offset| frame.transform_point(offset)));
                if base > 0 {
                    bridge(&mut sweep.indices, base - ring_size as u32, base, &edges);
                }
                trace!(base, radius = point.radius, tilt = point.tilt, "ring");
                Ok::<_, TubeError>(sweep)
            },
        )?;

        if path.closed {
            let last = ((path.len() - 1) * ring_size) as u32;
            bridge(&mut sweep.indices, last, 0, &edges);
        }

        let mut tube = Tube {
            positions: sweep.positions,
            indices: sweep.indices,
            shape_vertex_count: ring_size,
            ..Tube::default()
        };

        if options.uvs {
            tube.uvs = ring_uvs(path, &positions, ring_size)?;
        }
        if options.caps == CapFill::Fill && !path.closed {
            tube.fill_caps(shape)?;
        }
        if options.normals {
            tube.compute_normals();
        }

        debug!(
            rings = path.len(),
            ring_size,
            closed = path.closed,
            vertices = tube.vertex_count(),
            triangles = tube.triangle_count(),
            "Extruded tube"
        );
        Ok(tube)
    }

    /// Close both end rings with a triangle fan around each ring's centroid.
    ///
    /// The start cap faces backward along the path and the end cap forward. Must
    /// run on a freshly extruded open tube, before any caps or joins.
    pub fn fill_caps(&mut self, shape: &Shape) -> Result<()> {
        let m = self.shape_vertex_count;
        if m == 0 || m != shape.vertex_count() {
            return Err(TubeError::InvalidOperation(format!(
                "tube rings have {m} vertices but the shape has {}",
                shape.vertex_count()
            )));
        }
        if self.positions.len() % m != 0 || self.positions.len() < 2 * m {
            return Err(TubeError::InvalidOperation(
                "caps need a tube of whole rings with at least two rings".into(),
            ));
        }

        let rings = self.positions.len() / m;
        let with_uvs = !self.uvs.is_empty();
        let edges: Vec<(usize, usize)> = shape.edges().collect();

        for (base, forward) in [(0, false), ((rings - 1) * m, true)] {
            let ring = &self.positions[base..base + m];
            let centroid = ring.iter().sum::<Point3>() / m as f64;
            let tip = self.positions.len() as u32;
            self.positions.push(centroid);
            if with_uvs {
                self.uvs.push(Point2::new(0.5, if forward { 1.0 } else { 0.0 }));
            }
            for &(j, k) in &edges {
                let (a, b) = ((base + j) as u32, (base + k) as u32);
                if forward {
                    self.indices.extend([tip, a, b]);
                } else {
                    self.indices.extend([tip, b, a]);
                }
            }
        }
        if !self.normals.is_empty() {
            self.compute_normals();
        }
        Ok(())
    }
}

/// `u` runs across the shape, `v` along the path by arc length.
fn ring_uvs(path: &Path, positions: &[Point3], ring_size: usize) -> Result<Vec<Point2>> {
    let total = path.length()?;
    if Tolerance::default().is_zero_length(total) {
        return Err(TubeError::degenerate("cannot map uvs onto a path of zero length"));
    }
    let across = (ring_size - 1).max(1) as f64;
    Ok(cumulative_lengths(positions)
        .into_iter()
        .flat_map(|distance| {
            (0..ring_size).map(move |j| Point2::new(j as f64 / across, distance / total))
        })
        .collect())
}
