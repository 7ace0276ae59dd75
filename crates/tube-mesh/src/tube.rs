use tube_core::{Result, TubeError, Validate};
use tube_math::{Point2, Point3, Vector3};

/// An indexed triangle mesh produced by sweeping a shape along a path.
///
/// Vertices are laid out ring by ring, `shape_vertex_count` per ring, followed
/// by any cap centroids. `normals` and `uvs` are either empty or hold one entry
/// per position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tube {
    pub positions: Vec<Point3>,
    pub normals: Vec<Vector3>,
    pub uvs: Vec<Point2>,
    pub indices: Vec<u32>,
    pub shape_vertex_count: usize,
}

impl Tube {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Append another tube, offsetting its indices past this tube's vertices.
    ///
    /// An attribute present on only one side is zero-filled on the other so the
    /// attribute arrays stay parallel to `positions`.
    pub fn merge(&mut self, other: &Tube) {
        let own = self.positions.len();
        let offset = own as u32;
        append_attribute(&mut self.normals, own, &other.normals, other.positions.len());
        append_attribute(&mut self.uvs, own, &other.uvs, other.positions.len());
        self.positions.extend_from_slice(&other.positions);
        self.indices
            .extend(other.indices.iter().map(|&i| i + offset));
        if self.shape_vertex_count == 0 {
            self.shape_vertex_count = other.shape_vertex_count;
        }
    }

    /// Concatenate two tubes into one mesh.
    pub fn join(a: Tube, b: &Tube) -> Tube {
        let mut joined = a;
        joined.merge(b);
        joined
    }

    /// Concatenate any number of tubes, reserving the full buffers up front.
    pub fn from_tubes(tubes: impl IntoIterator<Item = Tube>) -> Tube {
        let tubes: Vec<Tube> = tubes.into_iter().collect();
        let vertices = tubes.iter().map(Tube::vertex_count).sum();
        let indices = tubes.iter().map(|t| t.indices.len()).sum();

        let mut joined = Tube {
            positions: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
            ..Tube::default()
        };
        if tubes.iter().any(|t| !t.normals.is_empty()) {
            joined.normals.reserve(vertices);
        }
        if tubes.iter().any(|t| !t.uvs.is_empty()) {
            joined.uvs.reserve(vertices);
        }
        for tube in &tubes {
            joined.merge(tube);
        }
        joined
    }

    /// Recompute per-vertex normals as the normalized sum of adjacent unit face normals.
    ///
    /// Faces are weighted equally regardless of area; zero-area faces and faces
    /// referencing a missing vertex are skipped. Use [`Validate`] to reject the latter.
    pub fn compute_normals(&mut self) {
        let n = self.positions.len();
        self.normals.clear();
        self.normals.resize(n, Vector3::ZERO);

        for tri in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let (Some(&p0), Some(&p1), Some(&p2)) = (
                self.positions.get(i0),
                self.positions.get(i1),
                self.positions.get(i2),
            ) else {
                continue;
            };
            let Some(normal) = (p1 - p0).cross(p2 - p0).try_normalize() else {
                continue;
            };
            self.normals[i0] += normal;
            self.normals[i1] += normal;
            self.normals[i2] += normal;
        }

        for n in &mut self.normals {
            let len = n.length();
            if len > 1e-12 {
                *n /= len;
            }
        }
    }
}

fn append_attribute<T: Copy + Default>(
    own: &mut Vec<T>,
    own_vertices: usize,
    other: &[T],
    other_vertices: usize,
) {
    if own.is_empty() && other.is_empty() {
        return;
    }
    own.resize(own_vertices, T::default());
    if other.is_empty() {
        own.resize(own_vertices + other_vertices, T::default());
    } else {
        own.extend_from_slice(other);
    }
}

impl Validate for Tube {
    fn validate(&self) -> Result<()> {
        let n = self.positions.len();
        if self.indices.len() % 3 != 0 {
            return Err(TubeError::Validation(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        if let Some(&i) = self.indices.iter().find(|&&i| i as usize >= n) {
            return Err(TubeError::Validation(format!(
                "index {i} out of range for {n} vertices"
            )));
        }
        if !self.normals.is_empty() && self.normals.len() != n {
            return Err(TubeError::Validation(format!(
                "{} normals for {n} vertices",
                self.normals.len()
            )));
        }
        if !self.uvs.is_empty() && self.uvs.len() != n {
            return Err(TubeError::Validation(format!(
                "{} uvs for {n} vertices",
                self.uvs.len()
            )));
        }
        Ok(())
    }
}
