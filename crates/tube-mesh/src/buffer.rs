//! Flat `f32` vertex buffers for upload to a GPU.

use tube_core::{Result, TubeError};

use crate::tube::Tube;

/// Floats per vertex in [`Tube::to_xyz`].
pub const XYZ_STRIDE: usize = 3;
/// Floats per vertex in [`Tube::to_xyzuv`].
pub const XYZUV_STRIDE: usize = 5;
/// Floats per vertex in [`Tube::to_xyzuvn`].
pub const XYZUVN_STRIDE: usize = 8;

impl Tube {
    /// Positions only.
    pub fn to_xyz(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.positions.len() * XYZ_STRIDE);
        for p in &self.positions {
            out.extend(p.as_vec3().to_array());
        }
        out
    }

    /// Positions followed by texture coordinates.
    pub fn to_xyzuv(&self) -> Result<Vec<f32>> {
        self.require_uvs()?;
        let mut out = Vec::with_capacity(self.positions.len() * XYZUV_STRIDE);
        for (p, uv) in self.positions.iter().zip(&self.uvs) {
            out.extend(p.as_vec3().to_array());
            out.extend(uv.as_vec2().to_array());
        }
        Ok(out)
    }

    /// Positions, texture coordinates, then normals.
    pub fn to_xyzuvn(&self) -> Result<Vec<f32>> {
        self.require_uvs()?;
        if self.normals.len() != self.positions.len() {
            return Err(TubeError::MissingAttribute("normals"));
        }
        let mut out = Vec::with_capacity(self.positions.len() * XYZUVN_STRIDE);
        for ((p, uv), n) in self.positions.iter().zip(&self.uvs).zip(&self.normals) {
            out.extend(p.as_vec3().to_array());
            out.extend(uv.as_vec2().to_array());
            out.extend(n.as_vec3().to_array());
        }
        Ok(out)
    }

    /// Triangle indices, three per triangle.
    pub fn index_buffer(&self) -> &[u32] {
        &self.indices
    }

    fn require_uvs(&self) -> Result<()> {
        if self.uvs.len() != self.positions.len() {
            return Err(TubeError::MissingAttribute("uvs"));
        }
        Ok(())
    }
}
