//! Extrusion settings.

use serde::{Deserialize, Serialize};
use tube_geometry::DEFAULT_SEGMENTS;
use tube_math::Vector3;

/// How the open ends of an extruded tube are closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapFill {
    /// Leave both end rings open.
    #[default]
    None,
    /// Close each end ring with a triangle fan around its centroid.
    Fill,
}

/// Configuration for sweeping a shape along a path.
///
/// Missing fields fall back to their defaults when deserialized, so a partial
/// config such as `{ "caps": "fill" }` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrudeOptions {
    /// Samples per curved segment when the path still has handles.
    pub segments_per_curve: usize,
    pub caps: CapFill,
    /// Generate per-vertex texture coordinates.
    pub uvs: bool,
    /// Generate per-vertex normals.
    pub normals: bool,
    /// World up axis for orienting the cross-section.
    pub up: Vector3,
}

impl Default for ExtrudeOptions {
    fn default() -> Self {
        Self {
            segments_per_curve: DEFAULT_SEGMENTS,
            caps: CapFill::None,
            uvs: true,
            normals: true,
            up: Vector3::Y,
        }
    }
}

impl ExtrudeOptions {
    #[must_use]
    pub fn with_segments_per_curve(mut self, segments: usize) -> Self {
        self.segments_per_curve = segments;
        self
    }

    #[must_use]
    pub fn with_caps(mut self, caps: CapFill) -> Self {
        self.caps = caps;
        self
    }

    #[must_use]
    pub fn with_up(mut self, up: Vector3) -> Self {
        self.up = up;
        self
    }

    #[must_use]
    pub fn without_uvs(mut self) -> Self {
        self.uvs = false;
        self
    }

    #[must_use]
    pub fn without_normals(mut self) -> Self {
        self.normals = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExtrudeOptions::default();
        assert_eq!(options.segments_per_curve, 32);
        assert_eq!(options.caps, CapFill::None);
        assert!(options.uvs && options.normals);
        assert_eq!(options.up, Vector3::Y);
    }

    #[test]
    fn test_partial_json() {
        let options: ExtrudeOptions =
            serde_json::from_str(r#"{ "caps": "fill", "up": [0.0, 0.0, 1.0] }"#).unwrap();
        assert_eq!(options.caps, CapFill::Fill);
        assert_eq!(options.up, Vector3::Z);
        assert_eq!(options.segments_per_curve, 32);
        assert!(options.normals);
    }

    #[test]
    fn test_builder_setters() {
        let options = ExtrudeOptions::default()
            .with_segments_per_curve(8)
            .with_caps(CapFill::Fill)
            .without_uvs()
            .without_normals();
        assert_eq!(options.segments_per_curve, 8);
        assert!(!options.uvs);
        assert!(!options.normals);
    }
}
