//! Tube sweep geometry: Bezier curves, control points, paths, and cross-sections.

pub mod control_point;
pub mod curve;
pub mod path;
pub mod shape;

pub use control_point::ControlPoint;
pub use curve::{
    cubic_bezier, divide_cubic_bezier, divide_quadratic_bezier, quadratic_bezier, CubicBezier,
    Curve, Line, QuadraticBezier, Segment,
};
pub use path::Path;
pub use shape::Shape;

/// Samples per curved segment used when no explicit count is given.
pub const DEFAULT_SEGMENTS: usize = 32;
