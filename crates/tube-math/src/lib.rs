pub mod interpolate;
pub mod transform;

pub use glam::{DAffine3, DMat3, DQuat, DVec2, DVec3};
pub use interpolate::{bevel_parameter, direction, lerp, lerp_point, taper_profile};
pub use transform::Transform;

pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector2 = DVec2;
pub type Vector3 = DVec3;
