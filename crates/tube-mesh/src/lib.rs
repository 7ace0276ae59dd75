pub mod buffer;
pub mod builder;
pub mod extrude;
pub mod options;
pub mod tube;

pub use builder::Builder;
pub use options::{CapFill, ExtrudeOptions};
pub use tube::Tube;
