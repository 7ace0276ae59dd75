pub mod error;
pub mod tolerance;
pub mod traits;

pub use error::{Result, TubeError};
pub use tolerance::Tolerance;
pub use traits::Validate;
