use crate::error::Result;

/// Validate structural integrity of a path, profile, or mesh.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
