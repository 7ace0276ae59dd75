use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TubeError {
    /// A zero-length direction or a zero arc length was about to be used.
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Too few points: need at least {min}, got {actual}")]
    TooFewPoints { min: usize, actual: usize },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Missing vertex attribute: {0}")]
    MissingAttribute(&'static str),

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl TubeError {
    pub fn degenerate(context: impl Into<String>) -> Self {
        Self::DegenerateGeometry(context.into())
    }

    pub fn invalid_parameter(context: impl Into<String>) -> Self {
        Self::InvalidParameter(context.into())
    }
}

pub type Result<T> = std::result::Result<T, TubeError>;
