use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SplineError {
    #[error("Index out of range: {index} (valid range is 0..{len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Empty spline: {0} requires at least one point")]
    EmptySpline(&'static str),

    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Tolerance violation: {0}")]
    Tolerance(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl SplineError {
    /// Shorthand for an index outside `0..len`.
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}

pub type Result<T> = std::result::Result<T, SplineError>;
