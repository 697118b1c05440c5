use thiserror::Error;

/// Errors raised by the vector algebra.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("cannot create a zero vector")]
    ZeroVector,
}

/// Result type for vector algebra operations.
pub type MathResult<T> = Result<T, MathError>;
