use thiserror::Error;

/// Errors from grade store access.
#[derive(Debug, Error)]
pub enum GradeError {
    /// The backing store could not be read.
    #[error("grade store unavailable: {0}")]
    Unavailable(String),

    #[error("grade store lock poisoned: {0}")]
    Poisoned(String),
}

pub type GradeResult<T> = Result<T, GradeError>;
