use thiserror::Error;

/// Errors produced by type conversions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown submission mode: {0:?}")]
    UnknownMode(String),

    #[error("unknown field name: {0:?}")]
    UnknownField(String),
}
