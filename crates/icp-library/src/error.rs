//! Error types for library parsing and resolution.

use icp_types::LibraryReference;
use thiserror::Error;

/// Errors that can occur while parsing or resolving a library reference.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The string does not match `name major.minor`.
    #[error("invalid library reference {raw:?}: {reason}")]
    InvalidReference { raw: String, reason: String },

    /// The reference is well-formed but no installed library matches it.
    #[error("no such library: {reference}")]
    NotFound { reference: LibraryReference },

    /// The registry backend failed.
    #[error("registry error: {0}")]
    Registry(String),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl LibraryError {
    pub(crate) fn invalid(raw: &str, reason: impl Into<String>) -> Self {
        Self::InvalidReference {
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for failures of the author's input rather than of the
    /// registry itself.
    pub fn is_field_error(&self) -> bool {
        matches!(self, Self::InvalidReference { .. } | Self::NotFound { .. })
    }
}

/// Convenience type alias for library operations.
pub type Result<T> = std::result::Result<T, LibraryError>;
