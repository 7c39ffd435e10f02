/// Errors from file store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The draft area does not exist.
    #[error("draft area not found: {0}")]
    DraftNotFound(String),

    /// The file exists in the listing but its content is gone.
    #[error("file missing from draft area {draft}: {filename}")]
    FileMissing { draft: String, filename: String },

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store lock poisoned: {0}")]
    Poisoned(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
