use icp_grade::GradeError;
use icp_library::LibraryError;
use icp_package::PackageError;
use icp_store::StoreError;

/// Request-level failures that abort a submission.
///
/// Problems with the author's input are never reported here; they become
/// entries in the [`ValidationOutcome`](icp_types::ValidationOutcome).
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The `action` value is neither `upload` nor `create`.
    #[error("unknown submission mode: {0:?}")]
    UnknownMode(String),

    /// Staging the package failed, or the registry could not be queried
    /// during package validation.
    #[error("package validation failed: {0}")]
    Package(#[from] PackageError),

    #[error("file store error: {0}")]
    Store(#[from] StoreError),

    /// The library registry backend failed.
    #[error("library registry error: {0}")]
    Library(#[from] LibraryError),

    #[error("grade store error: {0}")]
    Grade(#[from] GradeError),

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type SubmitResult<T> = Result<T, SubmitError>;
