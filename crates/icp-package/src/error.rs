use std::path::PathBuf;

use icp_library::LibraryError;
use thiserror::Error;

/// Failures that abort package validation outright.
///
/// Anything wrong with the package itself is reported through
/// [`PackageReport`](crate::PackageReport) instead.
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("failed to stage package at {path:?}: {source}")]
    StagingIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("library registry unavailable: {0}")]
    Registry(#[from] LibraryError),
}

pub type PackageResult<T> = Result<T, PackageError>;
