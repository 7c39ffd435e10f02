//! Content package validation for interactive content submissions.
//!
//! A content package is a ZIP archive bundling a root manifest (`h5p.json`),
//! the content document (`content/content.json`) with its media, and
//! optionally the libraries the content needs.
//!
//! # Architecture
//!
//! - **PackagePolicy**: limits and file-extension allow-lists
//! - **PackageManifest**: the typed root manifest
//! - **PackageValidator**: runs every structural check, collecting all
//!   problems, and stages the package when none are found
//! - **StagingArea**: writes accepted packages under collision-free names
//!
//! Validation problems are data ([`PackageReport::errors`]); only a failure to
//! write the staged file (or to reach the registry) is a [`PackageError`].

pub mod error;
pub mod manifest;
pub mod policy;
pub mod staging;
pub mod validator;

pub use error::{PackageError, PackageResult};
pub use manifest::{BundledLibrary, PackageManifest, CONTENT_PATH, MANIFEST_PATH};
pub use policy::PackagePolicy;
pub use staging::{StagingArea, StagingRef};
pub use validator::{is_safe_entry_path, PackageReport, PackageValidator};
