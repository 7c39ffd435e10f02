//! Foundation types for interactive content package submissions.
//!
//! This crate provides the data model shared by every `icp` crate: the
//! identity of a content library, the per-field error mapping produced by
//! submission validation, viewer display toggles, and the submission mode.
//!
//! # Key Types
//!
//! - [`LibraryReference`]: `(machine_name, major, minor)` triple prior to resolution
//! - [`ResolvedLibrary`]: a reference paired with its registry [`LibraryId`]
//! - [`ValidationOutcome`]: unique-keyed [`Field`] → [`FieldError`] mapping
//! - [`DisplayOptions`]: frame/download/copyright toggles and the `disable` bitmask
//! - [`SubmissionMode`]: Upload or Create

pub mod display;
pub mod error;
pub mod library;
pub mod mode;
pub mod outcome;

pub use display::DisplayOptions;
pub use error::TypeError;
pub use library::{ContentId, CourseId, LibraryId, LibraryReference, ResolvedLibrary};
pub use mode::SubmissionMode;
pub use outcome::{Field, FieldError, FieldErrorKind, ValidationOutcome};
