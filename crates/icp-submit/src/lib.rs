//! Submission pipeline for interactive content activities.
//!
//! An author either uploads a ready-made content package or builds content
//! in the editor, which submits a library reference plus a parameter
//! document. The [`SubmissionController`] checks the whole form and either
//! accepts it as a [`SubmissionRecord`] or rejects it with a field → error
//! mapping.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use icp_grade::InMemoryGradeStore;
//! use icp_library::{InMemoryLibraryRegistry, InstalledLibrary};
//! use icp_store::InMemoryFileStore;
//! use icp_submit::{ContentSubmission, ControllerConfig, SubmissionController};
//! use icp_types::{LibraryId, LibraryReference};
//!
//! let registry = InMemoryLibraryRegistry::from_libraries([InstalledLibrary {
//!     id: LibraryId(1),
//!     reference: LibraryReference::new("H5P.MultiChoice", 1, 16),
//!     runnable: true,
//! }]);
//! let controller = SubmissionController::new(
//!     ControllerConfig::default(),
//!     Arc::new(registry),
//!     Arc::new(InMemoryFileStore::new()),
//!     Arc::new(InMemoryGradeStore::new()),
//! );
//!
//! let submission = ContentSubmission::create("Quiz", "H5P.MultiChoice 1.16", "{}");
//! let evaluation = controller.evaluate(&submission).unwrap();
//! assert!(evaluation.is_accepted());
//! ```

pub mod config;
pub mod controller;
pub mod defaults;
pub mod error;
pub mod messages;
pub mod params;
pub mod state;
pub mod submission;

pub use config::ControllerConfig;
pub use controller::SubmissionController;
pub use error::{SubmitError, SubmitResult};
pub use messages::{EnglishCatalog, MessageCatalog, MessageKey};
pub use params::{JsonParameterValidator, ParameterError, ParameterValidator};
pub use state::{Evaluation, SubmissionOutcome, SubmissionState};
pub use submission::{
    ContentSubmission, ExistingContent, GradeInput, SubmissionDefaults, SubmissionRecord,
};
