//! Content library references for interactive content submissions.
//!
//! A content author in create mode names the content type with a library
//! reference string such as `"H5P.MultiChoice 1.16"`. This crate turns that
//! string into a [`LibraryReference`](icp_types::LibraryReference) and
//! resolves it against the registry of installed libraries.
//!
//! Parsing and resolution are separate steps with separate errors: a string
//! that does not match the grammar is [`LibraryError::InvalidReference`] and is
//! never looked up, while a well-formed reference with no exact registry match
//! is [`LibraryError::NotFound`].
//!
//! # Modules
//!
//! - [`error`]: Error types for parsing and resolution
//! - [`reference`]: The `name major.minor` grammar
//! - [`traits`]: The [`LibraryRegistry`] trait
//! - [`memory`]: In-memory [`InMemoryLibraryRegistry`]
//! - [`resolver`]: [`ContentLibraryResolver`], the two-step parse/resolve sequence

pub mod error;
pub mod memory;
pub mod reference;
pub mod resolver;
pub mod traits;

pub use error::{LibraryError, Result};
pub use memory::{InMemoryLibraryRegistry, InstalledLibrary};
pub use reference::{parse_reference, MAX_MACHINE_NAME_LEN};
pub use resolver::ContentLibraryResolver;
pub use traits::LibraryRegistry;
