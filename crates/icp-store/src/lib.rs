//! File storage interface for interactive content submissions.
//!
//! Authors attach package files to a *draft area* before submitting. The
//! submission pipeline only needs to list and read those drafts; once the
//! host persists the content it copies the draft into a permanent area.
//! Both operations sit behind the [`FileStore`] trait so the pipeline can run
//! against the host's storage or against [`InMemoryFileStore`] in tests.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::{DraftFile, DraftRef, PermanentContext, PermanentRef};
pub use memory::InMemoryFileStore;
pub use traits::FileStore;
