//! The [`LibraryRegistry`] trait defining the installed-library lookup
//! interface.

use icp_types::LibraryId;

use crate::error::Result;

/// Read-only view of the host's installed content libraries.
///
/// Implementations must be thread-safe (`Send + Sync`). Each call must be
/// answered from a consistent snapshot: a library that is half-way through
/// being installed must never be reported as a match.
pub trait LibraryRegistry: Send + Sync {
    /// Look up a library by exact `(machine_name, major, minor)`.
    ///
    /// Returns `Ok(None)` if no installed library matches. Implementations
    /// must never substitute a different version or a case-folded name.
    fn find_exact(&self, machine_name: &str, major: u32, minor: u32) -> Result<Option<LibraryId>>;

    /// Returns `true` if at least one installed library can be used as the
    /// main library of a piece of content.
    fn has_runnable(&self) -> Result<bool>;
}
