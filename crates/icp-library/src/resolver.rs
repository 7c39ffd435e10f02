use std::sync::Arc;

use icp_types::{LibraryReference, ResolvedLibrary};
use tracing::debug;

use crate::error::{LibraryError, Result};
use crate::reference::parse_reference;
use crate::traits::LibraryRegistry;

/// Parses library reference strings and resolves them against a registry.
///
/// Resolution is an exact-match lookup; a reference that parses but has no
/// installed counterpart is [`LibraryError::NotFound`], never a nearby
/// version.
#[derive(Clone)]
pub struct ContentLibraryResolver {
    registry: Arc<dyn LibraryRegistry>,
}

impl ContentLibraryResolver {
    pub fn new(registry: Arc<dyn LibraryRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this resolver reads from.
    pub fn registry(&self) -> &Arc<dyn LibraryRegistry> {
        &self.registry
    }

    /// Parse a reference string without touching the registry.
    pub fn parse(&self, raw: &str) -> Result<LibraryReference> {
        parse_reference(raw)
    }

    /// Resolve a parsed reference to an installed library.
    pub fn resolve(&self, reference: &LibraryReference) -> Result<ResolvedLibrary> {
        let found = self.registry.find_exact(
            &reference.machine_name,
            reference.major_version,
            reference.minor_version,
        )?;
        match found {
            Some(library_id) => {
                debug!(library = %reference, id = %library_id, "library resolved");
                Ok(ResolvedLibrary::new(reference.clone(), library_id))
            }
            None => {
                debug!(library = %reference, "library not installed");
                Err(LibraryError::NotFound {
                    reference: reference.clone(),
                })
            }
        }
    }

    /// Parse then resolve. A parse failure is returned without a lookup.
    pub fn parse_and_resolve(&self, raw: &str) -> Result<ResolvedLibrary> {
        let reference = self.parse(raw)?;
        self.resolve(&reference)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use icp_types::LibraryId;

    use super::*;
    use crate::memory::{InMemoryLibraryRegistry, InstalledLibrary};

    /// Registry double that counts lookups.
    #[derive(Default)]
    struct CountingRegistry {
        lookups: AtomicUsize,
    }

    impl LibraryRegistry for CountingRegistry {
        fn find_exact(&self, _: &str, _: u32, _: u32) -> Result<Option<LibraryId>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }

        fn has_runnable(&self) -> Result<bool> {
            Ok(false)
        }
    }

    fn resolver() -> ContentLibraryResolver {
        let registry = InMemoryLibraryRegistry::from_libraries([InstalledLibrary {
            id: LibraryId(42),
            reference: LibraryReference::new("H5P.MultiChoice", 1, 16),
            runnable: true,
        }]);
        ContentLibraryResolver::new(Arc::new(registry))
    }

    #[test]
    fn resolves_installed_library() {
        let resolved = resolver().parse_and_resolve("H5P.MultiChoice 1.16").unwrap();
        assert_eq!(resolved.library_id, LibraryId(42));
        assert_eq!(resolved.reference.machine_name, "H5P.MultiChoice");
    }

    #[test]
    fn other_version_is_not_found() {
        let err = resolver().parse_and_resolve("H5P.MultiChoice 1.15").unwrap_err();
        match err {
            LibraryError::NotFound { reference } => {
                assert_eq!(reference, LibraryReference::new("H5P.MultiChoice", 1, 15));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn parse_failure_is_distinct_from_not_found() {
        let err = resolver().parse_and_resolve("H5P.MultiChoice").unwrap_err();
        assert!(matches!(err, LibraryError::InvalidReference { .. }));
        assert!(err.is_field_error());
    }

    #[test]
    fn parse_failure_skips_registry_lookup() {
        let registry = Arc::new(CountingRegistry::default());
        let resolver = ContentLibraryResolver::new(registry.clone());

        assert!(resolver.parse_and_resolve("not a reference").is_err());
        assert_eq!(registry.lookups.load(Ordering::SeqCst), 0);

        assert!(resolver.parse_and_resolve("foo 1.0").is_err());
        assert_eq!(registry.lookups.load(Ordering::SeqCst), 1);
    }
}
