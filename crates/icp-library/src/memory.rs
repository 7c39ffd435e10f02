//! In-memory library registry for tests, fixtures, and embedding.
//!
//! [`InMemoryLibraryRegistry`] keeps installed libraries in a `HashMap`
//! behind a `RwLock`. Every lookup holds the read lock for its whole
//! duration, so readers always see a complete snapshot.

use std::collections::HashMap;
use std::sync::RwLock;

use icp_types::{LibraryId, LibraryReference};
use serde::{Deserialize, Serialize};

use crate::error::{LibraryError, Result};
use crate::traits::LibraryRegistry;

/// One installed library as recorded in the registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledLibrary {
    pub id: LibraryId,
    #[serde(flatten)]
    pub reference: LibraryReference,
    /// Whether content can use this library as its main library.
    #[serde(default)]
    pub runnable: bool,
}

/// An in-memory implementation of [`LibraryRegistry`].
#[derive(Debug, Default)]
pub struct InMemoryLibraryRegistry {
    libraries: RwLock<HashMap<LibraryReference, InstalledLibrary>>,
}

impl InMemoryLibraryRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of installed libraries.
    pub fn from_libraries(libraries: impl IntoIterator<Item = InstalledLibrary>) -> Self {
        let map = libraries
            .into_iter()
            .map(|lib| (lib.reference.clone(), lib))
            .collect();
        Self {
            libraries: RwLock::new(map),
        }
    }

    /// Load a registry from a JSON array of installed libraries.
    pub fn from_json(json: &str) -> Result<Self> {
        let libraries: Vec<InstalledLibrary> =
            serde_json::from_str(json).map_err(|e| LibraryError::Serialization(e.to_string()))?;
        Ok(Self::from_libraries(libraries))
    }

    /// Register (or replace) an installed library.
    pub fn install(&self, library: InstalledLibrary) -> Result<()> {
        let mut map = self
            .libraries
            .write()
            .map_err(|e| LibraryError::Registry(format!("lock poisoned: {e}")))?;
        tracing::debug!(library = %library.reference, id = %library.id, "library installed");
        map.insert(library.reference.clone(), library);
        Ok(())
    }

    /// Number of installed libraries.
    pub fn len(&self) -> usize {
        self.libraries.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LibraryRegistry for InMemoryLibraryRegistry {
    fn find_exact(&self, machine_name: &str, major: u32, minor: u32) -> Result<Option<LibraryId>> {
        let map = self
            .libraries
            .read()
            .map_err(|e| LibraryError::Registry(format!("lock poisoned: {e}")))?;
        let key = LibraryReference::new(machine_name, major, minor);
        Ok(map.get(&key).map(|lib| lib.id))
    }

    fn has_runnable(&self) -> Result<bool> {
        let map = self
            .libraries
            .read()
            .map_err(|e| LibraryError::Registry(format!("lock poisoned: {e}")))?;
        Ok(map.values().any(|lib| lib.runnable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lib(id: u64, name: &str, major: u32, minor: u32, runnable: bool) -> InstalledLibrary {
        InstalledLibrary {
            id: LibraryId(id),
            reference: LibraryReference::new(name, major, minor),
            runnable,
        }
    }

    #[test]
    fn empty_registry_finds_nothing() {
        let registry = InMemoryLibraryRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.find_exact("foo", 1, 2).unwrap(), None);
        assert!(!registry.has_runnable().unwrap());
    }

    #[test]
    fn exact_match_only() {
        let registry = InMemoryLibraryRegistry::from_libraries([lib(5, "foo", 1, 2, true)]);
        assert_eq!(registry.find_exact("foo", 1, 2).unwrap(), Some(LibraryId(5)));
        assert_eq!(registry.find_exact("foo", 1, 3).unwrap(), None);
        assert_eq!(registry.find_exact("foo", 2, 2).unwrap(), None);
        assert_eq!(registry.find_exact("FOO", 1, 2).unwrap(), None);
    }

    #[test]
    fn has_runnable_ignores_dependency_only_libraries() {
        let registry = InMemoryLibraryRegistry::from_libraries([
            lib(1, "H5P.Question", 1, 5, false),
            lib(2, "FontAwesome", 4, 5, false),
        ]);
        assert!(!registry.has_runnable().unwrap());

        registry.install(lib(3, "H5P.MultiChoice", 1, 16, true)).unwrap();
        assert!(registry.has_runnable().unwrap());
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn loads_from_json_fixture() {
        let json = r#"[
            {"id": 1, "machineName": "H5P.MultiChoice", "majorVersion": 1, "minorVersion": 16, "runnable": true},
            {"id": 2, "machineName": "H5P.Question", "majorVersion": 1, "minorVersion": 5}
        ]"#;
        let registry = InMemoryLibraryRegistry::from_json(json).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.find_exact("H5P.Question", 1, 5).unwrap(),
            Some(LibraryId(2))
        );
        assert!(registry.has_runnable().unwrap());
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = InMemoryLibraryRegistry::from_json("{not json").unwrap_err();
        assert!(matches!(err, LibraryError::Serialization(_)));
    }
}
