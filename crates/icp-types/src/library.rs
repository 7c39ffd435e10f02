use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a content library prior to registry resolution.
///
/// A reference names a library by machine name and `major.minor` version.
/// Its canonical string form is `"<machine_name> <major>.<minor>"`, which is
/// exactly what [`fmt::Display`] produces.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryReference {
    pub machine_name: String,
    pub major_version: u32,
    pub minor_version: u32,
}

impl LibraryReference {
    pub fn new(machine_name: impl Into<String>, major_version: u32, minor_version: u32) -> Self {
        Self {
            machine_name: machine_name.into(),
            major_version,
            minor_version,
        }
    }

    /// Returns `true` if `other` names the same library at the same version.
    pub fn matches(&self, machine_name: &str, major: u32, minor: u32) -> bool {
        self.machine_name == machine_name
            && self.major_version == major
            && self.minor_version == minor
    }
}

impl fmt::Display for LibraryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}.{}",
            self.machine_name, self.major_version, self.minor_version
        )
    }
}

/// Opaque key of an installed library in the host registry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LibraryId(pub u64);

impl fmt::Debug for LibraryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LibraryId({})", self.0)
    }
}

impl fmt::Display for LibraryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A library reference that the registry confirmed as installed.
///
/// Only produced by a successful exact-match lookup, so holding one is proof
/// that `library_id` exists.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLibrary {
    #[serde(flatten)]
    pub reference: LibraryReference,
    pub library_id: LibraryId,
}

impl ResolvedLibrary {
    pub fn new(reference: LibraryReference, library_id: LibraryId) -> Self {
        Self {
            reference,
            library_id,
        }
    }
}

impl fmt::Display for ResolvedLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.reference, self.library_id)
    }
}

/// Identifier of a persisted content instance (the activity instance id).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentId(pub u64);

/// Identifier of a course in the host platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CourseId(pub u64);

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
