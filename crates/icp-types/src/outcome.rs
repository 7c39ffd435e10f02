use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A submission field that can carry a validation error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    MaximumGrade,
    PackageFile,
    /// The interactive editor: library reference and parameter document.
    Editor,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::MaximumGrade => "maximumGrade",
            Self::PackageFile => "packageFile",
            Self::Editor => "editor",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "maximumGrade" => Ok(Self::MaximumGrade),
            "packageFile" => Ok(Self::PackageFile),
            "editor" => Ok(Self::Editor),
            other => Err(TypeError::UnknownField(other.to_string())),
        }
    }
}

/// Classification of a field-scoped validation failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldErrorKind {
    /// The field is mandatory and was not supplied.
    Required,
    /// The field exceeds its maximum length.
    TooLong,
    /// Archive, manifest, path-safety, or dependency violation in a package.
    PackageFormat,
    /// The library reference does not match `name major.minor`.
    InvalidLibraryReference,
    /// The reference parsed but no installed library matches it exactly.
    LibraryNotFound,
    MissingParameters,
    InvalidParameters,
    /// Maximum grade is not a finite, non-negative number.
    GradeRange,
}

/// A field error: its kind plus the human-readable message shown to the author.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(kind: FieldErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Field → error mapping produced by validating one submission.
///
/// Keys are unique: recording a second error for a field replaces the first.
/// A field with no entry is valid, and the submission is acceptable iff the
/// mapping is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationOutcome {
    errors: BTreeMap<Field, FieldError>,
}

impl ValidationOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field`, returning the error it replaced, if any.
    pub fn insert(&mut self, field: Field, error: FieldError) -> Option<FieldError> {
        self.errors.insert(field, error)
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    /// The error kind recorded for `field`, if any.
    pub fn kind_of(&self, field: Field) -> Option<FieldErrorKind> {
        self.errors.get(&field).map(|e| e.kind)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.errors.iter().map(|(f, e)| (*f, e))
    }

    /// The set of failing fields in stable order.
    pub fn fields(&self) -> Vec<Field> {
        self.errors.keys().copied().collect()
    }
}
