//! Author-facing message texts.

/// A message the controller can show next to a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKey {
    Required,
    MaximumChars { max: usize },
    InvalidLibrary,
    NoSuchLibrary,
    NoParameters,
    InvalidParameters,
    MaximumGradeError,
}

impl MessageKey {
    /// Stable identifier of the message, independent of its arguments.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MaximumChars { .. } => "maximumchars",
            Self::InvalidLibrary => "invalidlibrary",
            Self::NoSuchLibrary => "nosuchlibrary",
            Self::NoParameters => "noparameters",
            Self::InvalidParameters => "invalidparameters",
            Self::MaximumGradeError => "maximumgradeerror",
        }
    }
}

/// Renders message keys for a locale.
pub trait MessageCatalog: Send + Sync {
    fn format(&self, key: &MessageKey, locale: &str) -> String;
}

/// Built-in English texts. Every locale falls back to English.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnglishCatalog;

impl MessageCatalog for EnglishCatalog {
    fn format(&self, key: &MessageKey, _locale: &str) -> String {
        match key {
            MessageKey::Required => "Required".into(),
            MessageKey::MaximumChars { max } => format!("Maximum of {max} characters"),
            MessageKey::InvalidLibrary => "Invalid library".into(),
            MessageKey::NoSuchLibrary => "The library used is not installed".into(),
            MessageKey::NoParameters => "Missing parameters".into(),
            MessageKey::InvalidParameters => "Invalid parameters".into(),
            MessageKey::MaximumGradeError => {
                "Please enter a valid non-negative number as the maximum grade".into()
            }
        }
    }
}
