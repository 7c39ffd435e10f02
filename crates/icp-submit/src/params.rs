use serde_json::Value;
use thiserror::Error;

/// Why a parameter document was refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("no parameters supplied")]
    Missing,

    #[error("parameters are not valid JSON: {0}")]
    Invalid(String),
}

/// Syntactic check of the parameter document submitted by the editor.
///
/// Deep validation against the library's own schema happens in the editor
/// runtime, not here.
pub trait ParameterValidator: Send + Sync {
    /// Parse `raw` into a document, or explain why it is unusable.
    fn validate(&self, raw: Option<&str>) -> Result<Value, ParameterError>;
}

/// Accepts any JSON document except `null`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonParameterValidator;

impl ParameterValidator for JsonParameterValidator {
    fn validate(&self, raw: Option<&str>) -> Result<Value, ParameterError> {
        let raw = match raw {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Err(ParameterError::Missing),
        };
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Null) => Err(ParameterError::Invalid("document is null".into())),
            Ok(document) => Ok(document),
            Err(e) => Err(ParameterError::Invalid(e.to_string())),
        }
    }
}
