//! Library reference grammar.
//!
//! A reference is exactly two tokens separated by a single space:
//!
//! ```text
//! <machine_name> <major>.<minor>
//! ```
//!
//! - `machine_name` is 1–255 characters from `[A-Za-z0-9_.-]`
//! - `major` and `minor` are non-empty runs of ASCII digits that fit a `u32`
//! - No leading, trailing, or repeated whitespace

use icp_types::LibraryReference;

use crate::error::{LibraryError, Result};

/// Longest machine name the registry can store.
pub const MAX_MACHINE_NAME_LEN: usize = 255;

/// Parse a library reference string.
///
/// # Examples
///
/// ```
/// use icp_library::parse_reference;
///
/// let r = parse_reference("foo 1.2").unwrap();
/// assert_eq!(r.machine_name, "foo");
/// assert_eq!((r.major_version, r.minor_version), (1, 2));
///
/// assert!(parse_reference("foo").is_err());
/// assert!(parse_reference("foo 1").is_err());
/// assert!(parse_reference("foo  1.2").is_err());
/// ```
pub fn parse_reference(raw: &str) -> Result<LibraryReference> {
    if raw.is_empty() {
        return Err(LibraryError::invalid(raw, "reference must not be empty"));
    }

    let mut tokens = raw.split(' ');
    let (name, version) = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(name), Some(version), None) => (name, version),
        _ => {
            return Err(LibraryError::invalid(
                raw,
                "expected exactly one space between name and version",
            ))
        }
    };

    validate_machine_name(raw, name)?;

    let (major, minor) = version
        .split_once('.')
        .ok_or_else(|| LibraryError::invalid(raw, "version must be <major>.<minor>"))?;
    let major = parse_version_part(raw, "major", major)?;
    let minor = parse_version_part(raw, "minor", minor)?;

    Ok(LibraryReference::new(name, major, minor))
}

fn validate_machine_name(raw: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(LibraryError::invalid(raw, "machine name must not be empty"));
    }
    if name.len() > MAX_MACHINE_NAME_LEN {
        return Err(LibraryError::invalid(
            raw,
            format!("machine name longer than {MAX_MACHINE_NAME_LEN} characters"),
        ));
    }
    if let Some(ch) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')))
    {
        return Err(LibraryError::invalid(
            raw,
            format!("machine name contains forbidden character: {ch:?}"),
        ));
    }
    Ok(())
}

fn parse_version_part(raw: &str, which: &str, part: &str) -> Result<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LibraryError::invalid(
            raw,
            format!("{which} version must be a non-negative integer"),
        ));
    }
    part.parse::<u32>()
        .map_err(|_| LibraryError::invalid(raw, format!("{which} version is out of range")))
}
