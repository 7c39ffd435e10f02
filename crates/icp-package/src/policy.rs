use serde::{Deserialize, Serialize};

/// Limits and allow-lists applied to every uploaded package.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagePolicy {
    /// File extensions accepted anywhere in the package (lowercase, no dot).
    pub content_extensions: Vec<String>,
    /// Extra extensions accepted only inside bundled library folders.
    pub library_extensions: Vec<String>,
    /// Maximum number of archive entries, directories included.
    pub max_entries: usize,
    /// Maximum total declared uncompressed size.
    pub max_uncompressed_bytes: u64,
}

const DEFAULT_CONTENT_EXTENSIONS: &[&str] = &[
    "json", "png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "svg", "eot", "ttf", "woff",
    "woff2", "otf", "webm", "mp4", "ogg", "mp3", "m4a", "wav", "txt", "pdf", "rtf", "doc",
    "docx", "xls", "xlsx", "ppt", "pptx", "odt", "ods", "odp", "xml", "csv", "diff", "patch",
    "md", "textile", "vtt", "webvtt",
];

const DEFAULT_LIBRARY_EXTENSIONS: &[&str] = &["js", "css"];

impl Default for PackagePolicy {
    fn default() -> Self {
        Self {
            content_extensions: DEFAULT_CONTENT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            library_extensions: DEFAULT_LIBRARY_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            max_entries: 10_000,
            max_uncompressed_bytes: 512 * 1024 * 1024, // 512 MiB
        }
    }
}

impl PackagePolicy {
    /// Whether a file with this path may appear in the package.
    ///
    /// `in_library` widens the allow-list with [`Self::library_extensions`].
    pub fn allows(&self, path: &str, in_library: bool) -> bool {
        let filename = path.rsplit('/').next().unwrap_or(path);
        let Some((_, ext)) = filename.rsplit_once('.') else {
            return false;
        };
        let ext = ext.to_ascii_lowercase();
        self.content_extensions.iter().any(|e| *e == ext)
            || (in_library && self.library_extensions.iter().any(|e| *e == ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_limits() {
        let p = PackagePolicy::default();
        assert_eq!(p.max_entries, 10_000);
        assert_eq!(p.max_uncompressed_bytes, 512 * 1024 * 1024);
        assert!(p.content_extensions.contains(&"json".to_string()));
    }

    #[test]
    fn extension_checks_are_case_insensitive() {
        let p = PackagePolicy::default();
        assert!(p.allows("content/images/photo.PNG", false));
        assert!(p.allows("content/content.json", false));
    }

    #[test]
    fn scripts_only_inside_libraries() {
        let p = PackagePolicy::default();
        assert!(!p.allows("content/evil.js", false));
        assert!(p.allows("H5P.Foo-1.0/scripts/foo.js", true));
        assert!(p.allows("H5P.Foo-1.0/styles/foo.css", true));
    }

    #[test]
    fn files_without_extension_are_rejected() {
        let p = PackagePolicy::default();
        assert!(!p.allows("content/README", false));
        assert!(!p.allows("content/.json/noext", false));
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let p: PackagePolicy = serde_json::from_str(r#"{"max_entries": 5}"#).unwrap();
        assert_eq!(p.max_entries, 5);
        assert!(!p.content_extensions.is_empty());
    }
}
