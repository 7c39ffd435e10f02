use icp_types::LibraryReference;
use serde::{Deserialize, Serialize};

/// Path of the root manifest inside a package.
pub const MANIFEST_PATH: &str = "h5p.json";
/// Path of the content document inside a package.
pub const CONTENT_PATH: &str = "content/content.json";
/// Name of the descriptor file inside each bundled library folder.
pub const LIBRARY_DESCRIPTOR: &str = "library.json";

/// The package's root manifest (`h5p.json`).
///
/// Unknown keys (authors, license, changelog, ...) are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    pub title: String,
    /// Machine name of the library that renders this content.
    pub main_library: String,
    pub language: String,
    pub preloaded_dependencies: Vec<LibraryReference>,
    #[serde(default)]
    pub embed_types: Vec<String>,
    #[serde(default)]
    pub license: Option<String>,
}

impl PackageManifest {
    /// Parse a manifest and check the invariants serde cannot express.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, String> {
        let manifest: Self = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
        manifest.check()?;
        Ok(manifest)
    }

    fn check(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title must not be empty".into());
        }
        if self.main_library.trim().is_empty() {
            return Err("mainLibrary must not be empty".into());
        }
        if !self
            .preloaded_dependencies
            .iter()
            .any(|dep| dep.machine_name == self.main_library)
        {
            return Err(format!(
                "mainLibrary {} is not listed in preloadedDependencies",
                self.main_library
            ));
        }
        Ok(())
    }
}

/// Descriptor of a library folder bundled inside a package (`library.json`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundledLibrary {
    #[serde(flatten)]
    pub reference: LibraryReference,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub runnable: u8,
    #[serde(default)]
    pub preloaded_dependencies: Vec<LibraryReference>,
}
