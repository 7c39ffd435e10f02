use std::path::PathBuf;

use icp_grade::DEFAULT_MODULE_TYPE;
use icp_package::PackagePolicy;
use icp_types::DisplayOptions;
use serde::{Deserialize, Serialize};

/// Configuration for the submission controller.
///
/// Everything the controller would otherwise read from host globals (site
/// settings, the current locale, the temp directory) is passed in here.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Whether the site offers the content hub. When it does, the form
    /// always defaults to create mode.
    pub hub_enabled: bool,
    /// Locale used to render field error messages.
    pub locale: String,
    /// Module type under which the host files grade items.
    pub module_type: String,
    /// Directory that receives validated packages.
    pub staging_root: PathBuf,
    /// Limits applied to uploaded packages.
    pub package_policy: PackagePolicy,
    /// Display options offered to new content.
    pub display_defaults: DisplayOptions,
    /// Maximum grade used when no grade item exists.
    pub default_maximum_grade: f64,
    /// Longest accepted activity name, in characters.
    pub max_name_length: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            hub_enabled: false,
            locale: "en".into(),
            module_type: DEFAULT_MODULE_TYPE.into(),
            staging_root: std::env::temp_dir().join("icp-staging"),
            package_policy: PackagePolicy::default(),
            display_defaults: DisplayOptions::default(),
            default_maximum_grade: 10.0,
            max_name_length: 255,
        }
    }
}
