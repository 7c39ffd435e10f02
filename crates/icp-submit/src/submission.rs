use icp_package::StagingRef;
use icp_store::DraftRef;
use icp_types::{ContentId, DisplayOptions, LibraryReference, ResolvedLibrary, SubmissionMode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// GradeInput
// ---------------------------------------------------------------------------

/// Maximum grade as typed into the form: a JSON number, free text, or any
/// other JSON value a client happened to send.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GradeInput {
    Number(f64),
    Text(String),
    /// `null`, booleans, arrays and objects. Never a valid grade.
    Other(Value),
}

impl GradeInput {
    /// The value as a finite number, or `None` if it is not one.
    ///
    /// Text is trimmed before parsing. Sign is not checked here.
    pub fn parse(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl Default for GradeInput {
    fn default() -> Self {
        Self::Text("10".into())
    }
}

impl From<f64> for GradeInput {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for GradeInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// ContentSubmission
// ---------------------------------------------------------------------------

fn default_parameters() -> Option<String> {
    Some("{}".into())
}

/// The activity form as submitted by the author.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub maximum_grade: GradeInput,
    /// `upload` or `create`. Absent means create.
    #[serde(default)]
    pub action: Option<String>,
    /// Draft area holding the uploaded package.
    #[serde(default)]
    pub package_file: Option<DraftRef>,
    #[serde(default)]
    pub library_reference: String,
    #[serde(default = "default_parameters")]
    pub parameters: Option<String>,
    #[serde(default)]
    pub display_options: DisplayOptions,
}

impl ContentSubmission {
    /// A create-mode submission for `library_reference` with `parameters`.
    pub fn create(
        name: impl Into<String>,
        library_reference: impl Into<String>,
        parameters: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            maximum_grade: GradeInput::default(),
            action: Some(SubmissionMode::Create.as_str().into()),
            package_file: None,
            library_reference: library_reference.into(),
            parameters: Some(parameters.into()),
            display_options: DisplayOptions::default(),
        }
    }

    /// An upload-mode submission pointing at a draft area.
    pub fn upload(name: impl Into<String>, package_file: DraftRef) -> Self {
        Self {
            name: name.into(),
            maximum_grade: GradeInput::default(),
            action: Some(SubmissionMode::Upload.as_str().into()),
            package_file: Some(package_file),
            library_reference: String::new(),
            parameters: default_parameters(),
            display_options: DisplayOptions::default(),
        }
    }

    pub fn with_maximum_grade(mut self, grade: impl Into<GradeInput>) -> Self {
        self.maximum_grade = grade.into();
        self
    }

    pub fn with_action(mut self, action: Option<&str>) -> Self {
        self.action = action.map(str::to_string);
        self
    }

    pub fn with_display_options(mut self, options: DisplayOptions) -> Self {
        self.display_options = options;
        self
    }
}

// ---------------------------------------------------------------------------
// SubmissionRecord
// ---------------------------------------------------------------------------

/// A normalized, accepted submission ready to be persisted by the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub name: String,
    pub mode: SubmissionMode,
    pub maximum_grade: f64,
    /// Always set in create mode.
    pub library: Option<ResolvedLibrary>,
    pub parameters: Option<Value>,
    /// Always set in upload mode.
    pub staging: Option<StagingRef>,
    /// Display options as the viewer will apply them.
    pub display_options: DisplayOptions,
    /// The host's `disable` bitmask for the options as entered.
    pub disable: u32,
}

// ---------------------------------------------------------------------------
// Editing
// ---------------------------------------------------------------------------

/// An already-persisted content instance whose form is being edited.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingContent {
    pub id: ContentId,
    pub library: LibraryReference,
    pub parameters: Value,
    #[serde(default)]
    pub disable: u32,
}

/// Initial values for the activity form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDefaults {
    pub maximum_grade: f64,
    pub action: SubmissionMode,
    pub library_reference: String,
    pub parameters: String,
    pub display_options: DisplayOptions,
}
