use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use icp_grade::{GradeStore, GradeSynchronizer};
use icp_library::{ContentLibraryResolver, LibraryError, LibraryRegistry};
use icp_package::{PackageValidator, StagingArea, StagingRef};
use icp_store::{DraftRef, FileStore, PermanentContext, PermanentRef, StoreError};
use icp_types::{
    ContentId, Field, FieldError, FieldErrorKind, ResolvedLibrary, SubmissionMode,
    ValidationOutcome,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::error::{SubmitError, SubmitResult};
use crate::messages::{EnglishCatalog, MessageCatalog, MessageKey};
use crate::params::{JsonParameterValidator, ParameterError, ParameterValidator};
use crate::state::{Evaluation, SubmissionOutcome, SubmissionState};
use crate::submission::{ContentSubmission, SubmissionRecord};

/// Validates activity form submissions and turns them into records.
///
/// The controller owns no mutable state; one instance can serve many
/// requests concurrently behind an `Arc`.
pub struct SubmissionController {
    config: ControllerConfig,
    resolver: ContentLibraryResolver,
    parameters: Box<dyn ParameterValidator>,
    packages: PackageValidator,
    files: Arc<dyn FileStore>,
    grades: GradeSynchronizer,
    messages: Box<dyn MessageCatalog>,
}

impl SubmissionController {
    /// Create a controller with the JSON parameter validator and English
    /// messages.
    pub fn new(
        config: ControllerConfig,
        registry: Arc<dyn LibraryRegistry>,
        files: Arc<dyn FileStore>,
        grade_store: Arc<dyn GradeStore>,
    ) -> Self {
        let staging = StagingArea::new(config.staging_root.clone());
        Self {
            resolver: ContentLibraryResolver::new(Arc::clone(&registry)),
            parameters: Box::new(JsonParameterValidator),
            packages: PackageValidator::new(registry, staging),
            files,
            grades: GradeSynchronizer::new(grade_store, config.module_type.clone()),
            messages: Box::new(EnglishCatalog),
            config,
        }
    }

    /// Replace the parameter validator.
    pub fn with_parameter_validator(mut self, validator: Box<dyn ParameterValidator>) -> Self {
        self.parameters = validator;
        self
    }

    /// Replace the message catalog.
    pub fn with_message_catalog(mut self, catalog: Box<dyn MessageCatalog>) -> Self {
        self.messages = catalog;
        self
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn resolver(&self) -> &ContentLibraryResolver {
        &self.resolver
    }

    pub fn grades(&self) -> &GradeSynchronizer {
        &self.grades
    }

    /// Validate a submission.
    ///
    /// Every field problem is collected into the outcome; `Err` is reserved
    /// for an unknown mode and for collaborator failures. A package staged
    /// during a rejected evaluation is discarded again.
    pub fn evaluate(&self, submission: &ContentSubmission) -> SubmitResult<Evaluation> {
        let start = Instant::now();
        let mut trail = vec![SubmissionState::Initial];

        trail.push(SubmissionState::ModeDispatch);
        let mode = match submission.action.as_deref() {
            None => SubmissionMode::Create,
            Some(action) => SubmissionMode::from_str(action)
                .map_err(|_| SubmitError::UnknownMode(action.to_string()))?,
        };
        debug!(mode = %mode, "submission mode");

        let mut errors = ValidationOutcome::new();
        let name = self.check_name(&submission.name, &mut errors);
        let maximum_grade = self.check_maximum_grade(submission, &mut errors);

        let mut staging = None;
        let mut library = None;
        let mut parameters = None;
        match mode {
            SubmissionMode::Upload => {
                trail.push(SubmissionState::ValidatingUpload);
                staging = self.validate_upload(submission, &mut errors)?;
            }
            SubmissionMode::Create => {
                trail.push(SubmissionState::ValidatingCreate);
                (library, parameters) = self.validate_create(submission, &mut errors)?;
            }
        }

        trail.push(SubmissionState::Aggregated);
        let outcome = match (name, maximum_grade) {
            (Some(name), Some(maximum_grade)) if errors.is_empty() => {
                trail.push(SubmissionState::Accepted);
                info!(mode = %mode, name = %name, "submission accepted");
                SubmissionOutcome::Accepted(SubmissionRecord {
                    name,
                    mode,
                    maximum_grade,
                    library,
                    parameters,
                    staging,
                    display_options: submission.display_options.effective(),
                    disable: submission.display_options.to_disable(),
                })
            }
            _ => {
                trail.push(SubmissionState::Rejected);
                if let Some(staged) = staging {
                    self.discard(&staged);
                }
                info!(mode = %mode, fields = ?errors.fields(), "submission rejected");
                SubmissionOutcome::Rejected(errors)
            }
        };

        Ok(Evaluation {
            mode,
            outcome,
            trail,
            elapsed: start.elapsed(),
        })
    }

    /// Copy the accepted package out of the author's draft area into the
    /// content instance's permanent package area.
    pub fn persist_package(
        &self,
        draft: &DraftRef,
        content_id: ContentId,
    ) -> SubmitResult<PermanentRef> {
        let stored = self
            .files
            .copy_draft_to_permanent(draft, &PermanentContext::package(content_id.0))?;
        info!(content = %content_id, file = %stored, "package persisted");
        Ok(stored)
    }

    pub(crate) fn field_error(&self, kind: FieldErrorKind, key: MessageKey) -> FieldError {
        FieldError::new(kind, self.messages.format(&key, &self.config.locale))
    }

    /// Trimmed name, or `None` after recording why it is unusable.
    fn check_name(&self, raw: &str, errors: &mut ValidationOutcome) -> Option<String> {
        let name = raw.trim();
        if name.is_empty() {
            errors.insert(
                Field::Name,
                self.field_error(FieldErrorKind::Required, MessageKey::Required),
            );
            return None;
        }
        let max = self.config.max_name_length;
        if name.chars().count() > max {
            errors.insert(
                Field::Name,
                self.field_error(FieldErrorKind::TooLong, MessageKey::MaximumChars { max }),
            );
            return None;
        }
        Some(name.to_string())
    }

    fn check_maximum_grade(
        &self,
        submission: &ContentSubmission,
        errors: &mut ValidationOutcome,
    ) -> Option<f64> {
        let grade = submission.maximum_grade.parse().filter(|g| *g >= 0.0);
        if grade.is_none() {
            errors.insert(
                Field::MaximumGrade,
                self.field_error(FieldErrorKind::GradeRange, MessageKey::MaximumGradeError),
            );
        }
        grade
    }

    fn validate_upload(
        &self,
        submission: &ContentSubmission,
        errors: &mut ValidationOutcome,
    ) -> SubmitResult<Option<StagingRef>> {
        let required = |errors: &mut ValidationOutcome| {
            errors.insert(
                Field::PackageFile,
                self.field_error(FieldErrorKind::Required, MessageKey::Required),
            );
        };

        let draft = match &submission.package_file {
            Some(draft) if !draft.is_blank() => draft,
            _ => {
                required(errors);
                return Ok(None);
            }
        };

        let files = match self.files.draft_files(draft) {
            Ok(files) => files,
            Err(StoreError::DraftNotFound(_)) => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        let Some(file) = files.first() else {
            debug!(draft = %draft, "no package attached");
            required(errors);
            return Ok(None);
        };

        debug!(draft = %draft, file = %file.filename, size = file.size(), "validating package");
        let report = self
            .packages
            .validate(&file.bytes, &self.config.package_policy)?;
        if !report.is_valid() {
            let message = report.messages().collect::<Vec<_>>().join("\n");
            errors.insert(
                Field::PackageFile,
                FieldError::new(FieldErrorKind::PackageFormat, message),
            );
            return Ok(None);
        }
        Ok(report.staging)
    }

    fn validate_create(
        &self,
        submission: &ContentSubmission,
        errors: &mut ValidationOutcome,
    ) -> SubmitResult<(Option<ResolvedLibrary>, Option<Value>)> {
        let library = match self.resolver.parse_and_resolve(&submission.library_reference) {
            Ok(library) => library,
            Err(LibraryError::InvalidReference { raw, reason }) => {
                debug!(raw = %raw, reason = %reason, "invalid library reference");
                errors.insert(
                    Field::Editor,
                    self.field_error(
                        FieldErrorKind::InvalidLibraryReference,
                        MessageKey::InvalidLibrary,
                    ),
                );
                return Ok((None, None));
            }
            Err(LibraryError::NotFound { .. }) => {
                errors.insert(
                    Field::Editor,
                    self.field_error(FieldErrorKind::LibraryNotFound, MessageKey::NoSuchLibrary),
                );
                return Ok((None, None));
            }
            Err(e) => return Err(e.into()),
        };

        match self.parameters.validate(submission.parameters.as_deref()) {
            Ok(document) => Ok((Some(library), Some(document))),
            Err(e) => {
                let (kind, key) = match e {
                    ParameterError::Missing => {
                        (FieldErrorKind::MissingParameters, MessageKey::NoParameters)
                    }
                    ParameterError::Invalid(_) => {
                        (FieldErrorKind::InvalidParameters, MessageKey::InvalidParameters)
                    }
                };
                debug!(library = %library, error = %e, "parameters refused");
                errors.insert(Field::Editor, self.field_error(kind, key));
                Ok((Some(library), None))
            }
        }
    }

    fn discard(&self, staged: &StagingRef) {
        match self.packages.staging().discard(staged) {
            Ok(_) => debug!(path = ?staged.path, "staged package discarded"),
            Err(e) => warn!(path = ?staged.path, error = %e, "failed to discard staged package"),
        }
    }
}
