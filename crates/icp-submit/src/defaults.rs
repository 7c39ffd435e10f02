use icp_types::{CourseId, DisplayOptions, SubmissionMode};
use tracing::debug;

use crate::controller::SubmissionController;
use crate::error::{SubmitError, SubmitResult};
use crate::submission::{ExistingContent, SubmissionDefaults};

impl SubmissionController {
    /// The mode the form should open in.
    ///
    /// Upload is offered only when the hub is off, no content is being
    /// edited, and no runnable library is installed. The registry is
    /// consulted last.
    pub fn default_mode(&self, editing: bool) -> SubmitResult<SubmissionMode> {
        let upload = !self.config().hub_enabled
            && !editing
            && !self.resolver().registry().has_runnable()?;
        Ok(if upload {
            SubmissionMode::Upload
        } else {
            SubmissionMode::Create
        })
    }

    /// Initial form values, either for new content or for `existing`.
    pub fn defaults(
        &self,
        existing: Option<&ExistingContent>,
        course_id: CourseId,
    ) -> SubmitResult<SubmissionDefaults> {
        let config = self.config();
        let action = self.default_mode(existing.is_some())?;

        let Some(existing) = existing else {
            return Ok(SubmissionDefaults {
                maximum_grade: config.default_maximum_grade,
                action,
                library_reference: String::new(),
                parameters: "{}".into(),
                display_options: config.display_defaults,
            });
        };

        let maximum_grade = self
            .grades()
            .lookup_max_grade(existing.id, course_id)?
            .unwrap_or(config.default_maximum_grade);
        let parameters = serde_json::to_string(&existing.parameters)
            .map_err(|e| SubmitError::Serialization(e.to_string()))?;
        debug!(content = %existing.id, maximum_grade, "edit form defaults");

        Ok(SubmissionDefaults {
            maximum_grade,
            action,
            library_reference: existing.library.to_string(),
            parameters,
            display_options: DisplayOptions::from_disable(existing.disable),
        })
    }
}
