use icp_types::{ContentId, CourseId};
use serde::{Deserialize, Serialize};

/// Lookup key for a grade item: module type, activity instance, and course.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemKey {
    pub module_type: String,
    pub instance_id: ContentId,
    pub course_id: CourseId,
}

impl ItemKey {
    pub fn new(module_type: impl Into<String>, instance_id: ContentId, course_id: CourseId) -> Self {
        Self {
            module_type: module_type.into(),
            instance_id,
            course_id,
        }
    }
}

/// A host-owned grade item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradeItem {
    pub course_id: CourseId,
    pub module_type: String,
    pub instance_id: ContentId,
    /// Grading ceiling, if the host has set one.
    pub max_grade: Option<f64>,
}

impl GradeItem {
    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.module_type.clone(), self.instance_id, self.course_id)
    }
}
