use icp_types::{ContentId, CourseId};

use crate::error::GradeResult;
use crate::item::GradeItem;

/// Read access to the host's grade items.
///
/// The submission pipeline never creates or modifies grade items, so this
/// trait has no write operations.
pub trait GradeStore: Send + Sync {
    /// Fetch the grade item for `(module_type, instance_id, course_id)`.
    ///
    /// Returns `Ok(None)` if no such item exists.
    fn read(
        &self,
        module_type: &str,
        instance_id: ContentId,
        course_id: CourseId,
    ) -> GradeResult<Option<GradeItem>>;
}
