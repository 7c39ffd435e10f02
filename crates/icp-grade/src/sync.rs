use std::sync::Arc;

use icp_types::{ContentId, CourseId};
use tracing::debug;

use crate::error::GradeResult;
use crate::traits::GradeStore;

/// Module type under which the host files this plugin's grade items.
pub const DEFAULT_MODULE_TYPE: &str = "icp";

/// Reads the grading ceiling the host has stored for a content instance.
#[derive(Clone)]
pub struct GradeSynchronizer {
    store: Arc<dyn GradeStore>,
    module_type: String,
}

impl GradeSynchronizer {
    pub fn new(store: Arc<dyn GradeStore>, module_type: impl Into<String>) -> Self {
        Self {
            store,
            module_type: module_type.into(),
        }
    }

    pub fn module_type(&self) -> &str {
        &self.module_type
    }

    /// The stored maximum grade for `content_id` in `course_id`.
    ///
    /// Returns `Ok(None)` when there is no grade item or the item has no
    /// ceiling; the caller then keeps its own default.
    pub fn lookup_max_grade(
        &self,
        content_id: ContentId,
        course_id: CourseId,
    ) -> GradeResult<Option<f64>> {
        let item = self.store.read(&self.module_type, content_id, course_id)?;
        let max_grade = item.and_then(|item| item.max_grade);
        debug!(
            content = %content_id,
            course = %course_id,
            max_grade = ?max_grade,
            "grade item lookup"
        );
        Ok(max_grade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GradeError;
    use crate::item::GradeItem;
    use crate::memory::InMemoryGradeStore;

    struct FailingStore;

    impl GradeStore for FailingStore {
        fn read(&self, _: &str, _: ContentId, _: CourseId) -> GradeResult<Option<GradeItem>> {
            Err(GradeError::Unavailable("database offline".into()))
        }
    }

    fn item(module_type: &str, max_grade: Option<f64>) -> GradeItem {
        GradeItem {
            course_id: CourseId(3),
            module_type: module_type.into(),
            instance_id: ContentId(11),
            max_grade,
        }
    }

    #[test]
    fn returns_stored_ceiling() {
        let store = InMemoryGradeStore::from_items([item(DEFAULT_MODULE_TYPE, Some(42.5))]);
        let sync = GradeSynchronizer::new(Arc::new(store), DEFAULT_MODULE_TYPE);
        assert_eq!(
            sync.lookup_max_grade(ContentId(11), CourseId(3)).unwrap(),
            Some(42.5)
        );
    }

    #[test]
    fn missing_item_signals_absence() {
        let sync = GradeSynchronizer::new(Arc::new(InMemoryGradeStore::new()), DEFAULT_MODULE_TYPE);
        assert_eq!(sync.lookup_max_grade(ContentId(11), CourseId(3)).unwrap(), None);
    }

    #[test]
    fn item_without_ceiling_signals_absence() {
        let store = InMemoryGradeStore::from_items([item(DEFAULT_MODULE_TYPE, None)]);
        let sync = GradeSynchronizer::new(Arc::new(store), DEFAULT_MODULE_TYPE);
        assert_eq!(sync.lookup_max_grade(ContentId(11), CourseId(3)).unwrap(), None);
    }

    #[test]
    fn other_module_types_are_not_consulted() {
        let store = InMemoryGradeStore::from_items([item("quiz", Some(100.0))]);
        let sync = GradeSynchronizer::new(Arc::new(store), DEFAULT_MODULE_TYPE);
        assert_eq!(sync.lookup_max_grade(ContentId(11), CourseId(3)).unwrap(), None);
    }

    #[test]
    fn store_failure_propagates() {
        let sync = GradeSynchronizer::new(Arc::new(FailingStore), DEFAULT_MODULE_TYPE);
        assert!(matches!(
            sync.lookup_max_grade(ContentId(1), CourseId(1)),
            Err(GradeError::Unavailable(_))
        ));
    }
}
