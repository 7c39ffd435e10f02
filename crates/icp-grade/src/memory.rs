use std::collections::HashMap;
use std::sync::RwLock;

use icp_types::{ContentId, CourseId};

use crate::error::{GradeError, GradeResult};
use crate::item::{GradeItem, ItemKey};
use crate::traits::GradeStore;

/// In-memory grade store for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryGradeStore {
    items: RwLock<HashMap<ItemKey, GradeItem>>,
}

impl InMemoryGradeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: impl IntoIterator<Item = GradeItem>) -> Self {
        let map = items.into_iter().map(|item| (item.key(), item)).collect();
        Self {
            items: RwLock::new(map),
        }
    }

    /// Seed an item, as the host would when the activity is graded.
    pub fn insert(&self, item: GradeItem) -> GradeResult<()> {
        self.items
            .write()
            .map_err(|e| GradeError::Poisoned(e.to_string()))?
            .insert(item.key(), item);
        Ok(())
    }
}

impl GradeStore for InMemoryGradeStore {
    fn read(
        &self,
        module_type: &str,
        instance_id: ContentId,
        course_id: CourseId,
    ) -> GradeResult<Option<GradeItem>> {
        let items = self
            .items
            .read()
            .map_err(|e| GradeError::Poisoned(e.to_string()))?;
        Ok(items
            .get(&ItemKey::new(module_type, instance_id, course_id))
            .cloned())
    }
}
