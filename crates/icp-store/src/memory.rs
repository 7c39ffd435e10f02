use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::file::{DraftFile, DraftRef, PermanentContext, PermanentRef};
use crate::traits::FileStore;

/// In-memory, HashMap-based file store.
///
/// Intended for tests and embedding. Draft areas and permanent files are
/// held behind `RwLock`s and cloned on read.
#[derive(Debug, Default)]
pub struct InMemoryFileStore {
    drafts: RwLock<HashMap<DraftRef, Vec<DraftFile>>>,
    permanent: RwLock<HashMap<PermanentRef, Vec<u8>>>,
}

impl InMemoryFileStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty draft area with a fresh random handle.
    pub fn create_draft(&self) -> StoreResult<DraftRef> {
        let draft = DraftRef::new(uuid::Uuid::new_v4().to_string());
        self.drafts
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?
            .insert(draft.clone(), Vec::new());
        Ok(draft)
    }

    /// Attach a file to an existing draft area.
    pub fn attach(&self, draft: &DraftRef, file: DraftFile) -> StoreResult<()> {
        let mut drafts = self
            .drafts
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        let files = drafts
            .get_mut(draft)
            .ok_or_else(|| StoreError::DraftNotFound(draft.to_string()))?;
        tracing::debug!(draft = %draft, file = %file.filename, size = file.size(), "draft file attached");
        files.push(file);
        Ok(())
    }

    /// Read a permanent file back (for tests and inspection).
    pub fn read_permanent(&self, reference: &PermanentRef) -> Option<Vec<u8>> {
        self.permanent
            .read()
            .ok()
            .and_then(|map| map.get(reference).cloned())
    }
}

impl FileStore for InMemoryFileStore {
    fn draft_files(&self, draft: &DraftRef) -> StoreResult<Vec<DraftFile>> {
        let drafts = self
            .drafts
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        drafts
            .get(draft)
            .cloned()
            .ok_or_else(|| StoreError::DraftNotFound(draft.to_string()))
    }

    fn copy_draft_to_permanent(
        &self,
        draft: &DraftRef,
        destination: &PermanentContext,
    ) -> StoreResult<PermanentRef> {
        let file = self
            .draft_files(draft)?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::FileMissing {
                draft: draft.to_string(),
                filename: "<none>".into(),
            })?;

        let reference = PermanentRef {
            context: destination.clone(),
            filename: file.filename,
        };
        self.permanent
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?
            .insert(reference.clone(), file.bytes);
        tracing::debug!(draft = %draft, to = %reference, "draft copied to permanent storage");
        Ok(reference)
    }
}
