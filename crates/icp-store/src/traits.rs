use crate::error::StoreResult;
use crate::file::{DraftFile, DraftRef, PermanentContext, PermanentRef};

/// Host file storage as seen by the submission pipeline.
///
/// Implementations must be `Send + Sync`; concurrent reads of the same draft
/// area are always safe.
pub trait FileStore: Send + Sync {
    /// List the files attached to a draft area, in upload order.
    ///
    /// An existing but empty area returns `Ok(vec![])`.
    fn draft_files(&self, draft: &DraftRef) -> StoreResult<Vec<DraftFile>>;

    /// Copy the first file of a draft area into permanent storage.
    fn copy_draft_to_permanent(
        &self,
        draft: &DraftRef,
        destination: &PermanentContext,
    ) -> StoreResult<PermanentRef>;

    /// Number of files attached to a draft area.
    ///
    /// Default implementation lists the files. Backends may override to
    /// avoid reading file content.
    fn draft_file_count(&self, draft: &DraftRef) -> StoreResult<usize> {
        self.draft_files(draft).map(|files| files.len())
    }
}
