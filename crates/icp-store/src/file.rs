use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle to a draft area holding files the author attached.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftRef(pub String);

impl DraftRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A blank handle means no draft area was attached at all.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for DraftRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single file in a draft area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DraftFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl DraftFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Where a draft should be made permanent: component, file area, and item.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermanentContext {
    pub component: String,
    pub area: String,
    pub item_id: u64,
}

impl PermanentContext {
    /// The area that holds uploaded packages for a content instance.
    pub fn package(item_id: u64) -> Self {
        Self {
            component: "mod_icp".into(),
            area: "package".into(),
            item_id,
        }
    }
}

/// Handle to a file copied out of a draft area.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermanentRef {
    pub context: PermanentContext,
    pub filename: String,
}

impl fmt::Display for PermanentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.context.component, self.context.area, self.context.item_id, self.filename
        )
    }
}
