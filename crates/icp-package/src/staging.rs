use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{PackageError, PackageResult};

/// Attempts at minting a fresh name before giving up.
const MAX_NAME_ATTEMPTS: usize = 4;

/// A validated package written to the staging area, not yet committed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingRef {
    pub path: PathBuf,
    /// Random token embedded in the file name.
    pub token: Uuid,
    /// BLAKE3 digest of the staged bytes, hex-encoded.
    pub digest: String,
    pub size: u64,
    pub staged_at: DateTime<Utc>,
}

/// Directory that receives validated packages.
///
/// File names are `icp-<uuid-v4>.h5p` and are created with `create_new`, so
/// two writers can never end up sharing a file even when they run in
/// different processes against the same directory.
#[derive(Clone, Debug)]
pub struct StagingArea {
    root: PathBuf,
}

impl StagingArea {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` to a freshly named staging file.
    pub fn stage(&self, bytes: &[u8]) -> PackageResult<StagingRef> {
        fs::create_dir_all(&self.root).map_err(|source| PackageError::StagingIo {
            path: self.root.clone(),
            source,
        })?;

        let mut last_path = self.root.clone();
        for _ in 0..MAX_NAME_ATTEMPTS {
            let token = Uuid::new_v4();
            let path = self.root.join(format!("icp-{token}.h5p"));
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    warn!(path = ?path, "staging name already taken, minting another");
                    last_path = path;
                    continue;
                }
                Err(source) => return Err(PackageError::StagingIo { path, source }),
            };

            if let Err(source) = file.write_all(bytes).and_then(|_| file.sync_all()) {
                let _ = fs::remove_file(&path);
                return Err(PackageError::StagingIo { path, source });
            }

            let staged = StagingRef {
                digest: hex::encode(blake3::hash(bytes).as_bytes()),
                size: bytes.len() as u64,
                staged_at: Utc::now(),
                token,
                path,
            };
            debug!(path = ?staged.path, size = staged.size, "package staged");
            return Ok(staged);
        }

        Err(PackageError::StagingIo {
            path: last_path,
            source: io::Error::new(
                io::ErrorKind::AlreadyExists,
                "could not mint an unused staging name",
            ),
        })
    }

    /// Remove a staged package. Returns `true` if the file existed.
    pub fn discard(&self, staged: &StagingRef) -> io::Result<bool> {
        match fs::remove_file(&staged.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}
