use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::config::HfindConfig;
use crate::entry::EntryKind;
use crate::error::HfindError;
use crate::localfs::LocalFs;
use crate::webhdfs::WebHdfsClient;

// ---------------------------------------------------------------------------
// FileStatus
// ---------------------------------------------------------------------------

/// Metadata for one path, as reported by the backing store.
#[derive(Debug, Clone)]
pub struct FileStatus {
    pub kind:        EntryKind,
    pub size:        u64,
    pub modified:    DateTime<Utc>,
    pub owner:       String,
    pub group:       String,
    /// Permission bits, masked to 0o7777.
    pub permissions: u32,
}

// ---------------------------------------------------------------------------
// FileSystem
// ---------------------------------------------------------------------------

/// Handle to the backing filesystem.
///
/// Implement this to point hfind at any hierarchical store that can stat a
/// path, list a directory, and delete an entry. The crate ships two
/// implementations: [`WebHdfsClient`] for remote stores speaking the WebHDFS
/// REST API, and [`LocalFs`] for the local filesystem.
///
/// # Object Safety
///
/// `FileSystem` is object-safe. The binary selects a backend at startup and
/// threads it through the translator and walker as `&dyn FileSystem`; there
/// is no process-global handle.
///
/// # Error Handling
///
/// Every call is attempted exactly once; there are no retries and no
/// timeouts. Return errors for which
/// [`is_recoverable()`](HfindError::is_recoverable) holds for per-entry
/// conditions (vanished entry, permission denied) so the walker can skip the
/// subtree and continue. Anything else aborts the run.
pub trait FileSystem {
    /// Metadata for a single path.
    fn stat(&self, path: &Path) -> Result<FileStatus, HfindError>;

    /// Full paths of a directory's children, ordered by name.
    fn list_children(&self, path: &Path) -> Result<Vec<PathBuf>, HfindError>;

    /// Remove a single entry. Directories must already be empty.
    fn delete(&self, path: &Path) -> Result<(), HfindError>;
}

// ---------------------------------------------------------------------------
// Backend selection
// ---------------------------------------------------------------------------

/// Open the backing store named by the configuration.
///
/// `http://` and `https://` URLs select the WebHDFS backend; `file://`
/// selects the local filesystem. Any other scheme is a configuration error.
pub fn connect(config: &HfindConfig) -> Result<Box<dyn FileSystem>, HfindError> {
    let url = config.namenode_url.as_str();
    if url.starts_with("file://") {
        Ok(Box::new(LocalFs::new()))
    } else if url.starts_with("http://") || url.starts_with("https://") {
        Ok(Box::new(WebHdfsClient::new(url, config.user.clone())?))
    } else {
        Err(HfindError::Config(format!(
            "unsupported filesystem url: {url}"
        )))
    }
}
