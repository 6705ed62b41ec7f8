use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::fs::FileStatus;

/// Immutable metadata snapshot of one visited path.
///
/// Built by the walker from a [`FileStatus`](crate::fs::FileStatus) just
/// before the expression is evaluated, and dropped as soon as evaluation
/// completes. Never shared or mutated.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Full path to the entry.
    pub path: PathBuf,

    /// Last component of the path; what `-name` matches against.
    pub name: String,

    /// Whether the entry is a regular file or a directory.
    pub kind: EntryKind,

    /// Size in bytes.
    pub size: u64,

    /// Modification time as reported by the backing store.
    pub modified: DateTime<Utc>,

    /// Owning user; empty when the backing store reports none.
    pub owner: String,

    /// Owning group; empty when the backing store reports none.
    pub group: String,

    /// Permission bits, masked to 0o7777.
    pub permissions: u32,
}

/// The kind of a visited entry. The backing stores this tool targets know
/// only files and directories; `-type` accepts exactly `f` and `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

impl FileEntry {
    pub fn new(path: PathBuf, status: FileStatus) -> Self {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => path.to_string_lossy().into_owned(),
        };
        Self {
            path,
            name,
            kind: status.kind,
            size: status.size,
            modified: status.modified,
            owner: status.owner,
            group: status.group,
            permissions: status.permissions,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}
