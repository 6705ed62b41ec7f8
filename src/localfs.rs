use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::entry::EntryKind;
use crate::error::HfindError;
use crate::fs::{FileStatus, FileSystem};

/// Backing store over the local filesystem, selected by a `file://` URL.
///
/// The remote stores this tool targets report owner and group as plain
/// strings with no passwd database behind them; to keep `-user`/`-group`
/// consistent across backends, LocalFs reports numeric uid/gid strings on
/// Unix and empty strings elsewhere. Symlinks are not followed and classify
/// as files for `-type` purposes.
#[derive(Debug, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn stat(&self, path: &Path) -> Result<FileStatus, HfindError> {
        let meta = fs::symlink_metadata(path).map_err(|e| io_error(path, e))?;
        let modified = meta
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        let (owner, group, permissions) = ownership(&meta);
        Ok(FileStatus {
            kind: if meta.is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::File
            },
            size: meta.len(),
            modified,
            owner,
            group,
            permissions,
        })
    }

    fn list_children(&self, path: &Path) -> Result<Vec<PathBuf>, HfindError> {
        let mut children = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| io_error(path, e))? {
            let entry = entry.map_err(|e| io_error(path, e))?;
            children.push(entry.path());
        }
        children.sort();
        Ok(children)
    }

    fn delete(&self, path: &Path) -> Result<(), HfindError> {
        let meta = fs::symlink_metadata(path).map_err(|e| io_error(path, e))?;
        let removed = if meta.is_dir() {
            fs::remove_dir(path)
        } else {
            fs::remove_file(path)
        };
        removed.map_err(|e| io_error(path, e))
    }
}

fn io_error(path: &Path, source: io::Error) -> HfindError {
    match source.kind() {
        io::ErrorKind::NotFound => HfindError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => HfindError::PermissionDenied(path.to_path_buf()),
        _ => HfindError::Io {
            path: path.to_path_buf(),
            source,
        },
    }
}

#[cfg(unix)]
fn ownership(meta: &fs::Metadata) -> (String, String, u32) {
    use std::os::unix::fs::MetadataExt;
    (
        meta.uid().to_string(),
        meta.gid().to_string(),
        meta.mode() & 0o7777,
    )
}

#[cfg(not(unix))]
fn ownership(_meta: &fs::Metadata) -> (String, String, u32) {
    (String::new(), String::new(), 0)
}
