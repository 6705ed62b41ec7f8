#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};

use hfind::translator::{self, ExprToken};
use hfind::{EntryKind, FileStatus, FileSystem, HfindError, Printer, PrinterConfig, Walker};

// ---------------------------------------------------------------------------
// MemFs
// ---------------------------------------------------------------------------

/// In-memory backing-store double.
///
/// Built with the chained `dir`/`file` helpers; records deletions in call
/// order so tests can assert that directories go after their children.
/// `deny` makes stat fail recoverably for a path, `outage` makes it fail
/// like a lost connection.
pub struct MemFs {
    entries: RefCell<BTreeMap<PathBuf, FileStatus>>,
    denied: BTreeSet<PathBuf>,
    outages: BTreeSet<PathBuf>,
    deleted: RefCell<Vec<PathBuf>>,
}

impl MemFs {
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(BTreeMap::new()),
            denied: BTreeSet::new(),
            outages: BTreeSet::new(),
            deleted: RefCell::new(Vec::new()),
        }
    }

    /// A fixed modification time all entries share unless overridden.
    pub fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2011, 11, 1, 12, 0, 0).unwrap()
    }

    pub fn dir(self, path: &str) -> Self {
        let status = Self::status(EntryKind::Dir, 0);
        self.with(path, status)
    }

    pub fn file(self, path: &str, size: u64) -> Self {
        let status = Self::status(EntryKind::File, size);
        self.with(path, status)
    }

    pub fn with(self, path: &str, status: FileStatus) -> Self {
        self.entries
            .borrow_mut()
            .insert(PathBuf::from(path), status);
        self
    }

    /// Make stat fail with permission denied for this path.
    pub fn deny(mut self, path: &str) -> Self {
        self.denied.insert(PathBuf::from(path));
        self
    }

    /// Make stat fail like a lost connection for this path.
    pub fn outage(mut self, path: &str) -> Self {
        self.outages.insert(PathBuf::from(path));
        self
    }

    pub fn status(kind: EntryKind, size: u64) -> FileStatus {
        FileStatus {
            kind,
            size,
            modified: Self::base_time(),
            owner: "webuser".to_string(),
            group: "supergroup".to_string(),
            permissions: if kind == EntryKind::Dir { 0o755 } else { 0o644 },
        }
    }

    /// Paths deleted so far, in deletion order.
    pub fn deletions(&self) -> Vec<PathBuf> {
        self.deleted.borrow().clone()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.borrow().contains_key(Path::new(path))
    }
}

impl FileSystem for MemFs {
    fn stat(&self, path: &Path) -> Result<FileStatus, HfindError> {
        if self.outages.contains(path) {
            return Err(HfindError::Connection("connection refused".to_string()));
        }
        if self.denied.contains(path) {
            return Err(HfindError::PermissionDenied(path.to_path_buf()));
        }
        self.entries
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| HfindError::NotFound(path.to_path_buf()))
    }

    fn list_children(&self, path: &Path) -> Result<Vec<PathBuf>, HfindError> {
        if !self.entries.borrow().contains_key(path) {
            return Err(HfindError::NotFound(path.to_path_buf()));
        }
        Ok(self
            .entries
            .borrow()
            .keys()
            .filter(|candidate| candidate.parent() == Some(path))
            .cloned()
            .collect())
    }

    fn delete(&self, path: &Path) -> Result<(), HfindError> {
        if self.entries.borrow_mut().remove(path).is_none() {
            return Err(HfindError::NotFound(path.to_path_buf()));
        }
        self.deleted.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Output capture
// ---------------------------------------------------------------------------

/// A `Write` handle into a shared buffer, so tests can read back what the
/// printer wrote.
#[derive(Clone)]
pub struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("printed paths should be utf-8")
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A printer writing into a shared buffer, plus the handle to read it back.
pub fn capture(end_line_with_null: bool) -> (Printer, SharedBuf) {
    let buf = SharedBuf(Rc::new(RefCell::new(Vec::new())));
    (Printer::new(Box::new(buf.clone()), end_line_with_null), buf)
}

// ---------------------------------------------------------------------------
// Walk runner
// ---------------------------------------------------------------------------

/// Translate `tokens`, walk `root`, and hand back the result with whatever
/// was printed.
pub fn walk(
    fs: &MemFs,
    tokens: &[ExprToken],
    config: PrinterConfig,
    root: &str,
) -> (Result<(), HfindError>, SharedBuf) {
    let expression = translator::build(tokens, fs).expect("expression should build");
    let (mut printer, buf) = capture(config.end_line_with_null);
    let result = Walker::new(fs, &expression, &config, &mut printer).run(Path::new(root));
    (result, buf)
}
