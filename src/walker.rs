use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::config::PrinterConfig;
use crate::entry::FileEntry;
use crate::error::HfindError;
use crate::expr::Expression;
use crate::fs::{FileStatus, FileSystem};
use crate::primary::EvalContext;
use crate::printer::Printer;

/// Depth-first traversal driving expression evaluation.
///
/// Owns the traversal state but not the filesystem contents: every visited
/// path yields one [`FileEntry`] snapshot, evaluated once (pre-order by
/// default, post-order in depth mode) and then discarded.
pub struct Walker<'a> {
    fs: &'a dyn FileSystem,
    expression: &'a Expression,
    config: &'a PrinterConfig,
    printer: &'a mut Printer,
    depth_mode: bool,
    now: DateTime<Utc>,
}

impl<'a> Walker<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        expression: &'a Expression,
        config: &'a PrinterConfig,
        printer: &'a mut Printer,
    ) -> Self {
        let depth_mode = config.depth_mode || expression.uses_depth();
        Self {
            fs,
            expression,
            config,
            printer,
            depth_mode,
            now: Utc::now(),
        }
    }

    /// Walk from `root`. A root that cannot be stat'ed is fatal; failures
    /// below it are per-entry and skip only the affected subtree.
    pub fn run(&mut self, root: &Path) -> Result<(), HfindError> {
        let status = self.fs.stat(root)?;
        self.visit(root.to_path_buf(), status)?;
        self.printer.flush();
        Ok(())
    }

    fn visit(&mut self, path: PathBuf, status: FileStatus) -> Result<(), HfindError> {
        let entry = FileEntry::new(path, status);
        let mut matched = false;
        let mut pruned = false;

        if !self.depth_mode {
            (matched, pruned) = self.evaluate(&entry);
        }

        // Prune only blocks descent in pre-order mode; depth mode visits
        // children regardless.
        if entry.is_dir() && (self.depth_mode || !pruned) {
            self.descend(&entry.path)?;
        }

        if self.depth_mode {
            (matched, _) = self.evaluate(&entry);
        }

        // Children are already visited here in both traversal orders, so a
        // directory is never deleted before its contents were acted on.
        if self.config.delete_mode && matched {
            self.remove(&entry.path)?;
        }
        Ok(())
    }

    fn evaluate(&mut self, entry: &FileEntry) -> (bool, bool) {
        debug!(path = %entry.path.display(), "visiting");
        let mut ctx = EvalContext {
            printer: &mut *self.printer,
            now: self.now,
            depth_mode: self.depth_mode,
            pruned: false,
        };
        let matched = self.expression.evaluate(entry, &mut ctx);
        (matched, ctx.pruned)
    }

    fn descend(&mut self, dir: &Path) -> Result<(), HfindError> {
        let children = match self.fs.list_children(dir) {
            Ok(children) => children,
            Err(e) if e.is_recoverable() => {
                warn!(path = %dir.display(), error = %e, "skipping unreadable directory");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        for child in children {
            let status = match self.fs.stat(&child) {
                Ok(status) => status,
                Err(e) if e.is_recoverable() => {
                    warn!(path = %child.display(), error = %e, "skipping entry");
                    continue;
                }
                Err(e) => return Err(e),
            };
            self.visit(child, status)?;
        }
        Ok(())
    }

    fn remove(&mut self, path: &Path) -> Result<(), HfindError> {
        match self.fs.delete(path) {
            Ok(()) => {
                debug!(path = %path.display(), "deleted");
                Ok(())
            }
            Err(e) if e.is_recoverable() => {
                warn!(path = %path.display(), error = %e, "delete failed");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
