//! # hfind
//!
//! find(1) for remote filesystems: walk a directory tree, evaluate a boolean
//! expression of predicates and actions for every entry, and fire side
//! effects (print, prune, delete) in evaluation order.
//!
//! The command line is a flat sequence of primaries (`-name`, `-type`,
//! `-print`, ...) joined by implicit AND or explicit `-a`/`-o`. The
//! [`translator`] folds that sequence into a right-associative
//! [`Expression`] tree; the [`Walker`] drives a depth-first traversal over a
//! pluggable [`FileSystem`] backend and evaluates the tree once per visited
//! entry. Evaluation is lazy: a failing AND link suppresses everything to
//! its right, side effects included, which is what makes
//! `-type f -name "*.log" -print` behave the way find(1) users expect.
//!
//! Two backends ship with the crate: [`WebHdfsClient`] for stores speaking
//! the WebHDFS REST API, and [`LocalFs`] for the local filesystem.
//!
//! # Example
//!
//! ```rust
//! use std::path::{Path, PathBuf};
//!
//! use chrono::Utc;
//! use hfind::translator::{self, ExprToken};
//! use hfind::{
//!     EntryKind, EvalContext, FileEntry, FileStatus, FileSystem, HfindError, Printer,
//! };
//!
//! // A stub backing store; a real run would use WebHdfsClient or LocalFs.
//! struct EmptyFs;
//!
//! impl FileSystem for EmptyFs {
//!     fn stat(&self, path: &Path) -> Result<FileStatus, HfindError> {
//!         Err(HfindError::NotFound(path.to_path_buf()))
//!     }
//!     fn list_children(&self, path: &Path) -> Result<Vec<PathBuf>, HfindError> {
//!         Err(HfindError::NotFound(path.to_path_buf()))
//!     }
//!     fn delete(&self, path: &Path) -> Result<(), HfindError> {
//!         Err(HfindError::NotFound(path.to_path_buf()))
//!     }
//! }
//!
//! // -type f -a -name *.log -a -print
//! let tokens = vec![
//!     ExprToken::primary("type", Some("f")),
//!     ExprToken::And,
//!     ExprToken::primary("name", Some("*.log")),
//!     ExprToken::And,
//!     ExprToken::primary("print", None),
//! ];
//! let expression = translator::build(&tokens, &EmptyFs).unwrap();
//!
//! let entry = FileEntry::new(
//!     PathBuf::from("/data/a.log"),
//!     FileStatus {
//!         kind:        EntryKind::File,
//!         size:        300,
//!         modified:    Utc::now(),
//!         owner:       "webuser".to_string(),
//!         group:       "supergroup".to_string(),
//!         permissions: 0o644,
//!     },
//! );
//!
//! let mut printer = Printer::new(Box::new(Vec::<u8>::new()), false);
//! let mut ctx = EvalContext {
//!     printer: &mut printer,
//!     now: Utc::now(),
//!     depth_mode: false,
//!     pruned: false,
//! };
//! assert!(expression.evaluate(&entry, &mut ctx));
//! ```

#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod entry;
pub mod error;
pub mod expr;
pub mod fs;
pub mod localfs;
pub mod primary;
pub mod printer;
pub mod translator;
pub mod walker;
pub mod webhdfs;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use config::{HfindConfig, PrinterConfig};
pub use entry::{EntryKind, FileEntry};
pub use error::HfindError;
pub use expr::{Expression, Operand};
pub use fs::{connect, FileStatus, FileSystem};
pub use localfs::LocalFs;
pub use primary::{Cmp, EvalContext, PermMatch, Primary, SizeUnit};
pub use printer::Printer;
pub use translator::ExprToken;
pub use walker::Walker;
pub use webhdfs::WebHdfsClient;
