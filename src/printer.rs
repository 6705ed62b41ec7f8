use std::io::{self, Write};
use std::path::Path;

use tracing::warn;

use crate::config::PrinterConfig;

/// Sink for the `-print` primary.
///
/// Kept outside the predicate logic: primaries decide *whether* a path is
/// written, the printer decides *how*. Paths are terminated with a newline,
/// or with NUL when `-print0` is in effect.
pub struct Printer {
    out: Box<dyn Write>,
    terminator: u8,
}

impl Printer {
    pub fn new(out: Box<dyn Write>, end_line_with_null: bool) -> Self {
        let terminator = if end_line_with_null { 0 } else { b'\n' };
        Self { out, terminator }
    }

    /// Printer writing to standard output, configured per the run.
    pub fn stdout(config: &PrinterConfig) -> Self {
        Self::new(Box::new(io::stdout()), config.end_line_with_null)
    }

    /// Write one matched path. Sink failures are reported but do not change
    /// the expression result.
    pub fn print(&mut self, path: &Path) {
        let line = path.to_string_lossy();
        let written = self
            .out
            .write_all(line.as_bytes())
            .and_then(|()| self.out.write_all(&[self.terminator]));
        if let Err(e) = written {
            warn!(path = %path.display(), error = %e, "failed to write match");
        }
    }

    pub fn flush(&mut self) {
        let _ = self.out.flush();
    }
}
