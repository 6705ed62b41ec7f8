use std::env;

// ---------------------------------------------------------------------------
// HfindConfig
// ---------------------------------------------------------------------------

/// Environment variable naming the backing store, e.g.
/// `http://namenode:9870` (WebHDFS) or `file:///` (local filesystem).
pub const NAMENODE_URL_ENV: &str = "HFIND_NAMENODE_URL";

/// Environment variable naming the remote user for backing-store calls.
pub const USER_ENV: &str = "HFIND_USER";

const DEFAULT_NAMENODE_URL: &str = "http://localhost:9870";

/// Connection settings for the backing store, read once at startup.
#[derive(Debug, Clone)]
pub struct HfindConfig {
    pub namenode_url: String,
    pub user: Option<String>,
}

impl HfindConfig {
    /// Load from the environment. The remote user falls back to the local
    /// `USER` when `HFIND_USER` is unset.
    pub fn from_env() -> Self {
        let namenode_url = env::var(NAMENODE_URL_ENV)
            .unwrap_or_else(|_| DEFAULT_NAMENODE_URL.to_string());
        let user = env::var(USER_ENV).ok().or_else(|| env::var("USER").ok());
        Self { namenode_url, user }
    }
}

// ---------------------------------------------------------------------------
// PrinterConfig
// ---------------------------------------------------------------------------

/// Process-wide output and traversal switches, set by the command line and
/// read-only once the run starts.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrinterConfig {
    /// Visit a directory's children before the directory itself. Switched on
    /// by a `-depth` primary anywhere in the expression; disables `-prune`'s
    /// descent-skipping for the whole run.
    pub depth_mode: bool,

    /// Terminate printed paths with NUL instead of newline (`-print0`).
    pub end_line_with_null: bool,

    /// Remove every matched entry from the backing store after it has been
    /// fully processed (`-delete`).
    pub delete_mode: bool,

    /// Raise the default log level (`-verbose`).
    pub verbose: bool,
}
