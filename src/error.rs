use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HfindError {
    // Command line
    #[error("{0}: unknown option")]
    UnknownOption(String),

    #[error("missing argument for -{0}")]
    MissingArgument(&'static str),

    // Expression
    #[error("invalid expression")]
    InvalidExpression,

    #[error("invalid argument for -{primary}: {value}")]
    InvalidArgument {
        primary: &'static str,
        value: String,
    },

    // Backing store
    #[error("not found: {0}")]
    NotFound(PathBuf),

    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("IO error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("connection failure: {0}")]
    Connection(String),

    #[error("backing store returned {status}: {message}")]
    Backend { status: u16, message: String },

    // Config
    #[error("bad configuration: {0}")]
    Config(String),
}

impl HfindError {
    /// Process exit code for this error: 2 for command-line and expression
    /// problems, 3 for backing-store failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::UnknownOption(_)
            | Self::MissingArgument(_)
            | Self::InvalidExpression
            | Self::InvalidArgument { .. }
            | Self::Config(_) => 2,
            _ => 3,
        }
    }

    /// Whether the walk can continue after this error.
    ///
    /// Recoverable errors (entry vanished mid-walk, permission denied on a
    /// subtree) are logged per entry and that subtree is skipped. Anything
    /// else aborts the whole run.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::NotFound(_) | Self::PermissionDenied(_) | Self::Io { .. } => true,
            Self::Backend { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }

    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) | Self::Io { path: p, .. } => Some(p),
            _ => None,
        }
    }
}
