use crate::config::PrinterConfig;
use crate::error::HfindError;
use crate::translator::ExprToken;

// ---------------------------------------------------------------------------
// CommandLine
// ---------------------------------------------------------------------------

/// Result of scanning argv: the root path, the ordered expression tokens,
/// and the process-wide output configuration.
#[derive(Debug, Default)]
pub struct CommandLine {
    pub path: Option<String>,
    pub tokens: Vec<ExprToken>,
    pub config: PrinterConfig,
    pub help: bool,
}

/// Primaries that consume the following token as their argument.
const PRIMARIES_WITH_ARG: &[&str] = &[
    "name", "type", "user", "group", "size", "mtime", "newer", "perm",
];

/// Primaries that stand alone.
const PRIMARIES_NO_ARG: &[&str] = &["nouser", "nogroup", "prune", "depth", "print"];

// ---------------------------------------------------------------------------
// scan
// ---------------------------------------------------------------------------

/// Scan the raw argument list.
///
/// The expression grammar is position-sensitive, so primaries and operators
/// are collected as ordered tokens and handed to the translator untouched.
/// `-print0`, `-delete` and `-verbose` configure the run rather than the
/// expression and may appear anywhere. The first bare argument is the root
/// path; a second one is an error, reported the way find(1) reports it.
pub fn scan<I>(args: I) -> Result<CommandLine, HfindError>
where
    I: IntoIterator<Item = String>,
{
    let mut line = CommandLine::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => line.help = true,
            "-a" => line.tokens.push(ExprToken::And),
            "-o" => line.tokens.push(ExprToken::Or),
            "-print0" => line.config.end_line_with_null = true,
            "-delete" => line.config.delete_mode = true,
            "-verbose" => line.config.verbose = true,
            flag if flag.starts_with('-') => {
                let name = &flag[1..];
                if let Some(&name) = PRIMARIES_WITH_ARG.iter().find(|&&p| p == name) {
                    let value = args.next().ok_or(HfindError::MissingArgument(name))?;
                    line.tokens.push(ExprToken::Primary {
                        name: name.to_string(),
                        arg: Some(value),
                    });
                } else if PRIMARIES_NO_ARG.contains(&name) {
                    line.tokens.push(ExprToken::Primary {
                        name: name.to_string(),
                        arg: None,
                    });
                } else {
                    return Err(HfindError::UnknownOption(flag.to_string()));
                }
            }
            bare => {
                if line.path.is_some() {
                    // find(1) complains about the first extra argument only.
                    return Err(HfindError::UnknownOption(bare.to_string()));
                }
                line.path = Some(bare.to_string());
            }
        }
    }
    Ok(line)
}

// ---------------------------------------------------------------------------
// usage
// ---------------------------------------------------------------------------

pub fn usage() -> String {
    "\
usage: hfind [path] [expression]

Walks the directory tree under path, evaluating the expression for every
entry. Consecutive primaries are joined with an implicit AND; evaluation
short-circuits, so actions only fire when reached.

Primaries:
  -name pattern   true if the last component of the path matches pattern
  -type f|d       true if the entry is a regular file or a directory
  -user name      true if the entry belongs to the named user
  -group name     true if the entry belongs to the named group
  -nouser         true if the entry belongs to an unknown user
  -nogroup        true if the entry belongs to an unknown group
  -size [+-]n[c]  true if the size in 512-byte blocks (rounded up), or in
                  bytes with the c suffix, compares to n
  -mtime [+-]n    true if the age in whole days compares to n
  -newer path     true if modified more recently than the named file
  -perm [-]mode   true if the permission bits match mode (octal or
                  symbolic); with a leading -, at least all mode bits
  -print          always true; writes the current path to standard output
  -prune          always true; do not descend into the current directory
                  (no effect in depth mode)
  -depth          always true; visit directory contents before the
                  directory itself, for the whole run

Operators:
  -a              logical AND (implied between consecutive primaries)
  -o              logical OR

Flags:
  -print0         terminate printed paths with NUL instead of newline
  -delete         remove matched entries after they are fully processed
  -verbose        verbose logging
  -h, --help      print this message

Environment:
  HFIND_NAMENODE_URL   backing store, http(s)://host:port for WebHDFS or
                       file:/// for the local filesystem
  HFIND_USER           remote user name for backing-store calls
"
    .to_string()
}
