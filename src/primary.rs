use std::path::Path;

use chrono::{DateTime, Utc};
use glob::Pattern;

use crate::entry::{EntryKind, FileEntry};
use crate::error::HfindError;
use crate::fs::FileSystem;
use crate::printer::Printer;

// ---------------------------------------------------------------------------
// Argument grammars
// ---------------------------------------------------------------------------

/// Comparison direction for numeric primaries: `+n` means more than, `-n`
/// fewer than, bare `n` exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmp {
    Exactly,
    MoreThan,
    FewerThan,
}

/// Unit for `-size`: 512-byte blocks by default, bytes with the `c` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    Block512,
    Bytes,
}

/// How `-perm` compares the template against an entry's permission bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermMatch {
    /// Bits must match the template exactly.
    Exact,
    /// At least all template bits must be set (`-`-prefixed mode).
    AtLeast,
}

// ---------------------------------------------------------------------------
// EvalContext
// ---------------------------------------------------------------------------

/// Context threaded through one entry's evaluation: the output sink plus the
/// walk-control signals primaries raise as side effects.
pub struct EvalContext<'a> {
    pub printer: &'a mut Printer,

    /// The run's initialization time; `-mtime` ages are relative to this.
    pub now: DateTime<Utc>,

    /// Depth mode disables `-prune`'s descent-skipping.
    pub depth_mode: bool,

    /// Set when a `-prune` primary fires on the current entry.
    pub pruned: bool,
}

// ---------------------------------------------------------------------------
// Primary
// ---------------------------------------------------------------------------

/// A single predicate or action from the command line.
///
/// A closed set: each variant carries its parsed argument and is immutable
/// once constructed by [`Primary::parse`]. Evaluation dispatches on the tag,
/// so the compiler checks the set exhaustively.
#[derive(Debug, Clone)]
pub enum Primary {
    /// True when the last component of the path matches the glob pattern.
    Name(Pattern),
    /// True when the entry is of the given kind.
    Type(EntryKind),
    /// True when the entry belongs to the named user.
    User(String),
    /// True when the entry belongs to the named group.
    Group(String),
    /// True when the entry's size, in the given unit, compares as requested.
    /// Block sizes round up to the next whole 512-byte block.
    Size(u64, SizeUnit, Cmp),
    /// True when the entry's age in whole days compares as requested.
    MTime(i64, Cmp),
    /// True when the entry was modified after the reference file. The
    /// reference's modification time is frozen at construction.
    Newer(DateTime<Utc>),
    /// True when the entry's permission bits match the template.
    Perm(u32, PermMatch),
    /// True when the backing store reports no owner for the entry.
    NoUser,
    /// True when the backing store reports no group for the entry.
    NoGroup,
    /// Always true; tells the walker not to descend into the current entry
    /// (ignored in depth mode).
    Prune,
    /// Always true; its presence anywhere in the expression switches the
    /// whole run to post-order traversal.
    Depth,
    /// Always true; writes the entry's path to the configured sink.
    Print,
    /// Always true, no side effect. Synthetic right-hand filler for the
    /// final primary of an expression.
    AlwaysMatch,
}

impl Primary {
    /// Build a primary from its flag name and raw argument.
    ///
    /// `fs` is consulted only by `-newer`, which resolves the reference
    /// file's modification time here, once, for the life of the run.
    pub fn parse(
        name: &str,
        arg: Option<&str>,
        fs: &dyn FileSystem,
    ) -> Result<Self, HfindError> {
        match name {
            "name" => {
                let arg = required("name", arg)?;
                let pattern = Pattern::new(arg).map_err(|_| invalid("name", arg))?;
                Ok(Self::Name(pattern))
            }
            "type" => match required("type", arg)? {
                "f" => Ok(Self::Type(EntryKind::File)),
                "d" => Ok(Self::Type(EntryKind::Dir)),
                other => Err(invalid("type", other)),
            },
            "user" => Ok(Self::User(required("user", arg)?.to_string())),
            "group" => Ok(Self::Group(required("group", arg)?.to_string())),
            "size" => parse_size(required("size", arg)?),
            "mtime" => parse_mtime(required("mtime", arg)?),
            "newer" => {
                let arg = required("newer", arg)?;
                let status = fs.stat(Path::new(arg))?;
                Ok(Self::Newer(status.modified))
            }
            "perm" => parse_perm(required("perm", arg)?),
            "nouser" => Ok(Self::NoUser),
            "nogroup" => Ok(Self::NoGroup),
            "prune" => Ok(Self::Prune),
            "depth" => Ok(Self::Depth),
            "print" => Ok(Self::Print),
            other => Err(HfindError::UnknownOption(format!("-{other}"))),
        }
    }

    /// Evaluate against one entry.
    ///
    /// Predicates are pure; `print` and `prune` raise their side effects
    /// through `ctx` and always return true.
    pub fn evaluate(&self, entry: &FileEntry, ctx: &mut EvalContext<'_>) -> bool {
        match self {
            Self::Name(pattern) => pattern.matches(&entry.name),
            Self::Type(kind) => entry.kind == *kind,
            Self::User(user) => entry.owner == *user,
            Self::Group(group) => entry.group == *group,
            Self::Size(n, unit, cmp) => {
                let measured = match unit {
                    SizeUnit::Bytes => entry.size,
                    SizeUnit::Block512 => entry.size.div_ceil(512),
                };
                compare(measured as i64, *n as i64, *cmp)
            }
            Self::MTime(days, cmp) => {
                let age_days = (ctx.now - entry.modified).num_seconds() / 86_400;
                compare(age_days, *days, *cmp)
            }
            Self::Newer(reference) => entry.modified > *reference,
            Self::Perm(template, mode) => match mode {
                PermMatch::Exact => entry.permissions == *template,
                PermMatch::AtLeast => entry.permissions & *template == *template,
            },
            Self::NoUser => entry.owner.is_empty(),
            Self::NoGroup => entry.group.is_empty(),
            Self::Print => {
                ctx.printer.print(&entry.path);
                true
            }
            Self::Prune => {
                if !ctx.depth_mode {
                    ctx.pruned = true;
                }
                true
            }
            Self::Depth | Self::AlwaysMatch => true,
        }
    }
}

fn compare(measured: i64, n: i64, cmp: Cmp) -> bool {
    match cmp {
        Cmp::Exactly => measured == n,
        Cmp::MoreThan => measured > n,
        Cmp::FewerThan => measured < n,
    }
}

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

fn required<'a>(primary: &'static str, arg: Option<&'a str>) -> Result<&'a str, HfindError> {
    arg.ok_or(HfindError::MissingArgument(primary))
}

fn invalid(primary: &'static str, value: &str) -> HfindError {
    HfindError::InvalidArgument {
        primary,
        value: value.to_string(),
    }
}

/// `[+-]n[c]`: n 512-byte blocks, or n bytes with the `c` suffix.
fn parse_size(arg: &str) -> Result<Primary, HfindError> {
    let (cmp, rest) = split_cmp(arg);
    let (unit, digits) = match rest.strip_suffix('c') {
        Some(digits) => (SizeUnit::Bytes, digits),
        None => (SizeUnit::Block512, rest),
    };
    let n = parse_number(digits).ok_or_else(|| invalid("size", arg))?;
    Ok(Primary::Size(n, unit, cmp))
}

/// `[+-]n`: age in whole days since the run started.
fn parse_mtime(arg: &str) -> Result<Primary, HfindError> {
    let (cmp, digits) = split_cmp(arg);
    let days = parse_number(digits).ok_or_else(|| invalid("mtime", arg))?;
    Ok(Primary::MTime(days as i64, cmp))
}

fn split_cmp(arg: &str) -> (Cmp, &str) {
    match arg.as_bytes().first() {
        Some(b'+') => (Cmp::MoreThan, &arg[1..]),
        Some(b'-') => (Cmp::FewerThan, &arg[1..]),
        _ => (Cmp::Exactly, arg),
    }
}

/// Strict non-negative integer: digits only, no inner signs or whitespace.
fn parse_number(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// `-perm [-]mode`: a leading hyphen means "at least these bits"; the mode
/// itself is octal (masked to 0o7777) or chmod-style symbolic.
fn parse_perm(arg: &str) -> Result<Primary, HfindError> {
    let (mode_match, mode) = match arg.strip_prefix('-') {
        Some(rest) => (PermMatch::AtLeast, rest),
        None => (PermMatch::Exact, arg),
    };
    if mode.is_empty() {
        return Err(invalid("perm", arg));
    }
    let template = if mode.bytes().all(|b| b.is_ascii_digit()) {
        u32::from_str_radix(mode, 8).map_err(|_| invalid("perm", arg))? & 0o7777
    } else {
        parse_symbolic_mode(mode).ok_or_else(|| invalid("perm", arg))?
    };
    Ok(Primary::Perm(template, mode_match))
}

/// chmod-style symbolic mode applied to an all-zero template:
/// comma-separated clauses of `[ugoa]*[+-=][rwxst]*`, ops may chain within a
/// clause. `-` cannot begin the whole mode string (that prefix is taken by
/// the at-least form), which matches the POSIX restriction.
fn parse_symbolic_mode(mode: &str) -> Option<u32> {
    let mut bits = 0u32;
    for clause in mode.split(',') {
        bits = apply_clause(bits, clause)?;
    }
    Some(bits)
}

fn apply_clause(mut bits: u32, clause: &str) -> Option<u32> {
    let op_at = clause.find(['+', '-', '='])?;
    let (who_part, mut rest) = clause.split_at(op_at);

    let (mut u, mut g, mut o) = (false, false, false);
    for c in who_part.chars() {
        match c {
            'u' => u = true,
            'g' => g = true,
            'o' => o = true,
            'a' => {
                u = true;
                g = true;
                o = true;
            }
            _ => return None,
        }
    }
    // No who-list means all of them.
    if !(u || g || o) {
        u = true;
        g = true;
        o = true;
    }

    while !rest.is_empty() {
        let op = rest.as_bytes()[0];
        rest = &rest[1..];
        let end = rest.find(['+', '-', '=']).unwrap_or(rest.len());
        let (perms, tail) = rest.split_at(end);

        let mut mask = 0u32;
        for c in perms.chars() {
            mask |= match c {
                'r' => triple(0o4, u, g, o),
                'w' => triple(0o2, u, g, o),
                'x' => triple(0o1, u, g, o),
                's' => (if u { 0o4000 } else { 0 }) | (if g { 0o2000 } else { 0 }),
                't' => 0o1000,
                _ => return None,
            };
        }

        match op {
            b'+' => bits |= mask,
            b'-' => bits &= !mask,
            b'=' => {
                bits &= !triple(0o7, u, g, o);
                bits |= mask;
            }
            _ => return None,
        }
        rest = tail;
    }
    Some(bits)
}

/// Replicate a 3-bit permission across the selected rwx triples.
fn triple(bit: u32, u: bool, g: bool, o: bool) -> u32 {
    (if u { bit << 6 } else { 0 }) | (if g { bit << 3 } else { 0 }) | (if o { bit } else { 0 })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbolic_modes() {
        assert_eq!(parse_symbolic_mode("u+rwx"), Some(0o700));
        assert_eq!(parse_symbolic_mode("u+rw,g+r,o+r"), Some(0o644));
        assert_eq!(parse_symbolic_mode("a+r"), Some(0o444));
        assert_eq!(parse_symbolic_mode("+x"), Some(0o111));
        assert_eq!(parse_symbolic_mode("ug+rw"), Some(0o660));
        assert_eq!(parse_symbolic_mode("u=rw"), Some(0o600));
        assert_eq!(parse_symbolic_mode("u+rwx-x"), Some(0o600));
        assert_eq!(parse_symbolic_mode("u+s"), Some(0o4000));
        assert_eq!(parse_symbolic_mode("g+s"), Some(0o2000));
        assert_eq!(parse_symbolic_mode("+t"), Some(0o1000));
    }

    #[test]
    fn symbolic_mode_rejects_garbage() {
        assert_eq!(parse_symbolic_mode("u"), None);
        assert_eq!(parse_symbolic_mode("z+r"), None);
        assert_eq!(parse_symbolic_mode("u+q"), None);
        assert_eq!(parse_symbolic_mode(""), None);
    }

    #[test]
    fn numeric_prefixes() {
        assert_eq!(split_cmp("3"), (Cmp::Exactly, "3"));
        assert_eq!(split_cmp("+3"), (Cmp::MoreThan, "3"));
        assert_eq!(split_cmp("-3"), (Cmp::FewerThan, "3"));
        assert_eq!(parse_number("12"), Some(12));
        assert_eq!(parse_number("+12"), None);
        assert_eq!(parse_number(""), None);
    }
}
