mod common;

use std::fs;
use std::path::Path;

use hfind::translator::{self, ExprToken};
use hfind::{EntryKind, FileSystem, HfindError, LocalFs, PrinterConfig, Walker};

use common::capture;

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Create a temporary directory tree:
///
/// ```text
/// tmp/
///   a.log      (300 bytes)
///   notes.md
///   sub/
///     b.log    (2000 bytes)
/// ```
fn setup_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("a.log"), "x".repeat(300)).unwrap();
    fs::write(root.join("notes.md"), "some notes").unwrap();

    let sub = root.join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("b.log"), "y".repeat(2000)).unwrap();

    dir
}

fn run(
    fs: &LocalFs,
    tokens: &[ExprToken],
    config: PrinterConfig,
    root: &Path,
) -> (Result<(), HfindError>, common::SharedBuf) {
    let expression = translator::build(tokens, fs).unwrap();
    let (mut printer, buf) = capture(config.end_line_with_null);
    let result = Walker::new(fs, &expression, &config, &mut printer).run(root);
    (result, buf)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn stat_reports_kind_and_size() {
    let dir = setup_tree();
    let fs = LocalFs::new();

    let file = fs.stat(&dir.path().join("a.log")).unwrap();
    assert_eq!(file.kind, EntryKind::File);
    assert_eq!(file.size, 300);

    let root = fs.stat(dir.path()).unwrap();
    assert_eq!(root.kind, EntryKind::Dir);
}

#[test]
fn list_children_is_sorted() {
    let dir = setup_tree();
    let fs = LocalFs::new();

    let children = fs.list_children(dir.path()).unwrap();
    let names: Vec<_> = children
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.log", "notes.md", "sub"]);
}

#[test]
fn stat_missing_path_is_recoverable_not_found() {
    let fs = LocalFs::new();
    let err = fs.stat(Path::new("/no/such/path/anywhere")).unwrap_err();
    assert!(matches!(err, HfindError::NotFound(_)));
    assert!(err.is_recoverable());
}

#[test]
fn finds_log_files_end_to_end() {
    let dir = setup_tree();
    let fs = LocalFs::new();
    let tokens = vec![
        ExprToken::primary("type", Some("f")),
        ExprToken::And,
        ExprToken::primary("name", Some("*.log")),
        ExprToken::And,
        ExprToken::primary("print", None),
    ];

    let (result, out) = run(&fs, &tokens, PrinterConfig::default(), dir.path());
    result.unwrap();

    let expected = vec![
        dir.path().join("a.log").to_string_lossy().into_owned(),
        dir.path().join("sub/b.log").to_string_lossy().into_owned(),
    ];
    assert_eq!(out.lines(), expected);
}

#[test]
fn delete_mode_removes_matched_files() {
    let dir = setup_tree();
    let fs = LocalFs::new();
    let tokens = vec![ExprToken::primary("name", Some("notes.md"))];
    let config = PrinterConfig {
        delete_mode: true,
        ..PrinterConfig::default()
    };

    let (result, _out) = run(&fs, &tokens, config, dir.path());
    result.unwrap();

    assert!(!dir.path().join("notes.md").exists());
    assert!(dir.path().join("a.log").exists());
    assert!(dir.path().join("sub/b.log").exists());
}

#[test]
fn delete_mode_empties_directories_bottom_up() {
    let dir = setup_tree();
    let fs = LocalFs::new();
    let sub = dir.path().join("sub");
    let config = PrinterConfig {
        delete_mode: true,
        ..PrinterConfig::default()
    };

    // Empty expression matches everything under sub; the directory itself
    // goes last, once it is empty.
    let (result, _out) = run(&fs, &[], config, &sub);
    result.unwrap();

    assert!(!sub.exists());
    assert!(dir.path().join("a.log").exists());
}

#[test]
fn newer_against_a_real_reference_file() {
    let dir = setup_tree();
    let fs = LocalFs::new();
    let reference = dir.path().join("a.log");

    // Pin the ordering: the reference is an hour old, b.log is current.
    let hour_ago = filetime::FileTime::from_unix_time(
        filetime::FileTime::now().unix_seconds() - 3600,
        0,
    );
    filetime::set_file_mtime(&reference, hour_ago).unwrap();
    filetime::set_file_mtime(dir.path().join("notes.md"), hour_ago).unwrap();

    let tokens = vec![
        ExprToken::primary("newer", Some(&reference.to_string_lossy())),
        ExprToken::And,
        ExprToken::primary("print", None),
    ];
    let (result, out) = run(&fs, &tokens, PrinterConfig::default(), dir.path());
    result.unwrap();

    let printed = out.lines();
    assert!(printed.iter().any(|line| line.ends_with("b.log")));
    assert!(!printed.iter().any(|line| line.ends_with("a.log")));
    assert!(!printed.iter().any(|line| line.ends_with("notes.md")));
}
