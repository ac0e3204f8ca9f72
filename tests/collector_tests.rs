mod utils;

use templet::collector::{collect_paths, walk_entries};
use templet::error::Error;
use templet::template::TemplateSetBuilder;
use test_log::test;
use utils::{relative_to, write_tree};

#[test]
fn test_filters_by_extension_at_any_depth() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let root = tmp_dir.path();
    write_tree(
        root,
        &[
            ("index.html", ""),
            ("readme.txt", ""),
            ("mail/welcome.tmpl", ""),
            ("mail/welcome.txt", ""),
            ("a/b/c/deep.html", ""),
            ("a/b/c/deep.txt", ""),
        ],
    );

    let paths = collect_paths(root, &[".html", ".tmpl"]);
    assert_eq!(
        relative_to(root, &paths),
        vec!["a/b/c/deep.html", "index.html", "mail/welcome.tmpl"]
    );
}

#[test]
fn test_only_non_matching_files_yield_empty() {
    let tmp_dir = tempfile::tempdir().unwrap();
    write_tree(tmp_dir.path(), &[("one.txt", ""), ("two/three.md", "")]);
    assert!(collect_paths(tmp_dir.path(), &[".html", ".tmpl"]).is_empty());
}

#[test]
fn test_extension_match_is_literal() {
    let tmp_dir = tempfile::tempdir().unwrap();
    write_tree(tmp_dir.path(), &[("page.html", ""), ("other.HTML", "")]);

    assert!(collect_paths(tmp_dir.path(), &["html"]).is_empty());
    assert!(collect_paths::<_, &str>(tmp_dir.path(), &[]).is_empty());
    assert_eq!(
        relative_to(tmp_dir.path(), &collect_paths(tmp_dir.path(), &[".HTML"])),
        vec!["other.HTML"]
    );
}

#[test]
fn test_relative_root_gives_relative_paths() {
    let paths = collect_paths("tests/templates/site", &[".html", ".tmpl"]);
    assert!(!paths.is_empty());
    assert!(paths.iter().all(|p| p.starts_with("tests/templates/site")));
}

#[cfg(unix)]
#[test]
fn test_unreadable_entry_is_skipped_and_walk_goes_on() {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let tmp_dir = tempfile::tempdir().unwrap();
    let root = tmp_dir.path();
    write_tree(
        root,
        &[("a.tmpl", ""), ("locked/hidden.tmpl", ""), ("z.tmpl", ""), ("zz/last.tmpl", "")],
    );
    let locked = root.join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // A privileged user reads the directory anyway, so nothing fails.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let paths = collect_paths(root, &[".tmpl"]);
    let summary = walk_entries(root, |_| {});

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(relative_to(root, &paths), vec!["a.tmpl", "z.tmpl", "zz/last.tmpl"]);
    let summary = summary.unwrap();
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.visited, 3);
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_file_name_is_collected_and_rejected_at_parse() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let tmp_dir = tempfile::tempdir().unwrap();
    let root = tmp_dir.path();
    let odd = root.join(OsStr::from_bytes(b"caf\xff.html"));
    std::fs::write(&odd, "hi").unwrap();

    let paths = collect_paths(root, &[".html"]);
    assert_eq!(paths, vec![odd]);

    let err = TemplateSetBuilder::new(root).parse_files(&paths).err().unwrap();
    assert!(matches!(err, Error::InvalidTemplateName { .. }));
    assert!(err.is_parse_failure());
}
