#![allow(dead_code)]

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Creates every `(relative path, content)` pair under `root`, including
/// missing parent directories.
///
/// # Arguments
/// * `root` - Directory the tree is created in.
/// * `files` - Files to write, relative to `root`.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, content) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        debug!("Wrote fixture {}", path.display());
    }
}

/// Strips `root` from each collected path so assertions do not depend on the
/// temporary directory's location.
pub fn relative_to(root: &Path, paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect()
}
