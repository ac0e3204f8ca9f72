use crate::error::{Error, Result};
use crate::ext::PathExt;
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Counters reported by [`walk_entries`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkSummary {
    /// Non-directory entries handed to the visitor.
    pub visited: usize,
    /// Entries dropped because they could not be read.
    pub skipped: usize,
}

/// Walks `root` depth-first and calls `visitor` for every file below it.
///
/// Entries are visited in file-name order within each directory and symlinks
/// are not followed. An entry that cannot be read is logged, counted in
/// [`WalkSummary::skipped`] and left out; the walk goes on. Only a failure
/// on the root itself is returned as [`Error::WalkRoot`].
///
/// # Arguments
/// * `root` - Directory (or single file) to walk
/// * `visitor` - Called with the path of each file, in walk order
pub fn walk_entries<P, F>(root: P, mut visitor: F) -> Result<WalkSummary>
where
    P: AsRef<Path>,
    F: FnMut(&Path),
{
    let root = root.as_ref();
    let mut summary = WalkSummary::default();

    for dir_entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match dir_entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(Error::WalkRoot { root: root.display().to_string(), source: e });
            }
            Err(e) => {
                debug!("Skipping unreadable entry: {e}");
                summary.skipped += 1;
                continue;
            }
        };

        if entry.path().is_file() {
            summary.visited += 1;
            visitor(entry.path());
        }
    }

    Ok(summary)
}

/// Returns true when the extension of `path` (see [`PathExt::dotted_extension`])
/// is exactly one of `extensions`. Entries are compared as-is, so `"html"`
/// never matches; it has to be `".html"`.
pub fn has_allowed_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    let ext = path.dotted_extension();
    extensions.iter().any(|allowed| allowed.as_ref().as_bytes() == ext)
}

/// Collects every file under `root`, at any depth, whose extension is in
/// `extensions`.
///
/// Never fails: unreadable entries are skipped and a root that cannot be
/// walked at all yields an empty list.
pub fn collect_paths<P, S>(root: P, extensions: &[S]) -> Vec<PathBuf>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let root = root.as_ref();
    let mut paths = Vec::new();

    let walked = walk_entries(root, |path| {
        if has_allowed_extension(path, extensions) {
            debug!("Collected template file: {}", path.display());
            paths.push(path.to_path_buf());
        }
    });

    match walked {
        Ok(summary) => debug!(
            "Collected {} of {} files under '{}' ({} skipped)",
            paths.len(),
            summary.visited,
            root.display(),
            summary.skipped
        ),
        Err(e) => debug!("{e}"),
    }

    paths
}
