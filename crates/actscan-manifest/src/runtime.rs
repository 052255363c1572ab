//! Runtime classification and action naming
//!
//! Only extensions and directory shapes are inspected; file contents are never read.

use std::path::Path;

/// File extensions recognised as action sources
pub const SUPPORTED_RUNTIMES: &[&str] = &[".js", ".py", ".go", ".java"];

/// Extension of stale pre-built archives left inside package directories
pub const ARCHIVE_EXT: &str = ".zip";

/// Shape of a directory entry, decided once per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Anything that is not a directory (single-file action candidate)
    File,
    /// A directory (package, or multi-file action candidate)
    Dir,
}

impl EntryKind {
    /// Classify `base/entry`. Symlinks are followed; unreadable entries count as files.
    pub fn classify(base: &Path, entry: &str) -> Self {
        Self::of_path(&base.join(entry))
    }

    pub fn of_path(path: &Path) -> Self {
        if path.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        }
    }
}

pub fn is_single_file_action(base: &Path, entry: &str) -> bool {
    EntryKind::classify(base, entry) == EntryKind::File
}

pub fn is_multi_file_action(base: &Path, entry: &str) -> bool {
    EntryKind::classify(base, entry) == EntryKind::Dir
}

/// Extension of the last path segment, dot included (`"a/b.tar.gz"` -> `".gz"`).
///
/// Empty when the segment has no dot. A leading dot counts, so `".env"` is all extension.
pub fn file_ext(path: &str) -> &str {
    let base = base_name(path);
    base.rfind('.').map_or("", |idx| &base[idx..])
}

pub fn is_supported_runtime(file: &str) -> bool {
    SUPPORTED_RUNTIMES.contains(&file_ext(file))
}

pub fn is_archive(file: &str) -> bool {
    file_ext(file) == ARCHIVE_EXT
}

/// Logical action name: `"/path/to/action.js"` -> `"action"`
pub fn action_name(path: &str) -> &str {
    let base = base_name(path);
    let ext = file_ext(base);
    &base[..base.len() - ext.len()]
}

pub(crate) fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    trimmed
        .rfind(['/', '\\'])
        .map_or(trimmed, |idx| &trimmed[idx + 1..])
}
