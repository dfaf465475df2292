use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directory names pruned from every file walk
pub const EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "venv",
    "__pycache__",
    "cloned_repos",
    ".idea",
    ".vscode",
    ".analysis_reports",
];

fn is_excluded(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| EXCLUDED_DIRS.contains(&name))
            .unwrap_or(false)
}

/// `skip` holds canonical paths
fn is_skipped(entry: &DirEntry, skip: &[PathBuf]) -> bool {
    !skip.is_empty()
        && entry.depth() > 0
        && entry.file_type().is_dir()
        && fs::canonicalize(entry.path())
            .map(|path| skip.contains(&path))
            .unwrap_or(false)
}

/// Regular files under `root`, in file-name order, skipping excluded
/// directories and every directory in `skip` (typically the reports
/// directory, wherever it was configured).
///
/// Entries that cannot be read are dropped.
pub fn repo_files(root: &Path, skip: &[PathBuf]) -> impl Iterator<Item = PathBuf> {
    // A directory that does not exist yet cannot be walked into
    let skip: Vec<PathBuf> = skip
        .iter()
        .filter_map(|path| fs::canonicalize(path).ok())
        .collect();

    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| !is_excluded(entry) && !is_skipped(entry, &skip))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::trace!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(DirEntry::into_path)
}
