use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{FileComplexity, FileMetrics};
use crate::utils::repo_files;

/// Substrings counted as function definitions
pub const FUNCTION_KEYWORDS: [&str; 3] = ["def ", "function ", "func "];

/// Crude per-file complexity proxy: line count plus function-keyword hits.
///
/// This is plain substring counting, so keywords inside comments and string
/// literals are counted too.
#[derive(Debug, Clone, Default)]
pub struct ComplexityScanner;

impl ComplexityScanner {
    /// Metrics for one file; an unreadable file yields [`FileMetrics::empty`]
    pub fn scan_file(&self, path: &Path) -> FileMetrics {
        match fs::read(path) {
            Ok(bytes) => measure(&String::from_utf8_lossy(&bytes)),
            Err(e) => {
                log::trace!("Could not read {}: {}", path.display(), e);
                FileMetrics::empty()
            }
        }
    }

    /// Scan every file under `root` outside `skip`, keyed by `/`-separated
    /// relative path
    pub fn scan(&self, root: &Path, skip: &[PathBuf]) -> FileComplexity {
        let results: FileComplexity = repo_files(root, skip)
            .map(|path| {
                let key = relative_key(root, &path);
                (key, self.scan_file(&path))
            })
            .collect();

        log::debug!("Scanned {} files for complexity", results.len());
        results
    }
}

fn measure(content: &str) -> FileMetrics {
    let lines = content.matches('\n').count() + 1;
    let functions = FUNCTION_KEYWORDS
        .iter()
        .map(|keyword| content.matches(keyword).count())
        .sum();
    FileMetrics::new(lines, functions)
}

fn relative_key(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
