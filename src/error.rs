//! # Errors
//!
//! Failures that abort an analysis run. Per-file read problems inside the
//! language classifier and complexity scanner never reach this type.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Not a valid git repo: {}", .0.display())]
    NotAGitRepository(PathBuf),
    #[error("Repository has no commits (empty repository): {}", .0.display())]
    EmptyRepository(PathBuf),
    #[error("Bare repository has no working copy to analyze: {}", .0.display())]
    BareRepository(PathBuf),
    #[error("Failed to clone {url}: {source}")]
    Clone {
        url: String,
        #[source]
        source: git2::Error,
    },
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
