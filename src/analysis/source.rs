use chrono::Local;
use git2::Repository;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AnalyzerError, Result};

/// Where the repository to analyze comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoSource {
    /// An existing working copy
    Local(PathBuf),
    /// A remote repository that is cloned first
    Url(String),
}

impl RepoSource {
    /// Treat `source` as a URL if it looks like one, otherwise as a local path
    pub fn detect(source: &str) -> Self {
        if is_git_url(source) {
            RepoSource::Url(source.to_string())
        } else {
            RepoSource::Local(PathBuf::from(source))
        }
    }

    /// Produce a working copy path, cloning into `clone_dir` for URLs
    pub fn resolve(&self, clone_dir: &Path) -> Result<PathBuf> {
        match self {
            RepoSource::Local(path) => Ok(absolute_path(path)),
            RepoSource::Url(url) => clone_repo_from_url(url, clone_dir),
        }
    }
}

/// `http://` or `https://` prefix, or a `.git` suffix
pub fn is_git_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://") || source.ends_with(".git")
}

fn absolute_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Last path segment of the URL without any `.git` suffix
pub fn repo_name_from_url(url: &str) -> String {
    let name = url
        .trim_end_matches('/')
        .rsplit(['/', '\\', ':'])
        .next()
        .unwrap_or_default()
        .trim_end_matches(".git");
    if name.is_empty() {
        "repo".to_string()
    } else {
        name.to_string()
    }
}

/// Clone `url` into a fresh timestamped directory under `clone_dir`.
///
/// Clones are kept after the run.
pub fn clone_repo_from_url(url: &str, clone_dir: &Path) -> Result<PathBuf> {
    let base_dir = absolute_path(clone_dir);
    fs::create_dir_all(&base_dir)?;

    let timestamp = Local::now().format("%Y%m%d%H%M%S");
    let dest = base_dir.join(format!("{}_{}", repo_name_from_url(url), timestamp));

    log::info!("Cloning {} into {}", url, dest.display());
    Repository::clone(url, &dest).map_err(|source| AnalyzerError::Clone {
        url: url.to_string(),
        source,
    })?;

    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_url_detection() {
        assert!(is_git_url("https://github.com/user/repo"));
        assert!(is_git_url("http://example.com/repo"));
        assert!(is_git_url("git@github.com:user/repo.git"));
        assert!(!is_git_url("/home/user/repo"));
        assert!(!is_git_url("relative/path"));
    }

    #[test]
    fn test_detect() {
        assert_eq!(
            RepoSource::detect("https://github.com/user/repo"),
            RepoSource::Url("https://github.com/user/repo".to_string())
        );
        assert_eq!(
            RepoSource::detect("./repo"),
            RepoSource::Local(PathBuf::from("./repo"))
        );
    }

    #[test]
    fn test_repo_name_from_url() {
        assert_eq!(repo_name_from_url("https://github.com/user/repo.git"), "repo");
        assert_eq!(repo_name_from_url("https://github.com/user/tool/"), "tool");
        assert_eq!(repo_name_from_url("git@github.com:user/widget.git"), "widget");
        assert_eq!(repo_name_from_url(".git"), "repo");
    }
}
