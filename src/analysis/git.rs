use chrono::{DateTime, Utc};
use git2::{BranchType, ErrorCode, Repository, Sort, Time};
use std::path::Path;

use crate::config::BranchDetail;
use crate::error::{AnalyzerError, Result};
use crate::types::{AuthorHistogram, BranchStats, Branches, CommitRecord, RepoStats, UNKNOWN_AUTHOR};

/// Open the working copy at `path`.
///
/// Only `path` itself is checked; parent directories are not searched.
pub fn open_repository(path: &Path) -> Result<Repository> {
    let repo = Repository::open(path).map_err(|e| {
        if e.code() == ErrorCode::NotFound {
            AnalyzerError::NotAGitRepository(path.to_path_buf())
        } else {
            AnalyzerError::Git(e)
        }
    })?;

    if repo.is_bare() {
        return Err(AnalyzerError::BareRepository(path.to_path_buf()));
    }
    if repo.is_empty()? {
        return Err(AnalyzerError::EmptyRepository(path.to_path_buf()));
    }

    Ok(repo)
}

/// Collect commit, author and (optionally) branch statistics for the
/// working copy at `path`
pub fn collect_repo_stats(path: &Path, branches: Option<BranchDetail>) -> Result<RepoStats> {
    let repo = open_repository(path)?;
    let commits = collect_commits(&repo, path)?;

    let authors: AuthorHistogram = commits.iter().map(|c| c.author.as_str()).collect();
    let commit_dates = commits.iter().map(|c| c.committed_at).collect();

    let branches = match branches {
        Some(BranchDetail::Names) => Some(Branches::NamesOnly(get_available_branches(&repo)?)),
        Some(BranchDetail::Stats) => Some(Branches::WithStats(branch_statistics(&repo)?)),
        None => None,
    };

    log::info!(
        "Collected {} commits from {} authors in {}",
        commits.len(),
        authors.len(),
        path.display()
    );

    Ok(RepoStats {
        path: path.to_path_buf(),
        total_commits: commits.len(),
        authors,
        commit_dates,
        branches,
    })
}

/// Walk every commit reachable from HEAD, newest first
fn collect_commits(repo: &Repository, path: &Path) -> Result<Vec<CommitRecord>> {
    let mut revwalk = repo.revwalk()?;
    revwalk.set_sorting(Sort::TIME)?;
    revwalk.push_head().map_err(|e| {
        if e.code() == ErrorCode::UnbornBranch {
            AnalyzerError::EmptyRepository(path.to_path_buf())
        } else {
            AnalyzerError::Git(e)
        }
    })?;

    let mut commits = Vec::new();
    for oid in revwalk {
        let commit = repo.find_commit(oid?)?;
        commits.push(CommitRecord {
            author: author_name(commit.author().name_bytes()),
            committed_at: to_utc(commit.time()),
        });
    }

    if commits.is_empty() {
        return Err(AnalyzerError::EmptyRepository(path.to_path_buf()));
    }

    Ok(commits)
}

/// Decode an author name, replacing invalid UTF-8 sequences.
///
/// Empty and blank names map to `"Unknown"`.
pub(crate) fn author_name(name: &[u8]) -> String {
    let name = String::from_utf8_lossy(name);
    if name.trim().is_empty() {
        UNKNOWN_AUTHOR.to_string()
    } else {
        name.into_owned()
    }
}

fn to_utc(time: Time) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(time.seconds(), 0).unwrap_or_default()
}

/// Local branch names, sorted, with `main` (or `master`) moved to the front
pub fn get_available_branches(repo: &Repository) -> Result<Vec<String>> {
    let mut branch_names = Vec::new();
    for (branch, _) in repo.branches(Some(BranchType::Local))?.flatten() {
        if let Ok(Some(name)) = branch.name() {
            branch_names.push(name.to_string());
        }
    }

    branch_names.sort();
    if let Some(main_idx) = branch_names.iter().position(|x| x == "main") {
        let main = branch_names.remove(main_idx);
        branch_names.insert(0, main);
    } else if let Some(master_idx) = branch_names.iter().position(|x| x == "master") {
        let master = branch_names.remove(master_idx);
        branch_names.insert(0, master);
    }

    Ok(branch_names)
}

/// Commit count and tip date for every local branch, in
/// [`get_available_branches`] order
fn branch_statistics(repo: &Repository) -> Result<Vec<(String, BranchStats)>> {
    let mut stats = Vec::new();

    for name in get_available_branches(repo)? {
        let tip = repo
            .find_branch(&name, BranchType::Local)?
            .get()
            .peel_to_commit()?;

        let mut revwalk = repo.revwalk()?;
        revwalk.push(tip.id())?;
        let mut commit_count = 0;
        for oid in revwalk {
            oid?;
            commit_count += 1;
        }

        stats.push((
            name,
            BranchStats {
                commit_count,
                latest: to_utc(tip.time()),
            },
        ));
    }

    log::debug!("Collected statistics for {} branches", stats.len());
    Ok(stats)
}
