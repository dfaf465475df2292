//! # Common Types
//!
//! This module contains the types shared by the collectors, chart renderer and
//! report emitters. Every value here is rebuilt from a full re-scan on each run.

use chrono::{DateTime, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// Author name used when a commit carries no usable name.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// A single commit as seen by the collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Author name, `"Unknown"` if absent
    pub author: String,
    /// Commit (committer) timestamp
    pub committed_at: DateTime<Utc>,
}

/// Mapping of author name to commit count.
///
/// Authors keep the order in which they were first seen so that display
/// code can list them the way the commit walk produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorHistogram {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl AuthorHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more commit for `author`
    pub fn record(&mut self, author: &str) {
        match self.index.get(author) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(author.to_string(), self.entries.len());
                self.entries.push((author.to_string(), 1));
            }
        }
    }

    pub fn get(&self, author: &str) -> Option<usize> {
        self.index.get(author).map(|&slot| self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all commit counts
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Authors in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Authors sorted by commit count descending; ties keep first-seen order
    pub fn sorted_by_count(&self) -> Vec<(&str, usize)> {
        let mut sorted: Vec<(&str, usize)> = self.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }
}

impl<'a> FromIterator<&'a str> for AuthorHistogram {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut histogram = AuthorHistogram::new();
        for author in iter {
            histogram.record(author);
        }
        histogram
    }
}

impl Serialize for AuthorHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, count) in &self.entries {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

/// Mapping of language name to cumulative byte size.
pub type LanguageHistogram = BTreeMap<String, u64>;

/// Line and function-keyword counts for one file.
///
/// Both fields are `None` when the file could not be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FileMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functions: Option<usize>,
}

impl FileMetrics {
    pub fn new(lines: usize, functions: usize) -> Self {
        Self {
            lines: Some(lines),
            functions: Some(functions),
        }
    }

    /// Record for a file that could not be read
    pub fn empty() -> Self {
        Self::default()
    }

    /// Heuristic score: `functions * max(lines / 100, 1)`
    pub fn score(&self) -> f64 {
        let functions = self.functions.unwrap_or(0) as f64;
        let lines = self.lines.unwrap_or(0) as f64;
        functions * (lines / 100.0).max(1.0)
    }
}

/// Mapping of repository-relative file path to its metrics.
pub type FileComplexity = BTreeMap<String, FileMetrics>;

/// Per-branch figures for [`Branches::WithStats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchStats {
    /// Commits reachable from the branch tip
    pub commit_count: usize,
    /// Commit timestamp of the branch tip
    pub latest: DateTime<Utc>,
}

/// Branch information attached to the repository stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Branches {
    /// Just the branch names
    NamesOnly(Vec<String>),
    /// Branch names with commit counts and tip dates, default branch first.
    /// Serialized as a JSON object keyed by branch name.
    WithStats(#[serde(serialize_with = "serialize_ordered_map")] Vec<(String, BranchStats)>),
}

fn serialize_ordered_map<S: Serializer>(
    entries: &[(String, BranchStats)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (name, stats) in entries {
        map.serialize_entry(name, stats)?;
    }
    map.end()
}

impl Branches {
    pub fn len(&self) -> usize {
        match self {
            Branches::NamesOnly(names) => names.len(),
            Branches::WithStats(stats) => stats.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The result of walking a repository's commit history.
#[derive(Debug, Clone, Serialize)]
pub struct RepoStats {
    /// Working copy that was analyzed
    pub path: PathBuf,
    /// Total number of commits reachable from HEAD
    pub total_commits: usize,
    /// Commit counts per author
    pub authors: AuthorHistogram,
    /// Commit timestamps, newest first
    pub commit_dates: Vec<DateTime<Utc>>,
    /// Branch information, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branches: Option<Branches>,
}

impl RepoStats {
    /// Base name of the analyzed directory, used to name report files
    pub fn repo_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "repository".to_string())
    }
}

/// Everything a report emitter needs for one run.
#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub repo: RepoStats,
    pub complexity: Option<FileComplexity>,
    pub languages: LanguageHistogram,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_author_histogram_counts_and_order() {
        let histogram: AuthorHistogram = ["A", "B", "A"].into_iter().collect();

        assert_eq!(histogram.get("A"), Some(2));
        assert_eq!(histogram.get("B"), Some(1));
        assert_eq!(histogram.total(), 3);
        assert_eq!(histogram.iter().collect::<Vec<_>>(), vec![("A", 2), ("B", 1)]);
    }

    #[test]
    fn test_sorted_by_count_breaks_ties_by_first_seen() {
        let histogram: AuthorHistogram = ["C", "B", "A", "A"].into_iter().collect();
        assert_eq!(
            histogram.sorted_by_count(),
            vec![("A", 2), ("C", 1), ("B", 1)]
        );
    }

    #[test]
    fn test_author_histogram_serializes_in_insertion_order() {
        let histogram: AuthorHistogram = ["zed", "amy", "zed"].into_iter().collect();
        let json = serde_json::to_string(&histogram).unwrap();
        assert_eq!(json, r#"{"zed":2,"amy":1}"#);
    }

    #[test]
    fn test_score() {
        assert_eq!(FileMetrics::new(50, 3).score(), 3.0);
        assert_eq!(FileMetrics::new(250, 4).score(), 10.0);
        assert_eq!(FileMetrics::empty().score(), 0.0);
    }

    #[test]
    fn test_empty_metrics_serialize_as_empty_object() {
        let json = serde_json::to_string(&FileMetrics::empty()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_branches_serialize_untagged() {
        let names = Branches::NamesOnly(vec!["main".to_string()]);
        assert_eq!(serde_json::to_string(&names).unwrap(), r#"["main"]"#);
    }

    #[test]
    fn test_branch_stats_keep_listing_order() {
        let stats = |commit_count| BranchStats {
            commit_count,
            latest: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };
        let branches = Branches::WithStats(vec![
            ("main".to_string(), stats(3)),
            ("alpha".to_string(), stats(1)),
        ]);

        let json = serde_json::to_string(&branches).unwrap();
        assert_eq!(
            json,
            r#"{"main":{"commit_count":3,"latest":"2024-01-01T00:00:00Z"},"alpha":{"commit_count":1,"latest":"2024-01-01T00:00:00Z"}}"#
        );
    }
}
