//! # Git Repository Analyzer
//!
//! `repo_analyzer` walks a local or freshly cloned Git repository and turns
//! its history and working tree into statistics and reports.
//!
//! ## Features
//!
//! - Commit counts, per-author histograms and commit timestamps
//! - Optional branch listing with per-branch commit counts
//! - Language breakdown by file size
//! - Heuristic per-file complexity scan
//! - JSON, Markdown and HTML reports with commit and language charts
//!
//! ## Example
//!
//! ```no_run
//! use repo_analyzer::{AnalyzerConfig, Capabilities, RepoAnalyzer, RepoSource, ReportFormat};
//!
//! let config = AnalyzerConfig {
//!     report: Some(ReportFormat::Json),
//!     complexity: true,
//!     ..Default::default()
//! };
//! let analyzer = RepoAnalyzer::new(config, Capabilities::default());
//!
//! let mut stdout = std::io::stdout();
//! let outcome = analyzer.run(&RepoSource::detect("."), &mut stdout)?;
//! println!("{} commits", outcome.data.repo.total_commits);
//! # Ok::<(), repo_analyzer::AnalyzerError>(())
//! ```

pub mod analysis;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod plotting;
pub mod report;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use analysis::RepoSource;
pub use app::{App as RepoAnalyzer, RunOutcome};
pub use config::{AnalyzerConfig, BranchDetail, Capabilities, ReportFormat};
pub use error::{AnalyzerError, Result};
pub use types::{RepoStats, ReportData};
