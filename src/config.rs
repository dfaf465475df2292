//! # Run Configuration
//!
//! [`AnalyzerConfig`] carries the user's choices for a single run and
//! [`Capabilities`] says which optional stages this build can perform.

use clap::ValueEnum;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::analysis::ComplexityScanner;
use crate::report::{JsonEmitter, MarkdownEmitter, ReportEmitter};

/// Default directory name, inside the working copy, for generated reports
pub const DEFAULT_REPORTS_DIR: &str = ".analysis_reports";
/// Default directory for clones of remote sources
pub const DEFAULT_CLONE_DIR: &str = "cloned_repos";

/// Output format for the written report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Json,
    #[value(alias = "markdown")]
    Md,
    Html,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Json => write!(f, "JSON"),
            ReportFormat::Md => write!(f, "Markdown"),
            ReportFormat::Html => write!(f, "HTML"),
        }
    }
}

/// How much branch information to collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchDetail {
    /// Branch names only
    Names,
    /// Names plus commit count and tip date per branch
    Stats,
}

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Report to write, or `None` for the console summary only
    pub report: Option<ReportFormat>,
    pub branches: Option<BranchDetail>,
    pub complexity: bool,
    /// Overrides `<repo>/.analysis_reports`
    pub reports_dir: Option<PathBuf>,
    pub clone_dir: PathBuf,
    /// Languages shown individually in the pie chart
    pub top_languages: usize,
    /// Rows in the HTML complexity table
    pub complexity_rows: usize,
    /// Bytes read from each file for language detection
    pub sample_bytes: usize,
}

impl AnalyzerConfig {
    /// Directory reports are written to for the working copy at `repo_path`
    pub fn reports_dir_for(&self, repo_path: &Path) -> PathBuf {
        self.reports_dir
            .clone()
            .unwrap_or_else(|| repo_path.join(DEFAULT_REPORTS_DIR))
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            report: None,
            branches: None,
            complexity: false,
            reports_dir: None,
            clone_dir: PathBuf::from(DEFAULT_CLONE_DIR),
            top_languages: 8,
            complexity_rows: 25,
            sample_bytes: 8192,
        }
    }
}

/// Optional stages available to the orchestrator.
///
/// A `None` stage is reported as unavailable instead of failing the run.
pub struct Capabilities {
    pub complexity: Option<ComplexityScanner>,
    pub json: Option<Box<dyn ReportEmitter>>,
    pub markdown: Option<Box<dyn ReportEmitter>>,
    pub html: Option<Box<dyn ReportEmitter>>,
}

impl Capabilities {
    /// No optional stage at all
    pub fn none() -> Self {
        Self {
            complexity: None,
            json: None,
            markdown: None,
            html: None,
        }
    }

    pub fn emitter(&self, format: ReportFormat) -> Option<&dyn ReportEmitter> {
        match format {
            ReportFormat::Json => self.json.as_deref(),
            ReportFormat::Md => self.markdown.as_deref(),
            ReportFormat::Html => self.html.as_deref(),
        }
    }
}

impl Default for Capabilities {
    /// Every stage compiled into this build
    fn default() -> Self {
        #[cfg(feature = "html")]
        let html: Option<Box<dyn ReportEmitter>> = Some(Box::new(crate::report::HtmlEmitter));
        #[cfg(not(feature = "html"))]
        let html: Option<Box<dyn ReportEmitter>> = None;

        Self {
            complexity: Some(ComplexityScanner::default()),
            json: Some(Box::new(JsonEmitter)),
            markdown: Some(Box::new(MarkdownEmitter)),
            html,
        }
    }
}
