//! # Report Emitters
//!
//! Three independent renderers over the same [`ReportData`]. Each creates
//! its output directory on demand and never removes earlier reports.

#[cfg(feature = "html")]
mod html;
mod json;
mod markdown;

#[cfg(feature = "html")]
pub use html::HtmlEmitter;
pub use json::JsonEmitter;
pub use markdown::MarkdownEmitter;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{AnalyzerConfig, ReportFormat};
use crate::error::Result;
use crate::plotting::{build_commit_frequency_chart, build_language_pie};
use crate::types::ReportData;
use crate::utils::console;

/// A renderer that turns [`ReportData`] into a file.
pub trait ReportEmitter {
    fn format(&self) -> ReportFormat;

    /// Write the report under `target.dir` and return the written path
    fn emit(&self, data: &ReportData, target: &ReportTarget, out: &mut dyn Write) -> Result<PathBuf>;
}

/// Where and how large a report is written.
#[derive(Debug, Clone)]
pub struct ReportTarget {
    pub dir: PathBuf,
    pub repo_name: String,
    pub top_languages: usize,
    pub complexity_rows: usize,
}

impl ReportTarget {
    pub fn new(config: &AnalyzerConfig, data: &ReportData) -> Self {
        Self {
            dir: config.reports_dir_for(&data.repo.path),
            repo_name: data.repo.repo_name(),
            top_languages: config.top_languages,
            complexity_rows: config.complexity_rows,
        }
    }

    /// Repository name safe to use inside file names
    pub fn file_stem(&self) -> String {
        self.repo_name.replace(' ', "_")
    }

    fn ensure_dir(&self) -> Result<&Path> {
        fs::create_dir_all(&self.dir)?;
        Ok(&self.dir)
    }

    fn ensure_charts_dir(&self) -> Result<PathBuf> {
        let charts_dir = self.dir.join("charts");
        fs::create_dir_all(&charts_dir)?;
        Ok(charts_dir)
    }
}

/// Chart images as paths relative to the report directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ChartImages {
    pub commits: Option<String>,
    pub languages: Option<String>,
}

/// Render both charts into `<dir>/charts/`.
///
/// Empty inputs produce no image; a rendering failure is reported on `out`
/// and also produces no image.
pub(crate) fn render_charts(
    data: &ReportData,
    target: &ReportTarget,
    out: &mut dyn Write,
) -> Result<ChartImages> {
    let charts_dir = target.ensure_charts_dir()?;
    let timestamp = data.generated_at.format("%Y%m%d%H%M%S");
    let stem = target.file_stem();

    let commits_file = format!("{stem}_commits_{timestamp}.png");
    let commits = match build_commit_frequency_chart(
        &data.repo.commit_dates,
        &charts_dir.join(&commits_file),
    ) {
        Ok(Some(_)) => Some(format!("charts/{commits_file}")),
        Ok(None) => None,
        Err(e) => {
            console::warn(out, &format!("Commit chart could not be rendered: {e}"))?;
            None
        }
    };

    let languages_file = format!("{stem}_languages_{timestamp}.png");
    let languages = match build_language_pie(
        &data.languages,
        target.top_languages,
        &charts_dir.join(&languages_file),
    ) {
        Ok(Some(_)) => Some(format!("charts/{languages_file}")),
        Ok(None) => None,
        Err(e) => {
            console::warn(out, &format!("Language chart could not be rendered: {e}"))?;
            None
        }
    };

    Ok(ChartImages { commits, languages })
}
