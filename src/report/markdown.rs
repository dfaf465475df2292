use std::fs;
use std::io::Write;
use std::path::PathBuf;

use super::{render_charts, ChartImages, ReportEmitter, ReportTarget};
use crate::config::ReportFormat;
use crate::error::Result;
use crate::types::ReportData;

/// File name of the Markdown report inside the reports directory
pub const MARKDOWN_REPORT_FILE: &str = "REPORT.md";

/// Writes `<dir>/REPORT.md` with a summary, an author table and links to the
/// rendered charts.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownEmitter;

impl ReportEmitter for MarkdownEmitter {
    fn format(&self) -> ReportFormat {
        ReportFormat::Md
    }

    fn emit(&self, data: &ReportData, target: &ReportTarget, out: &mut dyn Write) -> Result<PathBuf> {
        let dir = target.ensure_dir()?.to_path_buf();
        let images = render_charts(data, target, out)?;

        let path = dir.join(MARKDOWN_REPORT_FILE);
        fs::write(&path, render_markdown(data, &images))?;
        Ok(path)
    }
}

fn table_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

pub(crate) fn render_markdown(data: &ReportData, images: &ChartImages) -> String {
    let mut lines = vec![
        "# Git Repository Analysis Report".to_string(),
        String::new(),
        format!("**Repository Path:** `{}`  ", data.repo.path.display()),
        format!(
            "**Generated on:** {}",
            data.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        String::new(),
        "---".to_string(),
        "## Summary".to_string(),
        String::new(),
        format!("- **Total commits:** {}", data.repo.total_commits),
        format!("- **Unique contributors:** {}", data.repo.authors.len()),
        String::new(),
        "---".to_string(),
        "## Contributors".to_string(),
        String::new(),
        "| Author | Commits |".to_string(),
        "|--------|---------|".to_string(),
    ];

    for (author, count) in data.repo.authors.sorted_by_count() {
        lines.push(format!("| {} | {} |", table_cell(author), count));
    }

    if let Some(commits) = &images.commits {
        lines.extend([
            String::new(),
            "---".to_string(),
            "## Commit Frequency".to_string(),
            String::new(),
            format!("![Commit Frequency Chart]({commits})"),
        ]);
    }

    if let Some(languages) = &images.languages {
        lines.extend([
            String::new(),
            "---".to_string(),
            "## Language Usage".to_string(),
            String::new(),
            format!("![Language Usage Chart]({languages})"),
        ]);
    }

    lines.extend([
        String::new(),
        "---".to_string(),
        "*Generated automatically by Git Repository Analyzer*".to_string(),
        String::new(),
    ]);

    lines.join("\n")
}
