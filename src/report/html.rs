use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use super::{render_charts, ChartImages, ReportEmitter, ReportTarget};
use crate::config::ReportFormat;
use crate::error::Result;
use crate::types::{Branches, FileComplexity, ReportData};

const STYLE: &str = r#"
 body {
   background: #111;
   color: #e0e0e0;
   font-family: Arial, sans-serif;
   padding: 20px;
 }
 h1, h2 {
   color: #4aa3ff;
 }
 .card {
   background: #1a1a1a;
   border-radius: 10px;
   padding: 15px;
   margin: 15px 0;
   border: 1px solid #333;
 }
 img {
   max-width: 700px;
   border: 1px solid #333;
   border-radius: 6px;
 }
 footer {
   margin-top: 30px;
   opacity: .6;
   font-size: 12px;
 }
 table {
   color: #fff;
   width: 100%;
   border-collapse: collapse;
 }
 th, td {
   border: 1px solid #333;
   padding: 6px;
 }
 .mono {
   font-family: monospace;
 }
"#;

/// Writes a styled single-page `<dir>/<repo>_report.html` with chart images
/// under `<dir>/charts/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEmitter;

impl ReportEmitter for HtmlEmitter {
    fn format(&self) -> ReportFormat {
        ReportFormat::Html
    }

    fn emit(&self, data: &ReportData, target: &ReportTarget, out: &mut dyn Write) -> Result<PathBuf> {
        let dir = target.ensure_dir()?.to_path_buf();
        let images = render_charts(data, target, out)?;

        let path = dir.join(format!("{}_report.html", target.file_stem()));
        fs::write(&path, render_html(data, &images, target.complexity_rows))?;
        Ok(path)
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Top `max_rows` files by score, highest first
pub(crate) fn complexity_table_html(complexity: Option<&FileComplexity>, max_rows: usize) -> String {
    let complexity = match complexity {
        Some(complexity) if !complexity.is_empty() => complexity,
        _ => return "<p>No complexity data available.</p>".to_string(),
    };

    let mut rows: Vec<_> = complexity
        .iter()
        .map(|(file, metrics)| (file, metrics.score(), metrics))
        .collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut table = String::from(
        "<table class='table'><thead><tr><th>File</th><th>Score</th><th>Lines</th><th>Funcs</th></tr></thead><tbody>",
    );
    for (file, score, metrics) in rows.into_iter().take(max_rows) {
        let lines = metrics
            .lines
            .map(|lines| lines.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = write!(
            table,
            "<tr><td class='mono'>{}</td><td>{:.1}</td><td>{}</td><td>{}</td></tr>",
            escape_html(file),
            score,
            lines,
            metrics.functions.unwrap_or(0)
        );
    }
    table.push_str("</tbody></table>");
    table
}

pub(crate) fn branches_html(branches: Option<&Branches>) -> String {
    let items: String = match branches {
        None => return "<p>No branch information available.</p>".to_string(),
        Some(branches) if branches.is_empty() => {
            return "<p>No branch information available.</p>".to_string()
        }
        Some(Branches::NamesOnly(names)) => names
            .iter()
            .map(|name| format!("<li>{}</li>", escape_html(name)))
            .collect(),
        Some(Branches::WithStats(stats)) => stats
            .iter()
            .map(|(name, info)| {
                format!(
                    "<li><strong>{}</strong> - {} commits - latest: {}</li>",
                    escape_html(name),
                    info.commit_count,
                    info.latest.format("%Y-%m-%d %H:%M:%S")
                )
            })
            .collect(),
    };
    format!("<ul class='branch-list'>{items}</ul>")
}

fn image_or(image: Option<&String>, placeholder: &str) -> String {
    match image {
        Some(src) => format!("<img src='{}'>", escape_html(src)),
        None => format!("<p>{placeholder}</p>"),
    }
}

pub(crate) fn render_html(data: &ReportData, images: &ChartImages, complexity_rows: usize) -> String {
    let repo_name = escape_html(&data.repo.repo_name());
    let author_items: String = data
        .repo
        .authors
        .iter()
        .map(|(name, count)| format!("<li>{}: {}</li>", escape_html(name), count))
        .collect();

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Repo Analysis - {repo_name}</title>
<style>{STYLE}</style>
</head>
<body>

<h1>Repository Report - {repo_name}</h1>
<p><strong>Total Commits:</strong> {total_commits}</p>

<div class="card">
<h2>Authors</h2>
<ul>{author_items}</ul>
</div>

<div class="card">
<h2>Branches</h2>
{branches}
</div>

<div class="card">
<h2>Commit Activity</h2>
{commit_chart}
</div>

<div class="card">
<h2>Language Breakdown</h2>
{language_chart}
</div>

<div class="card">
<h2>Complexity Overview</h2>
{complexity}
</div>

<footer>Generated by git-repo-analyzer - {generated_at}</footer>

</body>
</html>
"#,
        total_commits = data.repo.total_commits,
        branches = branches_html(data.repo.branches.as_ref()),
        commit_chart = image_or(images.commits.as_ref(), "No commit timeline available."),
        language_chart = image_or(images.languages.as_ref(), "No language stats available."),
        complexity = complexity_table_html(data.complexity.as_ref(), complexity_rows),
        generated_at = data.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzerConfig;
    use crate::report::test_support::sample_report;
    use crate::types::{BranchStats, FileMetrics};
    use chrono::{TimeZone, Utc};
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_complexity_table_ranks_and_caps_rows() {
        let mut complexity = FileComplexity::new();
        complexity.insert("small.py".to_string(), FileMetrics::new(10, 1));
        complexity.insert("big.py".to_string(), FileMetrics::new(500, 4));
        complexity.insert("mid.py".to_string(), FileMetrics::new(50, 3));
        complexity.insert("unreadable.bin".to_string(), FileMetrics::empty());

        let table = complexity_table_html(Some(&complexity), 2);

        let big = table.find("big.py").unwrap();
        let mid = table.find("mid.py").unwrap();
        assert!(big < mid);
        assert!(table.contains("<td>20.0</td>"));
        assert!(!table.contains("small.py"));
        assert!(!table.contains("unreadable.bin"));
    }

    #[test]
    fn test_unreadable_file_row_shows_dash() {
        let mut complexity = FileComplexity::new();
        complexity.insert("unreadable.bin".to_string(), FileMetrics::empty());

        let table = complexity_table_html(Some(&complexity), 25);
        assert!(table.contains("<td>0.0</td><td>-</td><td>0</td>"));
    }

    #[test]
    fn test_missing_inputs_render_placeholders() {
        let mut data = sample_report(Path::new("/work/demo"));
        data.complexity = None;

        let html = render_html(&data, &ChartImages::default(), 25);

        assert!(html.contains("No branch information available."));
        assert!(html.contains("No commit timeline available."));
        assert!(html.contains("No language stats available."));
        assert!(html.contains("No complexity data available."));
        assert!(html.contains("<li>A: 2</li><li>B: 1</li>"));
    }

    #[test]
    fn test_branch_variants() {
        let names = Branches::NamesOnly(vec!["main".to_string(), "dev<1>".to_string()]);
        assert_eq!(
            branches_html(Some(&names)),
            "<ul class='branch-list'><li>main</li><li>dev&lt;1&gt;</li></ul>"
        );

        let stats = vec![(
            "main".to_string(),
            BranchStats {
                commit_count: 7,
                latest: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            },
        )];
        let html = branches_html(Some(&Branches::WithStats(stats)));
        assert!(html.contains("<strong>main</strong> - 7 commits - latest: 2024-01-02 03:04:05"));
    }

    #[test]
    fn test_chart_images_are_relative() {
        let data = sample_report(Path::new("/work/demo"));
        let images = ChartImages {
            commits: Some("charts/demo_commits.png".to_string()),
            languages: None,
        };

        let html = render_html(&data, &images, 25);
        assert!(html.contains("<img src='charts/demo_commits.png'>"));
        assert!(html.contains("No language stats available."));
    }

    #[test]
    fn test_emit_writes_html_file() {
        let temp_dir = TempDir::new().unwrap();
        let data = sample_report(&temp_dir.path().join("demo"));
        let config = AnalyzerConfig {
            reports_dir: Some(temp_dir.path().join("reports")),
            ..Default::default()
        };
        let target = ReportTarget::new(&config, &data);

        let path = HtmlEmitter.emit(&data, &target, &mut Vec::new()).unwrap();

        assert_eq!(path, temp_dir.path().join("reports/demo_report.html"));
        assert!(temp_dir.path().join("reports/charts").is_dir());
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("<title>Repo Analysis - demo</title>"));
    }
}
