use chrono::Utc;
use std::io::Write;
use std::path::PathBuf;

use super::ui;
use crate::analysis::{collect_repo_stats, LanguageClassifier, RepoSource};
use crate::config::{AnalyzerConfig, Capabilities};
use crate::error::Result;
use crate::report::ReportTarget;
use crate::types::ReportData;
use crate::utils::console;

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub data: ReportData,
    /// Written report, if one was requested and available
    pub report_path: Option<PathBuf>,
}

/// Runs one analysis end to end: resolve the source, collect history,
/// classify languages, optionally scan complexity, then emit a report.
pub struct App {
    pub config: AnalyzerConfig,
    pub capabilities: Capabilities,
}

impl App {
    pub fn new(config: AnalyzerConfig, capabilities: Capabilities) -> Self {
        Self {
            config,
            capabilities,
        }
    }

    /// Run the pipeline, printing progress and failures to `out`.
    ///
    /// A failure in resolving the source or collecting history aborts before
    /// any report file is written.
    pub fn run(&self, source: &RepoSource, out: &mut dyn Write) -> Result<RunOutcome> {
        match self.analyze(source, out) {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                log::error!("analysis aborted: {}", e);
                console::error(out, &format!("❌ {e}"))?;
                Err(e)
            }
        }
    }

    fn analyze(&self, source: &RepoSource, out: &mut dyn Write) -> Result<RunOutcome> {
        if let RepoSource::Url(url) = source {
            console::info(out, &format!("Cloning {url} ..."))?;
        }
        let repo_path = source.resolve(&self.config.clone_dir)?;
        log::info!("analyzing {}", repo_path.display());

        let repo = collect_repo_stats(&repo_path, self.config.branches)?;
        ui::print_repo_summary(out, &repo)?;

        // Earlier reports must not be counted as repository content
        let skip = [self.config.reports_dir_for(&repo.path)];

        let complexity = if self.config.complexity {
            match &self.capabilities.complexity {
                Some(scanner) => {
                    let complexity = scanner.scan(&repo.path, &skip);
                    console::success(out, "Complexity scan completed")?;
                    Some(complexity)
                }
                None => {
                    console::warn(out, "Complexity analysis not available in this build")?;
                    None
                }
            }
        } else {
            None
        };

        let languages =
            LanguageClassifier::new(self.config.sample_bytes).classify(&repo.path, &skip);
        ui::print_languages(out, &languages)?;

        let data = ReportData {
            repo,
            complexity,
            languages,
            generated_at: Utc::now(),
        };

        let report_path = match self.config.report {
            None => None,
            Some(format) => match self.capabilities.emitter(format) {
                Some(emitter) => {
                    let target = ReportTarget::new(&self.config, &data);
                    let path = emitter.emit(&data, &target, out)?;
                    console::success(
                        out,
                        &format!("✅ {} saved → {}", emitter.format(), path.display()),
                    )?;
                    Some(path)
                }
                None => {
                    console::warn(out, &format!("{format} reporting not available in this build"))?;
                    None
                }
            },
        };

        console::success(out, "Analysis complete!")?;
        Ok(RunOutcome { data, report_path })
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default(), Capabilities::default())
    }
}
