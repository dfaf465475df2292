use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::analysis::RepoSource;
use crate::app::App;
use crate::config::{AnalyzerConfig, BranchDetail, Capabilities, ReportFormat, DEFAULT_CLONE_DIR};
use crate::utils::console;

#[derive(Parser)]
#[command(name = "repo-analyzer")]
#[command(about = "Analyze git repositories and generate JSON, Markdown or HTML reports")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a local repository or a remote URL
    Analyze(AnalyzeArgs),
}

#[derive(Args, Clone, Debug)]
pub struct AnalyzeArgs {
    #[arg(help = "Local path or remote URL of the repository")]
    pub path: Option<String>,

    #[arg(short, long, help = "Path to a local repository")]
    pub local: Option<PathBuf>,

    #[arg(short, long, help = "Remote repository URL to clone")]
    pub url: Option<String>,

    #[arg(short, long, value_enum, help = "Report format to write")]
    pub report: Option<ReportFormat>,

    #[arg(short, long, help = "Include branch names")]
    pub branches: bool,

    #[arg(long, help = "Include per-branch commit counts and latest commit dates")]
    pub branch_stats: bool,

    #[arg(short, long, help = "Run the complexity scan")]
    pub complexity: bool,

    #[arg(short, long, help = "Directory for reports (default: <repo>/.analysis_reports)")]
    pub output_dir: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_CLONE_DIR, help = "Directory that remote clones are placed in")]
    pub clone_dir: PathBuf,
}

impl AnalyzeArgs {
    /// `--local` wins over `--url`, which wins over the positional source
    pub fn source(&self) -> Option<RepoSource> {
        if let Some(local) = &self.local {
            return Some(RepoSource::Local(local.clone()));
        }
        if let Some(url) = &self.url {
            return Some(RepoSource::Url(url.clone()));
        }
        self.path.as_deref().map(RepoSource::detect)
    }

    pub fn config(&self) -> AnalyzerConfig {
        let branches = if self.branch_stats {
            Some(BranchDetail::Stats)
        } else if self.branches {
            Some(BranchDetail::Names)
        } else {
            None
        };

        AnalyzerConfig {
            report: self.report,
            branches,
            complexity: self.complexity,
            reports_dir: self.output_dir.clone(),
            clone_dir: self.clone_dir.clone(),
            ..Default::default()
        }
    }
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// `RUST_LOG` overrides the level chosen by `-v`
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    pub fn execute(self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        match self.command {
            Commands::Analyze(args) => run_analyze(&args, &mut out),
        }
    }
}

fn run_analyze(args: &AnalyzeArgs, out: &mut dyn Write) -> Result<()> {
    let Some(source) = args.source() else {
        console::error(out, "No repository given.")?;
        console::info(out, "Usage: repo-analyzer analyze <PATH|URL> [--report json|md|html]")?;
        bail!("no repository source provided");
    };

    let app = App::new(args.config(), Capabilities::default());
    app.run(&source, out).context("repository analysis failed")?;
    Ok(())
}
