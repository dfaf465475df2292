//! Git Repository Analyzer
//!
//! Command line entry point for analyzing a repository and writing reports.

use repo_analyzer::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    cli.execute()
}
