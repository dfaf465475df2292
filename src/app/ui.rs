//! Console summary shown after each collection stage.

use std::io::{self, Write};

use crate::types::{LanguageHistogram, RepoStats};
use crate::utils::{console, top_languages};

pub fn print_repo_summary(out: &mut dyn Write, repo: &RepoStats) -> io::Result<()> {
    console::heading(out, "Repository summary")?;
    console::field(out, "Path", repo.path.display())?;
    console::field(out, "Total commits", repo.total_commits)?;
    console::field(out, "Unique authors", repo.authors.len())?;
    if let Some(branches) = &repo.branches {
        console::field(out, "Branches", branches.len())?;
    }
    Ok(())
}

pub fn print_languages(out: &mut dyn Write, languages: &LanguageHistogram) -> io::Result<()> {
    if languages.is_empty() {
        return console::info(out, "No recognized source files");
    }

    let detected = top_languages(languages, usize::MAX)
        .into_iter()
        .map(|(name, _)| name)
        .collect::<Vec<_>>()
        .join(", ");
    console::field(out, "Languages detected", detected)
}
