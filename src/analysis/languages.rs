use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tokei::{Config, LanguageType};

use crate::types::LanguageHistogram;
use crate::utils::repo_files;

/// Guesses a language for each file and sums file sizes per language.
#[derive(Debug)]
pub struct LanguageClassifier {
    sample_bytes: usize,
    config: Config,
}

impl LanguageClassifier {
    pub fn new(sample_bytes: usize) -> Self {
        Self {
            sample_bytes,
            config: Config::default(),
        }
    }

    /// Language name for `path`, or `None` when the file is unreadable,
    /// looks binary, or matches no known language.
    ///
    /// The sample only serves to reject binary content (any NUL byte). The
    /// language itself comes from tokei's file name and extension table,
    /// with tokei reading the shebang line for extensionless scripts.
    pub fn detect(&self, path: &Path) -> Option<&'static str> {
        let sample = match read_sample(path, self.sample_bytes) {
            Ok(sample) => sample,
            Err(e) => {
                log::trace!("Skipping {}: {}", path.display(), e);
                return None;
            }
        };
        if sample.contains(&0) {
            log::trace!("Skipping binary file {}", path.display());
            return None;
        }

        LanguageType::from_path(path, &self.config).map(LanguageType::name)
    }

    /// Walk `root`, minus the directories in `skip`, and total the byte
    /// size of every recognized file
    pub fn classify(&self, root: &Path, skip: &[PathBuf]) -> LanguageHistogram {
        let mut language_sizes = LanguageHistogram::new();

        for path in repo_files(root, skip) {
            let Some(language) = self.detect(&path) else {
                continue;
            };
            let size = match fs::metadata(&path) {
                Ok(metadata) => metadata.len(),
                Err(_) => continue,
            };
            *language_sizes.entry(language.to_string()).or_insert(0) += size;
        }

        log::debug!(
            "Detected {} languages under {}",
            language_sizes.len(),
            root.display()
        );
        language_sizes
    }
}

impl Default for LanguageClassifier {
    fn default() -> Self {
        Self::new(8192)
    }
}

fn read_sample(path: &Path, limit: usize) -> io::Result<Vec<u8>> {
    let mut sample = Vec::with_capacity(limit.min(8192));
    File::open(path)?
        .take(limit as u64)
        .read_to_end(&mut sample)?;
    Ok(sample)
}
