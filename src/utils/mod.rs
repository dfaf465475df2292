mod aggregation;
pub mod console;
mod walk;

pub use aggregation::{monthly_commit_counts, top_languages, OTHER_LANGUAGE};
pub use walk::{repo_files, EXCLUDED_DIRS};
