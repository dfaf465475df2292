mod complexity;
pub mod git;
mod languages;
pub mod source;


pub use complexity::{ComplexityScanner, FUNCTION_KEYWORDS};
pub use git::{collect_repo_stats, get_available_branches, open_repository};
pub use languages::LanguageClassifier;
pub use source::RepoSource;
