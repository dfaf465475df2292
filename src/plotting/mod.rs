mod chart;
pub mod styles;


pub use chart::{build_commit_frequency_chart, build_language_pie, PlotError};
