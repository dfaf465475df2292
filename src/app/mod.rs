//! # Analysis Run
//!
//! [`App`] wires the collectors and emitters together for a single run.
//! Every user-facing line goes to the writer passed to [`App::run`].

mod state;
pub mod ui;

pub use state::{App, RunOutcome};
