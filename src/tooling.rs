//! Tooling & Integration Layer
//!
//! The command-line surface over the snapshot/compare engine.

pub mod cli;

pub use cli::{Cli, CliContext, CommandOutput, Commands, ReportFormat};
