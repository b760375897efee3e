//! Task execution module
//!
//! This module handles the actual execution of tasks: running a resolved plan,
//! spawning external commands for command-backed tasks, and reporting
//! progress.

pub mod command;
pub mod reporter;
pub mod runner;

pub use command::{CommandAction, CommandKind};
pub use reporter::{Progress, RunReporter, TracingReporter};
pub use runner::{RunSummary, TaskRunner};
