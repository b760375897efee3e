//! Run progress reporting
//!
//! The runner notifies a [`RunReporter`] as each task in the plan starts,
//! finishes, fails or is skipped. The default [`TracingReporter`] turns these
//! notifications into `tracing` events; front ends supply their own.

use std::time::Duration;

use tracing::{error, info};

/// Position of a task within the plan being executed (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub position: usize,
    pub total: usize,
}

pub trait RunReporter {
    fn task_started(&self, task: &str, progress: Progress);

    fn task_finished(&self, task: &str, progress: Progress, elapsed: Duration);

    fn task_failed(&self, task: &str, progress: Progress, cause: &anyhow::Error);

    /// Called for tasks without an action
    fn task_skipped(&self, _task: &str, _progress: Progress) {}
}

/// Reporter that emits structured `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl RunReporter for TracingReporter {
    fn task_started(&self, task: &str, progress: Progress) {
        info!(task, position = progress.position, total = progress.total, "starting task");
    }

    fn task_finished(&self, task: &str, _progress: Progress, elapsed: Duration) {
        info!(task, elapsed_ms = elapsed.as_millis() as u64, "task finished");
    }

    fn task_failed(&self, task: &str, _progress: Progress, cause: &anyhow::Error) {
        error!(task, error = %format!("{:#}", cause), "task failed");
    }

    fn task_skipped(&self, task: &str, _progress: Progress) {
        info!(task, "no action, skipping");
    }
}
