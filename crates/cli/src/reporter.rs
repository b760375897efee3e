//! Console progress output for `runbook run`

use std::time::Duration;

use colored::*;
use runbook_core::colors::get_task_color;
use runbook_core::execution::{Progress, RunReporter};

pub struct ConsoleReporter;

impl RunReporter for ConsoleReporter {
    fn task_started(&self, task: &str, progress: Progress) {
        println!();
        println!(
            "┌─ {} {}",
            format!("[{}/{}]", progress.position, progress.total).bright_black(),
            format!("Running task '{}'", task)
                .color(get_task_color(task))
                .bold()
        );
    }

    fn task_finished(&self, task: &str, _progress: Progress, elapsed: Duration) {
        println!(
            "└─ {} {}",
            "✓".green().bold(),
            format!("Completed {} in {:.2?}", task, elapsed).color(get_task_color(task))
        );
    }

    // The cause is printed once, by `main`, from the returned error
    fn task_failed(&self, task: &str, _progress: Progress, _cause: &anyhow::Error) {
        eprintln!("└─ {} {}", "✗".red().bold(), format!("Failed {}", task).red());
    }

    fn task_skipped(&self, task: &str, progress: Progress) {
        println!();
        println!(
            "── {} {} {}",
            format!("[{}/{}]", progress.position, progress.total).bright_black(),
            task.color(get_task_color(task)).bold(),
            "(group, nothing to run)".dimmed()
        );
    }
}
