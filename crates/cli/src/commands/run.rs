use anyhow::Result;
use colored::*;
use runbook_core::recipe::Recipe;

use crate::reporter::ConsoleReporter;

pub fn execute(recipe: &Recipe, target: Option<&str>) -> Result<()> {
    let target = recipe.resolve_target(target);
    if let Some(name) = &recipe.config.name {
        println!("{} {}", "Recipe:".bright_black(), name.bold());
    }

    let summary = recipe.run_task(Some(target), &ConsoleReporter)?;

    println!();
    println!(
        "{} {}",
        "✓".green().bold(),
        format!(
            "Target '{}' succeeded ({} run, {} grouped) in {:.2?}",
            summary.target,
            summary.executed.len(),
            summary.skipped.len(),
            summary.elapsed
        )
        .green()
    );
    Ok(())
}
