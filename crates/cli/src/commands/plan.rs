use anyhow::Result;
use colored::*;
use runbook_core::recipe::Recipe;

pub fn execute(recipe: &Recipe, target: Option<&str>) -> Result<()> {
    let target = recipe.resolve_target(target);
    println!("{} {}", "Execution plan for".bold(), target.cyan());

    let execution_plan = recipe
        .get_execution_plan(Some(target))
        .map_err(|e| anyhow::anyhow!("Failed to get execution plan: {}", e))?;

    println!("\n{}:", "Execution order".bold());
    for (i, task_name) in execution_plan.task_names().iter().enumerate() {
        let is_group = recipe
            .registry
            .get(task_name)
            .map(|task| task.is_group())
            .unwrap_or(false);

        if is_group {
            println!("  {}. {} {}", i + 1, task_name, "(group)".dimmed());
        } else {
            println!("  {}. {}", i + 1, task_name);
        }
    }

    Ok(())
}
