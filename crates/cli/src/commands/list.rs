use anyhow::Result;
use colored::*;
use runbook_core::recipe::Recipe;

pub fn execute(recipe: &Recipe) -> Result<()> {
    let result = recipe.list_tasks();

    let heading = match &result.recipe_name {
        Some(name) => format!("Tasks ({})", name),
        None => "Tasks".to_string(),
    };
    println!("{}", heading.bold().underline());

    if result.tasks.is_empty() {
        println!("  {}", "No tasks found".dimmed());
        return Ok(());
    }

    for task in &result.tasks {
        let mut line = task.name.bold().to_string();
        if let Some(color) = result.task_colors.get(&task.name) {
            line = task.name.color(*color).bold().to_string();
        }
        if task.name == result.default_target {
            line = format!("{} {}", line, "[default]".green());
        }
        if !task.has_action {
            line = format!("{} {}", line, "(group)".dimmed());
        }
        println!("{}", line);

        if let Some(description) = &task.description {
            println!("  {}", description);
        }
        if !task.dependencies.is_empty() {
            println!(
                "  {} {}",
                "depends on:".dimmed(),
                task.dependencies.join(", ")
            );
        }
    }

    Ok(())
}
