use anyhow::Result;
use colored::*;
use runbook_core::graph::dependencies_of;
use runbook_core::recipe::Recipe;

pub fn execute(recipe: &Recipe) -> Result<()> {
    println!("{}", "Task Dependency Graph:".bold().underline());

    let result = recipe.get_dependency_graph();

    if !result.cycles.is_empty() {
        let cycles_description = result
            .cycles
            .iter()
            .map(|cycle| {
                let mut path = cycle.clone();
                if let Some(first) = path.first().cloned() {
                    path.push(first);
                }
                path.join(" -> ")
            })
            .collect::<Vec<_>>()
            .join("; ");

        println!(
            "{} {}",
            "Warning:".yellow().bold(),
            format!("Circular dependencies detected: {}", cycles_description).yellow()
        );
    }

    for (task, dep) in &result.missing_dependencies {
        println!(
            "{} {}",
            "Warning:".yellow().bold(),
            format!("Task '{}' depends on '{}' which was not found", task, dep).yellow()
        );
    }

    for task_name in result.graph.node_weights() {
        println!("{}", task_name.blue().bold());

        let deps = dependencies_of(&result.graph, task_name);
        if !deps.is_empty() {
            println!("  {} {}", "depends on:".dimmed(), deps.join(", "));
        } else {
            println!("  {}", "no dependencies".dimmed());
        }
        println!();
    }

    Ok(())
}
