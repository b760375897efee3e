//! Result types for recipe operations
//!
//! This module contains the output structures returned by [`Recipe`](crate::recipe::Recipe)
//! queries, kept separate so front ends can render them however they like.

use std::collections::HashMap;

use colored::Color;

use crate::registry::Task;

/// Information about a registered task
#[derive(Debug, Clone)]
pub struct TaskInfo {
    pub name: String,
    pub description: Option<String>,
    pub dependencies: Vec<String>,
    pub has_action: bool,
}

/// Result of listing the tasks of a recipe
#[derive(Debug)]
pub struct TaskListResult {
    pub recipe_name: Option<String>,
    pub default_target: String,
    pub tasks: Vec<TaskInfo>,
    pub task_colors: HashMap<String, Color>,
}

/// Result of building the task dependency graph
#[derive(Debug)]
pub struct DependencyGraphResult {
    pub graph: petgraph::Graph<String, ()>,
    pub cycles: Vec<Vec<String>>,
    /// `(task, dependency)` pairs naming unregistered tasks
    pub missing_dependencies: Vec<(String, String)>,
}

impl From<&Task> for TaskInfo {
    fn from(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            description: task.description.clone(),
            dependencies: task.dependencies.clone(),
            has_action: !task.is_group(),
        }
    }
}
