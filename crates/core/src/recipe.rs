//! High-level recipe interface
//!
//! This module provides the [`Recipe`] which serves as the primary interface
//! for front ends. It loads a recipe file, registers every task it declares
//! into a [`TaskRegistry`], and exposes listing, planning, graph inspection
//! and execution.
//!
//! ## Example
//!
//! ```rust,no_run
//! use runbook_core::recipe::Recipe;
//! use runbook_core::execution::TracingReporter;
//!
//! # fn example() -> runbook_core::types::RunbookResult<()> {
//! let recipe = Recipe::load("runbook.yml")?;
//!
//! // Show what `ci` would do
//! let plan = recipe.get_execution_plan(Some("ci"))?;
//! println!("{:?}", plan.task_names());
//!
//! // Run the default target
//! recipe.run_task(None, &TracingReporter)?;
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::action::Action;
use crate::colors::get_task_color;
use crate::configs::recipe::{parse_recipe_config, Command as TaskCommand, RecipeConfig, TaskConfig};
use crate::execution::command::{CommandAction, CommandKind};
use crate::execution::reporter::RunReporter;
use crate::execution::runner::{RunSummary, TaskRunner};
use crate::graph::build_dependency_graph;
use crate::plan::ExecutionPlan;
use crate::registry::TaskRegistry;
use crate::results::{DependencyGraphResult, TaskInfo, TaskListResult};
use crate::types::{RunbookError, RunbookResult};

/// A loaded recipe: its configuration and the registry built from it
#[derive(Debug)]
pub struct Recipe {
    /// Absolute directory of the recipe file. Commands run here unless a task
    /// overrides it, and scripts are resolved against it.
    pub root: PathBuf,
    pub config: RecipeConfig,
    pub registry: TaskRegistry,
}

impl Recipe {
    /// Load and register the recipe file at `path`
    pub fn load(path: impl AsRef<Path>) -> RunbookResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RunbookError::Config(format!(
                "Failed to read recipe {}: {}",
                path.display(),
                e
            ))
        })?;

        let config = parse_recipe_config(&content).map_err(|e| match e {
            RunbookError::Config(msg) => {
                RunbookError::Config(format!("{}: {}", path.display(), msg))
            }
            other => RunbookError::Config(format!(
                "Failed to parse recipe {}: {}",
                path.display(),
                other
            )),
        })?;

        let root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        info!(recipe = %path.display(), tasks = config.tasks.len(), "loaded recipe");
        Self::from_config(config, root)
    }

    /// Build a recipe from an already parsed configuration. A relative `root`
    /// is anchored to the current directory.
    pub fn from_config(config: RecipeConfig, root: PathBuf) -> RunbookResult<Self> {
        let root = std::path::absolute(&root)?;
        let mut registry = TaskRegistry::new();
        for task in &config.tasks {
            let action = Self::build_action(&config, task, &root);
            let registered = registry.register(
                task.name.clone(),
                task.dependencies.clone().unwrap_or_default(),
                action,
            )?;
            if let Some(description) = &task.description {
                registered.with_description(description.clone());
            }
        }

        Ok(Self {
            root,
            config,
            registry,
        })
    }

    /// List all tasks in declaration order
    pub fn list_tasks(&self) -> TaskListResult {
        let tasks: Vec<TaskInfo> = self.registry.tasks().map(TaskInfo::from).collect();
        let task_colors: HashMap<_, _> = tasks
            .iter()
            .map(|t| (t.name.clone(), get_task_color(&t.name)))
            .collect();

        TaskListResult {
            recipe_name: self.config.name.clone(),
            default_target: self.config.default_target().to_string(),
            tasks,
            task_colors,
        }
    }

    /// Target to use when the caller gives none
    pub fn resolve_target<'a>(&'a self, target: Option<&'a str>) -> &'a str {
        target.unwrap_or_else(|| self.config.default_target())
    }

    /// Get the execution plan for a target
    pub fn get_execution_plan(&self, target: Option<&str>) -> RunbookResult<ExecutionPlan> {
        self.registry.resolve(self.resolve_target(target))
    }

    /// Execute a target. The whole recipe is validated first so configuration
    /// errors surface before any command runs.
    pub fn run_task(
        &self,
        target: Option<&str>,
        reporter: &dyn RunReporter,
    ) -> RunbookResult<RunSummary> {
        self.registry.validate()?;
        let plan = self.get_execution_plan(target)?;
        TaskRunner::new(&self.registry)
            .with_reporter(reporter)
            .execute_plan(&plan)
    }

    /// Get dependency graph information
    pub fn get_dependency_graph(&self) -> DependencyGraphResult {
        build_dependency_graph(&self.registry)
    }

    fn build_action(
        config: &RecipeConfig,
        task: &TaskConfig,
        root: &Path,
    ) -> Option<Box<dyn Action>> {
        let kind = if let Some(script) = &task.script {
            // Scripts are relative to the recipe, not to the task's working directory
            CommandKind::Script(root.join(script))
        } else {
            match task.command.as_ref()? {
                TaskCommand::Single(cmd) => CommandKind::Shell(cmd.clone()),
                TaskCommand::Multiple(parts) => {
                    let (program, args) = parts.split_first().map_or_else(
                        || (String::new(), Vec::new()),
                        |(program, args)| (program.clone(), args.to_vec()),
                    );
                    CommandKind::Exec { program, args }
                }
            }
        };

        let working_dir = match &task.working_dir {
            Some(dir) => root.join(dir),
            None => root.to_path_buf(),
        };

        let mut env = config.env.clone().unwrap_or_default();
        env.extend(task.env.clone().unwrap_or_default());

        Some(Box::new(
            CommandAction::new(task.name.clone(), kind, working_dir).with_env(env),
        ))
    }
}
