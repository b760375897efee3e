//! Task registry
//!
//! The [`TaskRegistry`] owns every registered [`Task`]. Tasks are stored in
//! registration order and addressed internally by index; the name index is
//! only consulted when a plan is resolved.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::action::Action;
use crate::types::{RunbookError, RunbookResult};

/// A named unit of work with declared dependencies and an optional action
pub struct Task {
    pub name: String,
    pub description: Option<String>,
    pub dependencies: Vec<String>,
    pub action: Option<Box<dyn Action>>,
}

impl Task {
    /// Tasks without an action only group their dependencies
    pub fn is_group(&self) -> bool {
        self.action.is_none()
    }

    pub fn with_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("dependencies", &self.dependencies)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

/// Registry of tasks, built once and then borrowed read-only by the runner
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
    index: HashMap<String, usize>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task. Names must be non-empty and unique.
    pub fn register<N, I, S>(
        &mut self,
        name: N,
        dependencies: I,
        action: Option<Box<dyn Action>>,
    ) -> RunbookResult<&mut Task>
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RunbookError::InvalidTaskName(name));
        }
        if self.index.contains_key(&name) {
            return Err(RunbookError::DuplicateRegistration(name));
        }

        let dependencies: Vec<String> = dependencies.into_iter().map(Into::into).collect();
        debug!(task = %name, ?dependencies, "registering task");

        let position = self.tasks.len();
        self.index.insert(name.clone(), position);
        self.tasks.push(Task {
            name,
            description: None,
            dependencies,
            action,
        });
        Ok(&mut self.tasks[position])
    }

    /// Register a task whose action is a closure
    pub fn register_fn<N, I, S, F>(
        &mut self,
        name: N,
        dependencies: I,
        action: F,
    ) -> RunbookResult<&mut Task>
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn() -> anyhow::Result<()> + 'static,
    {
        self.register(name, dependencies, Some(Box::new(action)))
    }

    /// Register a task that has no action and only groups its dependencies
    pub fn register_group<N, I, S>(&mut self, name: N, dependencies: I) -> RunbookResult<&mut Task>
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.register(name, dependencies, None)
    }

    pub fn get(&self, name: &str) -> Option<&Task> {
        self.index_of(name).map(|position| &self.tasks[position])
    }

    /// Tasks in registration order
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub(crate) fn task_at(&self, position: usize) -> &Task {
        &self.tasks[position]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn none() -> Vec<String> {
        Vec::new()
    }

    #[test]
    fn test_register_keeps_registration_order() {
        let mut registry = TaskRegistry::new();
        registry.register_group("b", none()).unwrap();
        registry.register_fn("a", ["b"], || Ok(())).unwrap();

        let names: Vec<_> = registry.tasks().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.get("b").unwrap().is_group());
        assert!(!registry.get("a").unwrap().is_group());
        assert_eq!(registry.get("a").unwrap().dependencies, vec!["b"]);
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut registry = TaskRegistry::new();
        registry.register_group("build", none()).unwrap();

        let err = registry.register_fn("build", none(), || Ok(())).unwrap_err();
        assert!(matches!(err, RunbookError::DuplicateRegistration(ref name) if name == "build"));
        // The original registration is untouched
        assert!(registry.get("build").unwrap().is_group());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut registry = TaskRegistry::new();
        assert!(matches!(
            registry.register_group("", none()),
            Err(RunbookError::InvalidTaskName(_))
        ));
        assert!(matches!(
            registry.register_group("   ", none()),
            Err(RunbookError::InvalidTaskName(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_with_description() {
        let mut registry = TaskRegistry::new();
        registry
            .register_group("ci", ["build"])
            .unwrap()
            .with_description("Everything CI needs");
        assert_eq!(
            registry.get("ci").unwrap().description.as_deref(),
            Some("Everything CI needs")
        );
    }
}
