//! Execution planning
//!
//! Resolution walks the dependency graph depth-first from the requested
//! target, emitting every task after all of its dependencies. Dependencies
//! are expanded in declaration order and a task reachable through several
//! paths is scheduled once, at its first occurrence.

use tracing::debug;

use crate::registry::TaskRegistry;
use crate::types::{RunbookError, RunbookResult};

/// Linearised, dependency-respecting order of tasks for one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    pub target: String,
    steps: Vec<usize>,
    task_names: Vec<String>,
}

impl ExecutionPlan {
    /// Task names in execution order
    pub fn task_names(&self) -> &[String] {
        &self.task_names
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub(crate) fn steps(&self) -> &[usize] {
        &self.steps
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

impl TaskRegistry {
    /// Resolve `target` into an execution plan
    pub fn resolve(&self, target: &str) -> RunbookResult<ExecutionPlan> {
        let root = self
            .index_of(target)
            .ok_or_else(|| RunbookError::UnknownTarget {
                name: target.to_string(),
                required_by: None,
            })?;

        let mut marks = vec![Mark::Unvisited; self.len()];
        let mut steps = Vec::new();
        // Active traversal path: (task index, next dependency to expand)
        let mut path: Vec<(usize, usize)> = vec![(root, 0)];
        marks[root] = Mark::InProgress;

        while let Some(&(current, cursor)) = path.last() {
            let task = self.task_at(current);

            let Some(dependency) = task.dependencies.get(cursor) else {
                marks[current] = Mark::Done;
                steps.push(current);
                path.pop();
                continue;
            };

            if let Some(frame) = path.last_mut() {
                frame.1 += 1;
            }

            let next = self
                .index_of(dependency)
                .ok_or_else(|| RunbookError::UnknownTarget {
                    name: dependency.clone(),
                    required_by: Some(task.name.clone()),
                })?;

            match marks[next] {
                Mark::Done => {}
                Mark::InProgress => {
                    let cycle = path
                        .iter()
                        .skip_while(|(position, _)| *position != next)
                        .map(|(position, _)| self.task_at(*position).name.clone())
                        .chain(std::iter::once(dependency.clone()))
                        .collect();
                    return Err(RunbookError::CyclicDependency { cycle });
                }
                Mark::Unvisited => {
                    marks[next] = Mark::InProgress;
                    path.push((next, 0));
                }
            }
        }

        let task_names: Vec<String> = steps
            .iter()
            .map(|position| self.task_at(*position).name.clone())
            .collect();
        debug!(requested = %target, order = ?task_names, "resolved execution plan");

        Ok(ExecutionPlan {
            target: target.to_string(),
            steps,
            task_names,
        })
    }

    /// Check that every registered task resolves: no unknown dependencies, no cycles
    pub fn validate(&self) -> RunbookResult<()> {
        for task in self.tasks() {
            self.resolve(&task.name)?;
        }
        Ok(())
    }
}
