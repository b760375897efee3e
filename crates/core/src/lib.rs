//! Runbook Core Library
//!
//! This is the core library for the Runbook task runner. It registers named
//! tasks with their dependencies, resolves a requested target into a
//! dependency-respecting execution order, and runs each task's action in that
//! order, stopping at the first failure.
//!
//! ## Architecture
//!
//! - [`registry`] - Task registration ([`TaskRegistry`], [`Task`])
//! - [`plan`] - Dependency resolution into an [`ExecutionPlan`]
//! - [`execution`] - Plan execution, command actions and progress reporting
//! - [`action`] - The [`Action`] capability attached to tasks
//! - [`recipe`] - Loading a YAML recipe file into a registry
//! - [`configs`] - Recipe file format
//! - [`graph`] - Dependency graph inspection and cycle reporting
//! - [`results`] - Result types for recipe queries
//! - [`types`] - Common error types and type aliases
//!
//! ## Usage
//!
//! Tasks can be registered directly:
//!
//! ```rust
//! use runbook_core::{TaskRegistry, TaskRunner};
//!
//! # fn example() -> runbook_core::RunbookResult<()> {
//! let mut registry = TaskRegistry::new();
//! registry.register_fn("clean", Vec::<String>::new(), || Ok(()))?;
//! registry.register_fn("build", ["clean"], || Ok(()))?;
//! registry.register_group("default", ["build"])?;
//!
//! let summary = TaskRunner::new(&registry).run("default")?;
//! assert_eq!(summary.executed, ["clean", "build"]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod action;
pub mod colors;
pub mod configs;
pub mod execution;
pub mod graph;
pub mod plan;
pub mod recipe;
pub mod registry;
pub mod results;
pub mod types;

// Re-export the main types for easier usage
pub use action::Action;
pub use execution::{RunSummary, TaskRunner};
pub use plan::ExecutionPlan;
pub use recipe::Recipe;
pub use registry::{Task, TaskRegistry};
pub use types::{RunbookError, RunbookResult};
