use thiserror::Error;

/// The main error type for Runbook operations
#[derive(Debug, Error)]
pub enum RunbookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid task name '{0}': task names must be non-empty")]
    InvalidTaskName(String),

    #[error("Task '{0}' is already registered")]
    DuplicateRegistration(String),

    #[error("{}", describe_unknown_target(.name, .required_by.as_deref()))]
    UnknownTarget {
        name: String,
        required_by: Option<String>,
    },

    #[error("Circular dependency detected: {}", .cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },

    /// The cause is rendered inline, so it is not also exposed as `source()`
    #[error("Task '{task}' failed: {cause:#}")]
    TaskFailure { task: String, cause: anyhow::Error },
}

fn describe_unknown_target(name: &str, required_by: Option<&str>) -> String {
    match required_by {
        Some(parent) => format!(
            "Task '{}' depends on '{}' which was not found",
            parent, name
        ),
        None => format!("Task '{}' not found", name),
    }
}

impl RunbookError {
    /// Name of the task whose action failed, if this is an execution failure
    pub fn failed_task(&self) -> Option<&str> {
        match self {
            RunbookError::TaskFailure { task, .. } => Some(task),
            _ => None,
        }
    }
}

/// Result type alias for Runbook operations
pub type RunbookResult<T> = Result<T, RunbookError>;
