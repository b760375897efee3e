use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::{RunbookError, RunbookResult};

/// Default recipe file name, looked up in the current directory
pub const DEFAULT_RECIPE_FILE: &str = "runbook.yml";

/// Target used when a recipe declares no `default`
pub const FALLBACK_DEFAULT_TARGET: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Command {
    /// Shell command line, run with `sh -c`
    Single(String),
    /// Program followed by its arguments, run without a shell
    Multiple(Vec<String>),
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TaskConfig {
    pub name: String,
    pub description: Option<String>,
    pub script: Option<String>,
    pub command: Option<Command>,
    pub dependencies: Option<Vec<String>>,
    /// Directory to run the command in, relative to the recipe file
    pub working_dir: Option<String>,
    /// Extra environment variables, overriding recipe-level ones
    pub env: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RecipeConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Target to run when none is given on the command line
    pub default: Option<String>,
    /// Environment variables exported to every command
    pub env: Option<BTreeMap<String, String>>,
    pub tasks: Vec<TaskConfig>,
}

impl RecipeConfig {
    pub fn default_target(&self) -> &str {
        self.default.as_deref().unwrap_or(FALLBACK_DEFAULT_TARGET)
    }
}

pub fn parse_recipe_config(yaml_str: &str) -> RunbookResult<RecipeConfig> {
    let config: RecipeConfig = serde_yaml::from_str(yaml_str)?;
    for task in &config.tasks {
        if task.script.is_some() && task.command.is_some() {
            return Err(RunbookError::Config(format!(
                "Task '{}' declares both 'script' and 'command'",
                task.name
            )));
        }
        let empty_command = match &task.command {
            Some(Command::Single(cmd)) => cmd.trim().is_empty(),
            Some(Command::Multiple(parts)) => parts.first().map_or(true, |p| p.trim().is_empty()),
            None => false,
        };
        if empty_command || task.script.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(RunbookError::Config(format!(
                "Task '{}' has an empty command",
                task.name
            )));
        }
    }
    Ok(config)
}

/// JSON Schema describing the recipe file format
pub fn recipe_json_schema() -> RunbookResult<String> {
    let schema = schemars::schema_for!(RecipeConfig);
    Ok(serde_json::to_string_pretty(&schema)?)
}
