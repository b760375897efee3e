//! Command actions
//!
//! [`CommandAction`] runs an external process (a shell command, a program with
//! arguments, or a script file) and treats a non-zero exit status as failure.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{bail, Context};
use tracing::debug;

use crate::action::Action;

/// Environment variable carrying the name of the task being executed
pub const TASK_ENV_VAR: &str = "RUNBOOK_TASK";

/// What to spawn for a command action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    /// A command line interpreted by `sh -c`
    Shell(String),
    /// A program invoked directly with arguments
    Exec { program: String, args: Vec<String> },
    /// A script file. Relative paths are taken from the current process
    /// directory, never from the action's working directory.
    Script(PathBuf),
}

/// Action that runs an external command for a task
#[derive(Debug, Clone)]
pub struct CommandAction {
    task_name: String,
    kind: CommandKind,
    working_dir: PathBuf,
    env: BTreeMap<String, String>,
}

impl CommandAction {
    pub fn new(task_name: impl Into<String>, kind: CommandKind, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            task_name: task_name.into(),
            kind,
            working_dir: working_dir.into(),
            env: BTreeMap::new(),
        }
    }

    pub fn with_env(mut self, env: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env.extend(env);
        self
    }

    fn build_command(&self) -> anyhow::Result<Command> {
        let command = match &self.kind {
            CommandKind::Shell(cmd) => {
                let mut command = Command::new("sh");
                command.arg("-c").arg(cmd);
                command
            }
            CommandKind::Exec { program, args } => {
                if program.is_empty() {
                    bail!("Task '{}' has an empty command", self.task_name);
                }
                let mut command = Command::new(program);
                command.args(args);
                command
            }
            CommandKind::Script(script_path) => {
                // The child runs in `working_dir`, so the path must not stay relative
                let full_script_path = std::path::absolute(script_path).with_context(|| {
                    format!("Failed to resolve script path '{}'", script_path.display())
                })?;

                if !full_script_path.exists() {
                    bail!("Script file '{}' not found", full_script_path.display());
                }
                Command::new(full_script_path)
            }
        };
        Ok(command)
    }

    fn describe(&self) -> String {
        match &self.kind {
            CommandKind::Shell(cmd) => cmd.clone(),
            CommandKind::Exec { program, args } => {
                std::iter::once(program.as_str())
                    .chain(args.iter().map(String::as_str))
                    .collect::<Vec<_>>()
                    .join(" ")
            }
            CommandKind::Script(path) => path.display().to_string(),
        }
    }
}

impl Action for CommandAction {
    fn execute(&self) -> anyhow::Result<()> {
        let mut command = self.build_command()?;
        command
            .current_dir(&self.working_dir)
            .envs(&self.env)
            .env(TASK_ENV_VAR, &self.task_name);

        let description = self.describe();
        debug!(task = %self.task_name, command = %description, dir = %self.working_dir.display(), "spawning command");

        let status = command
            .status()
            .with_context(|| format!("Failed to execute command '{}'", description))?;

        if !status.success() {
            match status.code() {
                Some(code) => bail!("Command '{}' failed with exit code {}", description, code),
                None => bail!("Command '{}' was terminated by a signal", description),
            }
        }
        Ok(())
    }
}
