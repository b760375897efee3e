use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use runbook_core::configs::recipe::DEFAULT_RECIPE_FILE;
use runbook_core::recipe::Recipe;
use tracing_subscriber::EnvFilter;

mod commands;
mod reporter;

/// Runbook - A dependency-ordered task runner
#[derive(Parser)]
#[command(name = "runbook")]
#[command(about = "Run named, dependency-ordered build tasks")]
#[command(version)]
struct Cli {
    /// Path to the recipe file
    #[arg(short, long, global = true, default_value = DEFAULT_RECIPE_FILE)]
    file: PathBuf,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tasks declared in the recipe
    List,
    /// Show the execution order for a target without running it
    Plan {
        /// Target task (defaults to the recipe's default target)
        target: Option<String>,
    },
    /// Run a target and everything it depends on
    Run {
        /// Target task (defaults to the recipe's default target)
        target: Option<String>,
    },
    /// Show the task dependency graph
    Graph,
    /// Print the JSON Schema of the recipe file format
    Schema,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_recipe(path: &Path) -> Result<Recipe> {
    Recipe::load(path).map_err(|e| anyhow::anyhow!("Failed to load recipe: {}", e))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Execute command (CLI layer only handles presentation)
    match cli.command {
        Commands::List => commands::list::execute(&load_recipe(&cli.file)?),
        Commands::Plan { target } => {
            commands::plan::execute(&load_recipe(&cli.file)?, target.as_deref())
        }
        Commands::Run { target } => {
            commands::run::execute(&load_recipe(&cli.file)?, target.as_deref())
        }
        Commands::Graph => commands::graph::execute(&load_recipe(&cli.file)?),
        Commands::Schema => commands::schema::execute(),
    }
}
