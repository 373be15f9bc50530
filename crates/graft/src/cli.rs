//! Command line interface
//!
//! | Command | Output |
//! |---------|--------|
//! | `graft value <KEY>` | resolved value as pretty JSON |
//! | `graft eval <EXPR>` | `true` or `false` |
//! | `graft formats` | registered value file formats |
//!
//! Every command reads the value source described by the configuration file
//! (`--config`, or `graft.toml` in the usual locations).

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use graft_application::ports::registry::list_value_formats;
use graft_domain::{Error, Result, ValueSource};
use graft_infrastructure::GraftContext;

/// Command line interface for graft
#[derive(Parser, Debug)]
#[command(name = "graft")]
#[command(about = "graft - Inspect the values and conditions a container would see")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the value under a dotted key as JSON
    Value {
        /// Dotted key path, e.g. `server.port`
        key: String,
    },
    /// Evaluate a condition expression, e.g. `#cache.enabled == true`
    Eval {
        /// Condition expression
        expression: String,
    },
    /// List the registered value file formats
    Formats,
}

impl Command {
    /// Whether the command needs a bootstrapped context
    pub fn needs_context(&self) -> bool {
        !matches!(self, Self::Formats)
    }
}

/// Run a command that needs no configuration
pub fn describe_formats() -> String {
    list_value_formats()
        .into_iter()
        .map(|(name, description)| format!("{name:<6} {description}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Run `command` against `context`, returning what to print
pub fn execute(command: &Command, context: &GraftContext) -> Result<String> {
    match command {
        Command::Value { key } => {
            let value = context
                .values()
                .get_value(key)?
                .ok_or_else(|| Error::missing_value(key.as_str()))?;
            serde_json::to_string_pretty(&value)
                .map_err(|e| Error::internal(format!("failed to render value '{key}': {e}")))
        }
        Command::Eval { expression } => context
            .container()
            .evaluate(expression)
            .map(|active| active.to_string()),
        Command::Formats => Ok(describe_formats()),
    }
}
