//! CLI for inspecting and using a path registry.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fsreg_core::config::{self, RegistryConfig};
use std::io;
use std::path::PathBuf;

use commands::{run_cat, run_check, run_ls, run_paths, run_put};

/// Top-level CLI for fsreg.
#[derive(Debug, Parser)]
#[command(name = "fsreg")]
#[command(about = "fsreg: named filesystem registry with global and per-context paths", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/fsreg/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List configured paths with their scope and backend url.
    Paths {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Open every configured path and report failures.
    Check,

    /// Print a file from a path.
    Cat {
        /// Path name.
        name: String,
        /// File inside the path.
        file: String,
    },

    /// Write text to a file in a path (creates or truncates).
    Put {
        /// Path name.
        name: String,
        /// File inside the path.
        file: String,
        /// Contents to write.
        text: String,
    },

    /// List a directory in a path.
    Ls {
        /// Path name.
        name: String,
        /// Directory inside the path (default: root).
        dir: Option<String>,
    },
}

fn load_config(explicit: Option<&std::path::Path>) -> Result<RegistryConfig> {
    match explicit {
        Some(path) => config::load_from(path),
        None => config::load_or_init(),
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        let mut out = io::stdout().lock();
        match cli.command {
            CliCommand::Paths { json } => run_paths(&cfg, json, &mut out)?,
            CliCommand::Check => run_check(&cfg, &mut out)?,
            CliCommand::Cat { name, file } => run_cat(&cfg, &name, &file, &mut out)?,
            CliCommand::Put { name, file, text } => run_put(&cfg, &name, &file, &text, &mut out)?,
            CliCommand::Ls { name, dir } => run_ls(&cfg, &name, dir.as_deref(), &mut out)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
