//! restgen CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::cognitive_complexity)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use restgen::commands::{AuthCommand, ProjectCommand};

#[derive(Parser)]
#[command(name = "restgen")]
#[command(version)]
#[command(about = "Generate a CRUD REST API layer from a database schema", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the full REST API project (models, transformers,
    /// controllers, documentation, routes, auth)
    Project {
        /// List of models, written as CSV in kebab notation
        #[arg(long)]
        models: Option<String>,

        /// List of tables, written as CSV
        #[arg(long)]
        tables: Option<String>,

        /// Configuration file
        #[arg(long, default_value = "restgen.toml")]
        config: PathBuf,

        /// Answer every prompt with its default instead of asking
        #[arg(long)]
        yes: bool,
    },
    /// Scaffold REST API authentication code
    Auth {
        /// Configuration file
        #[arg(long, default_value = "restgen.toml")]
        config: PathBuf,

        /// Answer every prompt with its default instead of asking
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Project {
            models,
            tables,
            config,
            yes,
        } => {
            let cmd = ProjectCommand::new(models, tables, config, yes);
            cmd.execute()?;
        }
        Commands::Auth { config, yes } => {
            let cmd = AuthCommand::new(config, yes);
            cmd.execute()?;
        }
    }

    Ok(())
}
