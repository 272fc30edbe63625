//! Standalone authentication scaffolding command

use anyhow::{Context, Result};
use console::style;
use std::path::PathBuf;

use crate::auth_flow::{AuthOutcome, AuthProvisioner, SeederPatchStatus};
use crate::compilers::ProcessCompilerSet;
use crate::config::GeneratorConfig;
use crate::interact::{ConsoleInteraction, Interaction, ScriptedInteraction};
use crate::schema::PgSchema;

/// Scaffold REST API authentication code.
pub struct AuthCommand {
    config_path: PathBuf,
    non_interactive: bool,
}

impl AuthCommand {
    /// Create a new command instance.
    #[must_use]
    pub fn new(config_path: PathBuf, non_interactive: bool) -> Self {
        Self {
            config_path,
            non_interactive,
        }
    }

    /// Execute the command.
    pub fn execute(&self) -> Result<()> {
        let config = GeneratorConfig::load(&self.config_path)?;

        if !config.output_root.exists() {
            println!(
                "{}",
                style("The REST API project does not exist yet.").yellow()
            );
            println!(
                "Please run {} first",
                style("restgen project").cyan().bold()
            );
            return Ok(());
        }

        let schema = PgSchema::connect(&config.database_url()?)
            .context("Failed to open schema introspection connection")?;

        let mut interaction: Box<dyn Interaction> = if self.non_interactive {
            Box::new(ScriptedInteraction::accept_defaults())
        } else {
            Box::new(ConsoleInteraction::new())
        };

        let mut compilers = ProcessCompilerSet::new(config.generator_command.clone());
        let provisioner = AuthProvisioner::new(&config, &schema);

        match provisioner.run(&mut compilers, interaction.as_mut())? {
            AuthOutcome::Provisioned(auth) => {
                if auth.is_clean() {
                    println!(
                        "{}",
                        style("All files for REST API authentication were generated!").green().bold()
                    );
                } else {
                    println!(
                        "{}",
                        style("REST API authentication generated with failures:").yellow().bold()
                    );
                    for (kind, reason) in &auth.failed_compilers {
                        println!("  {} {kind}: {reason}", style("✗").red());
                    }
                }
                match auth.seeder {
                    SeederPatchStatus::Patched => {}
                    SeederPatchStatus::AlreadyPatched => {
                        println!("Seeder file was already up to date.");
                    }
                    SeederPatchStatus::Failed(reason) => {
                        println!(
                            "  {} seeder patch failed: {reason}",
                            style("✗").red()
                        );
                    }
                }
            }
            AuthOutcome::Declined => {}
        }

        Ok(())
    }
}
