//! Full REST API project generation command

use anyhow::{Context, Result};
use console::style;
use std::path::PathBuf;

use crate::compilers::ProcessCompilerSet;
use crate::config::GeneratorConfig;
use crate::input;
use crate::interact::{ConsoleInteraction, Interaction, ScriptedInteraction};
use crate::migrations;
use crate::orchestrator::GenerationOrchestrator;
use crate::schema::{PgSchema, SchemaPort};

/// Generate the full CRUD REST API layer from the database schema.
pub struct ProjectCommand {
    models: Option<String>,
    tables: Option<String>,
    config_path: PathBuf,
    non_interactive: bool,
}

impl ProjectCommand {
    /// Create a new command instance.
    #[must_use]
    pub fn new(
        models: Option<String>,
        tables: Option<String>,
        config_path: PathBuf,
        non_interactive: bool,
    ) -> Self {
        Self {
            models,
            tables,
            config_path,
            non_interactive,
        }
    }

    /// Execute the command.
    pub fn execute(&self) -> Result<()> {
        let config = GeneratorConfig::load(&self.config_path)?;

        let schema = PgSchema::connect(&config.database_url()?)
            .context("Failed to open schema introspection connection")?;

        let mut interaction: Box<dyn Interaction> = if self.non_interactive {
            Box::new(ScriptedInteraction::accept_defaults())
        } else {
            Box::new(ConsoleInteraction::new())
        };

        let pairing = input::resolve(
            self.models.as_deref(),
            self.tables.as_deref(),
            &config,
            &schema,
            interaction.as_mut(),
        )?;

        println!(
            "{} {} {}",
            style("Generating REST API for").cyan().bold(),
            style(pairing.len()).green().bold(),
            style("models...").cyan().bold()
        );

        // The gap is computed over the whole schema, not just the resolved
        // pairing, so untouched tables still get their missing migrations.
        let all_tables = schema.list_table_names()?;
        let migration_files = migrations::scan_migration_filenames(&config.migrations_dir)?;
        let gap = migrations::compute_gap(&all_tables, &migration_files);

        let mut compilers = ProcessCompilerSet::new(config.generator_command.clone());
        let orchestrator = GenerationOrchestrator::new(&config, &schema);
        let report = orchestrator.generate(&pairing, &gap, &mut compilers, interaction.as_mut())?;

        println!();
        if report.is_clean() {
            println!(
                "{}",
                style("All files for the REST API project were generated!").green().bold()
            );
        } else {
            println!(
                "{}",
                style("REST API project generated with failures:").yellow().bold()
            );
            for (label, reason) in report.failed() {
                println!("  {} {label}: {reason}", style("✗").red());
            }
        }
        println!(
            "See the generated files under {}",
            style(config.output_root.display()).cyan()
        );

        Ok(())
    }
}
