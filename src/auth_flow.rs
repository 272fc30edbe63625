//! Authentication scaffolding sub-flow
//!
//! Small state machine over auth-table existence: both baseline tables
//! present means provisioning proceeds directly; otherwise the operator is
//! asked to migrate them first, and declining ends the flow with no action.
//! Provisioning compiles the auth artifacts and patches the seeder entry
//! point; a failed seeder patch is reported but does not undo the flow.

use anyhow::Result;
use console::style;

use crate::config::GeneratorConfig;
use crate::interact::Interaction;
use crate::orchestrator::{ArtifactCompiler, ArtifactKind, CompileOptions};
use crate::schema::SchemaPort;
use crate::seeder::SeederPatcher;

/// The two baseline auth tables.
pub const AUTH_TABLES: [&str; 2] = ["users", "password_resets"];

/// Statements appended into the seeder run method, one per auth seeder.
const AUTH_SEED_CALLS: &str = "\n        seed_auth_actions(db).await?;\
                               \n        seed_auth_groups(db).await?;\
                               \n        seed_auth_action_groups(db).await?;\
                               \n        seed_auth_group_users(db).await?;\n";

/// Observed existence of the baseline auth tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthTableState {
    /// Not yet introspected
    Unchecked,
    /// Both tables exist
    Present,
    /// At least one table is missing
    Absent,
}

/// How the seeder patch step ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeederPatchStatus {
    /// The seeder file gained the auth seed calls on this run
    Patched,
    /// The marker was already present; the file was left untouched
    AlreadyPatched,
    /// The file could not be read, parsed or written
    Failed(String),
}

/// Per-step record of one provisioning run.
///
/// Compiler failures and a failed seeder patch do not abort the flow; they
/// are collected here so the caller can aggregate them into its report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthReport {
    /// Auth compilers that failed, with reasons
    pub failed_compilers: Vec<(ArtifactKind, String)>,
    /// Terminal status of the seeder patch
    pub seeder: SeederPatchStatus,
}

impl AuthReport {
    /// True when every auth compiler and the seeder patch succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed_compilers.is_empty() && !matches!(self.seeder, SeederPatchStatus::Failed(_))
    }
}

/// Terminal result of the auth sub-flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Auth artifacts were compiled (and tables created when needed)
    Provisioned(AuthReport),
    /// Operator declined the table migration; nothing was generated
    Declined,
}

/// Nested orchestrator for the auth scaffolding flow.
pub struct AuthProvisioner<'a> {
    config: &'a GeneratorConfig,
    schema: &'a dyn SchemaPort,
}

impl<'a> AuthProvisioner<'a> {
    /// Create a provisioner over the run's configuration and schema port.
    #[must_use]
    pub fn new(config: &'a GeneratorConfig, schema: &'a dyn SchemaPort) -> Self {
        Self { config, schema }
    }

    /// Drive the state machine to a terminal state.
    pub fn run(
        &self,
        compilers: &mut dyn ArtifactCompiler,
        interaction: &mut dyn Interaction,
    ) -> Result<AuthOutcome> {
        match self.introspect()? {
            AuthTableState::Present => self.provision(compilers),
            AuthTableState::Absent => {
                println!("{}", style("No auth tables exist.").yellow().bold());
                self.choices_on_absent_tables(compilers, interaction)
            }
            AuthTableState::Unchecked => unreachable!("introspect always resolves the state"),
        }
    }

    /// Unchecked -> Present | Absent.
    fn introspect(&self) -> Result<AuthTableState> {
        if self.schema.exists_tables(&AUTH_TABLES)? {
            Ok(AuthTableState::Present)
        } else {
            Ok(AuthTableState::Absent)
        }
    }

    /// Ask the operator whether to migrate the missing tables. Anything but
    /// an explicit yes ends the flow with no action.
    fn choices_on_absent_tables(
        &self,
        compilers: &mut dyn ArtifactCompiler,
        interaction: &mut dyn Interaction,
    ) -> Result<AuthOutcome> {
        let choice = interaction.choose(
            "Migrate auth tables into database schema?",
            &["Yes", "No"],
            None,
        )?;

        match choice {
            Some(0) => {
                self.migrate_auth_tables()?;
                let outcome = self.provision(compilers)?;
                println!("{}", style("Auth code was generated.").green());
                Ok(outcome)
            }
            _ => {
                println!("{}", style("No auth code was generated.").yellow());
                Ok(AuthOutcome::Declined)
            }
        }
    }

    /// Create whichever baseline tables are missing.
    fn migrate_auth_tables(&self) -> Result<()> {
        if !self.schema.has_table("users")? {
            self.schema.create_users_table()?;
        }
        if !self.schema.has_table("password_resets")? {
            self.schema.create_password_resets_table()?;
        }
        Ok(())
    }

    /// Compile auth controllers, documentation definitions and routes, then
    /// patch the seeder. Compiler failures are logged, collected and the flow
    /// continues; a seeder patch failure is reported the same way while the
    /// flow still completes.
    fn provision(&self, compilers: &mut dyn ArtifactCompiler) -> Result<AuthOutcome> {
        let mut failed_compilers = Vec::new();
        for kind in [
            ArtifactKind::AuthControllers,
            ArtifactKind::AuthSwaggerDefinitions,
            ArtifactKind::AuthRoutes,
        ] {
            match compilers.compile(kind, &CompileOptions::new()) {
                Ok(()) => println!("  {} {kind}", style("✓").green()),
                Err(err) => {
                    println!("  {} {kind}: {err:#}", style("✗").red());
                    failed_compilers.push((kind, format!("{err:#}")));
                }
            }
        }

        let seeder = match self.patch_seeder() {
            Ok(true) => SeederPatchStatus::Patched,
            Ok(false) => SeederPatchStatus::AlreadyPatched,
            Err(err) => {
                println!("  {} seeder patch: {err:#}", style("✗").red());
                SeederPatchStatus::Failed(format!("{err:#}"))
            }
        };

        Ok(AuthOutcome::Provisioned(AuthReport {
            failed_compilers,
            seeder,
        }))
    }

    /// Append the auth seeder calls into the seeder run method, once.
    fn patch_seeder(&self) -> Result<bool> {
        let patcher = SeederPatcher::new(
            &self.config.seeder_path,
            &self.config.seeder_method,
            &self.config.seeder_marker,
        );
        patcher.patch(AUTH_SEED_CALLS)
    }
}
