//! Generation pipeline orchestration
//!
//! Sequences the artifact compilers over a resolved pairing in a fixed
//! order. Generation is best-effort: each step's failure is reported and
//! recorded, never fatal to the steps after it — partial output is more
//! useful to the operator than an all-or-nothing abort.

use anyhow::Result;
use console::style;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::auth_flow::{AuthOutcome, AuthProvisioner, SeederPatchStatus};
use crate::config::GeneratorConfig;
use crate::input::ModelTablePairing;
use crate::interact::Interaction;
use crate::notation::NotationSet;
use crate::schema::SchemaPort;

/// One generated artifact category, used to address its compiler by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// CRUD model sources
    Models,
    /// Response transformers
    Transformers,
    /// CRUD controllers
    Controllers,
    /// Per-model API documentation definitions
    SwaggerDefinitions,
    /// Route files
    Routes,
    /// Root API documentation scaffold
    SwaggerRoot,
    /// Authentication controllers
    AuthControllers,
    /// Authentication routes
    AuthRoutes,
    /// Authentication API documentation definitions
    AuthSwaggerDefinitions,
    /// Migration files for tables lacking one
    Migrations,
    /// IDE/type-helper documentation
    IdeHelpers,
}

impl ArtifactKind {
    /// Compiler name for this artifact kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Models => "models",
            Self::Transformers => "transformers",
            Self::Controllers => "controllers",
            Self::SwaggerDefinitions => "swagger-definitions",
            Self::Routes => "routes",
            Self::SwaggerRoot => "swagger-root",
            Self::AuthControllers => "auth-controllers",
            Self::AuthRoutes => "auth-routes",
            Self::AuthSwaggerDefinitions => "auth-swagger-definitions",
            Self::Migrations => "migrations",
            Self::IdeHelpers => "ide-helpers",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// String options handed to a compiler invocation.
pub type CompileOptions = BTreeMap<String, String>;

/// Capability set of per-artifact code generators.
///
/// Each invocation is expected to be idempotent: re-running regenerates or
/// overwrites previously generated files instead of erroring on "already
/// exists".
pub trait ArtifactCompiler {
    /// Invoke the compiler for `kind` with the given options.
    fn compile(&mut self, kind: ArtifactKind, options: &CompileOptions) -> Result<()>;
}

/// How one pipeline step ended.
#[derive(Debug)]
pub enum StepStatus {
    /// Step ran to completion
    Completed,
    /// Step was skipped (operator declined, or nothing to do)
    Skipped(String),
    /// Step failed; later steps still ran
    Failed(String),
}

/// Record of one pipeline step.
#[derive(Debug)]
pub struct StepOutcome {
    /// Step label, the compiled artifact kind for compiler steps
    pub label: String,
    /// Terminal status of the step
    pub status: StepStatus,
}

/// Summary of one generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Step records in execution order
    pub steps: Vec<StepOutcome>,
}

impl GenerationReport {
    fn record(&mut self, label: impl Into<String>, status: StepStatus) {
        self.steps.push(StepOutcome {
            label: label.into(),
            status,
        });
    }

    /// Labels of steps that ran to completion.
    pub fn completed(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().filter_map(|s| match s.status {
            StepStatus::Completed => Some(s.label.as_str()),
            _ => None,
        })
    }

    /// Labels and reasons of failed steps.
    pub fn failed(&self) -> impl Iterator<Item = (&str, &str)> {
        self.steps.iter().filter_map(|s| match &s.status {
            StepStatus::Failed(reason) => Some((s.label.as_str(), reason.as_str())),
            _ => None,
        })
    }

    /// True when no step failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed().next().is_none()
    }
}

/// Core pipeline: sequences the artifact compilers over the resolved input.
pub struct GenerationOrchestrator<'a> {
    config: &'a GeneratorConfig,
    schema: &'a dyn SchemaPort,
}

impl<'a> GenerationOrchestrator<'a> {
    /// Create an orchestrator over the run's configuration and schema port.
    #[must_use]
    pub fn new(config: &'a GeneratorConfig, schema: &'a dyn SchemaPort) -> Self {
        Self { config, schema }
    }

    /// Run the full generation sequence and report per-step outcomes.
    pub fn generate(
        &self,
        pairing: &ModelTablePairing,
        gap: &BTreeSet<String>,
        compilers: &mut dyn ArtifactCompiler,
        interaction: &mut dyn Interaction,
    ) -> Result<GenerationReport> {
        let notation = NotationSet::from_pairing(pairing);
        let tables_csv = pairing.tables_csv();
        let mut report = GenerationReport::default();

        Self::compile_step(
            &mut report,
            compilers,
            ArtifactKind::Models,
            options(&[("models", notation.camel_csv.as_str()), ("tables", tables_csv.as_str())]),
        );
        Self::compile_step(
            &mut report,
            compilers,
            ArtifactKind::Transformers,
            options(&[("models", notation.camel_csv.as_str())]),
        );
        Self::compile_step(
            &mut report,
            compilers,
            ArtifactKind::Controllers,
            options(&[("models", notation.camel_csv.as_str())]),
        );
        Self::compile_step(
            &mut report,
            compilers,
            ArtifactKind::SwaggerDefinitions,
            options(&[("models", notation.kebab_csv.as_str()), ("tables", tables_csv.as_str())]),
        );
        Self::compile_step(
            &mut report,
            compilers,
            ArtifactKind::Routes,
            options(&[("models", notation.kebab_csv.as_str())]),
        );
        Self::compile_step(&mut report, compilers, ArtifactKind::SwaggerRoot, CompileOptions::new());

        self.auth_step(&mut report, compilers, interaction)?;
        Self::migrations_step(&mut report, compilers, gap);
        Self::ide_helpers_step(&mut report, compilers, interaction)?;

        Ok(report)
    }

    /// Run one compiler invocation, isolating its failure.
    fn compile_step(
        report: &mut GenerationReport,
        compilers: &mut dyn ArtifactCompiler,
        kind: ArtifactKind,
        options: CompileOptions,
    ) {
        match compilers.compile(kind, &options) {
            Ok(()) => {
                println!("  {} {}", style("✓").green(), kind);
                report.record(kind.as_str(), StepStatus::Completed);
            }
            Err(err) => {
                println!("  {} {}: {err:#}", style("✗").red(), kind);
                report.record(kind.as_str(), StepStatus::Failed(format!("{err:#}")));
            }
        }
    }

    /// Optional auth scaffolding sub-flow (default: yes).
    fn auth_step(
        &self,
        report: &mut GenerationReport,
        compilers: &mut dyn ArtifactCompiler,
        interaction: &mut dyn Interaction,
    ) -> Result<()> {
        if !interaction.confirm("Generate auth code?", true)? {
            report.record("auth", StepStatus::Skipped("declined by operator".to_string()));
            return Ok(());
        }

        let provisioner = AuthProvisioner::new(self.config, self.schema);
        match provisioner.run(compilers, interaction) {
            Ok(AuthOutcome::Provisioned(auth)) => {
                if auth.failed_compilers.is_empty() {
                    report.record("auth", StepStatus::Completed);
                } else {
                    let reasons = auth
                        .failed_compilers
                        .iter()
                        .map(|(kind, reason)| format!("{kind}: {reason}"))
                        .collect::<Vec<_>>()
                        .join("; ");
                    report.record("auth", StepStatus::Failed(reasons));
                }
                // The auth flow is complete even when the seeder patch fails;
                // the failure still lands in the report on its own line.
                if let SeederPatchStatus::Failed(reason) = auth.seeder {
                    report.record("auth-seeder", StepStatus::Failed(reason));
                }
            }
            Ok(AuthOutcome::Declined) => {
                report.record("auth", StepStatus::Skipped("migration declined".to_string()));
            }
            Err(err) => {
                println!("  {} auth: {err:#}", style("✗").red());
                report.record("auth", StepStatus::Failed(format!("{err:#}")));
            }
        }

        Ok(())
    }

    /// Migration generation for exactly the gapped tables, non-interactive.
    fn migrations_step(
        report: &mut GenerationReport,
        compilers: &mut dyn ArtifactCompiler,
        gap: &BTreeSet<String>,
    ) {
        if gap.is_empty() {
            report.record(
                ArtifactKind::Migrations.as_str(),
                StepStatus::Skipped("all tables have migration files".to_string()),
            );
            return;
        }

        let tables = gap.iter().cloned().collect::<Vec<_>>().join(",");
        Self::compile_step(
            report,
            compilers,
            ArtifactKind::Migrations,
            options(&[("tables", tables.as_str()), ("no-interaction", "true")]),
        );
    }

    /// Optional IDE/type-helper documentation (default: yes).
    fn ide_helpers_step(
        report: &mut GenerationReport,
        compilers: &mut dyn ArtifactCompiler,
        interaction: &mut dyn Interaction,
    ) -> Result<()> {
        if interaction.confirm("Generate ide helper documentation?", true)? {
            Self::compile_step(report, compilers, ArtifactKind::IdeHelpers, CompileOptions::new());
        } else {
            report.record(
                ArtifactKind::IdeHelpers.as_str(),
                StepStatus::Skipped("declined by operator".to_string()),
            );
        }
        Ok(())
    }
}

/// Build a [`CompileOptions`] map from key/value pairs.
fn options(pairs: &[(&str, &str)]) -> CompileOptions {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}
