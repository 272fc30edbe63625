//! restgen library
//!
//! Schema-driven REST API scaffolding: resolves a model/table pairing from
//! options, configuration or full-schema discovery, then sequences the
//! artifact compilers (models, transformers, controllers, documentation,
//! routes, auth) over it, best-effort.

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::cognitive_complexity)]
#![allow(clippy::multiple_crate_versions)]

pub mod auth_flow;
pub mod commands;
pub mod compilers;
pub mod config;
pub mod error;
pub mod input;
pub mod interact;
pub mod migrations;
pub mod notation;
pub mod orchestrator;
pub mod schema;
pub mod seeder;

pub use auth_flow::{AuthOutcome, AuthProvisioner, AuthReport, AuthTableState, SeederPatchStatus};
pub use config::GeneratorConfig;
pub use error::ScaffoldError;
pub use input::ModelTablePairing;
pub use interact::{ConsoleInteraction, Interaction, ScriptedInteraction};
pub use notation::NotationSet;
pub use orchestrator::{
    ArtifactCompiler, ArtifactKind, CompileOptions, GenerationOrchestrator, GenerationReport,
};
pub use schema::{PgSchema, SchemaPort};
