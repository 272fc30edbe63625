//! Error types for the scaffolding pipeline

use thiserror::Error;

/// Scaffolding error type
///
/// Validation and resolution errors halt the run before any generation side
/// effects. Compiler and seeder errors are isolated per step and aggregated
/// into the final report instead of aborting the sequence.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// No model names were supplied
    #[error("no model names were supplied (expected CSV in kebab notation)")]
    EmptyModelList,

    /// No table names were supplied
    #[error("no table names were supplied (expected CSV)")]
    EmptyTableList,

    /// Model and table lists differ in length
    #[error("table name quantity ({tables}) is not equal to model name quantity ({models})")]
    CountMismatch {
        /// Number of models supplied
        models: usize,
        /// Number of tables supplied
        tables: usize,
    },

    /// Model name is not a valid kebab-case identifier
    #[error("invalid model name: '{0}' (expected kebab notation, e.g. 'blog-post')")]
    InvalidModelName(String),

    /// The same table appears more than once in the pairing
    #[error("duplicate table name in pairing: '{0}'")]
    DuplicateTable(String),

    /// Ambiguous interactive response before any generation happened
    #[error("could not resolve model/table input from the given answer")]
    UnresolvedInput,

    /// The configuration source is unusable
    #[error("wrong config: {0}")]
    InvalidConfig(String),

    /// An artifact compiler exited unsuccessfully
    #[error("compiler for '{kind}' failed: {reason}")]
    CompilerInvocation {
        /// Artifact kind whose compiler failed
        kind: String,
        /// Exit status or spawn failure description
        reason: String,
    },

    /// The seeder file could not be patched
    #[error("seeder patch failed: {0}")]
    SeederPatch(String),
}
