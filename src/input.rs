//! Model/table input resolution
//!
//! Reconciles CLI-supplied CSV lists, the persisted configuration mapping, or
//! full-schema discovery into one validated [`ModelTablePairing`]. Resolution
//! happens before any generation side effect; a validation failure or an
//! unrecognized interactive answer aborts the run with nothing written.

use anyhow::Result;
use console::style;

use crate::config::GeneratorConfig;
use crate::error::ScaffoldError;
use crate::interact::Interaction;
use crate::notation;
use crate::schema::SchemaPort;

/// Resolved 1:1 association between model names and their backing tables.
///
/// Invariants held by construction: both lists are equal length and
/// non-empty, table names are unique, and model names are valid kebab
/// identifiers.
#[derive(Debug, Clone)]
pub struct ModelTablePairing {
    models: Vec<String>,
    tables: Vec<String>,
}

impl ModelTablePairing {
    /// Build a pairing from parallel model and table lists.
    pub fn new(models: Vec<String>, tables: Vec<String>) -> Result<Self, ScaffoldError> {
        if models.is_empty() || models[0].is_empty() {
            return Err(ScaffoldError::EmptyModelList);
        }
        if tables.is_empty() || tables[0].is_empty() {
            return Err(ScaffoldError::EmptyTableList);
        }
        if models.len() != tables.len() {
            return Err(ScaffoldError::CountMismatch {
                models: models.len(),
                tables: tables.len(),
            });
        }

        for model in &models {
            if !notation::is_valid_kebab_name(model) {
                return Err(ScaffoldError::InvalidModelName(model.clone()));
            }
        }

        for (i, table) in tables.iter().enumerate() {
            if tables[..i].contains(table) {
                return Err(ScaffoldError::DuplicateTable(table.clone()));
            }
        }

        Ok(Self { models, tables })
    }

    /// Build a pairing from the two CSV command options.
    pub fn from_csv(models_csv: &str, tables_csv: &str) -> Result<Self, ScaffoldError> {
        let models: Vec<String> = models_csv.split(',').map(str::to_string).collect();
        let tables: Vec<String> = tables_csv.split(',').map(str::to_string).collect();
        Self::new(models, tables)
    }

    /// Model names in kebab notation, in pairing order.
    #[must_use]
    pub fn model_names(&self) -> &[String] {
        &self.models
    }

    /// Table names, in pairing order.
    #[must_use]
    pub fn table_names(&self) -> &[String] {
        &self.tables
    }

    /// Tables joined as CSV, as the artifact compilers expect them.
    #[must_use]
    pub fn tables_csv(&self) -> String {
        self.tables.join(",")
    }

    /// Number of (model, table) pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// True when the pairing holds no entries. Unreachable for validated
    /// pairings, kept for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Iterate over (model, table) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.models
            .iter()
            .map(String::as_str)
            .zip(self.tables.iter().map(String::as_str))
    }
}

/// Resolve the (model, table) pairing for this run.
///
/// With both CSV options present the lists are validated and used as-is.
/// Otherwise the operator picks between the persisted configuration mapping
/// and full-schema discovery; any other answer aborts with
/// [`ScaffoldError::UnresolvedInput`].
pub fn resolve(
    models_opt: Option<&str>,
    tables_opt: Option<&str>,
    config: &GeneratorConfig,
    schema: &dyn SchemaPort,
    interaction: &mut dyn Interaction,
) -> Result<ModelTablePairing> {
    if let (Some(models), Some(tables)) = (models_opt, tables_opt) {
        return Ok(ModelTablePairing::from_csv(models, tables)?);
    }

    println!(
        "{}",
        style("You did not pass --models and --tables options").yellow()
    );

    let choice = interaction.choose(
        "What to do next?",
        &[
            "Take the models and tables list from the configuration file",
            "Generate code for ALL database tables",
        ],
        Some(1),
    )?;

    match choice {
        Some(0) => from_config(config),
        Some(1) => from_schema(config, schema),
        _ => Err(ScaffoldError::UnresolvedInput.into()),
    }
}

/// Load the pairing from the persisted configuration mapping.
fn from_config(config: &GeneratorConfig) -> Result<ModelTablePairing> {
    if config.models.is_empty() {
        return Err(ScaffoldError::InvalidConfig(
            "the [models] mapping is empty".to_string(),
        )
        .into());
    }

    let models: Vec<String> = config.models.keys().cloned().collect();
    let tables: Vec<String> = config.models.values().cloned().collect();

    Ok(ModelTablePairing::new(models, tables)?)
}

/// Discover all tables and derive model names from them.
fn from_schema(config: &GeneratorConfig, schema: &dyn SchemaPort) -> Result<ModelTablePairing> {
    let tables: Vec<String> = schema
        .list_table_names()?
        .into_iter()
        .filter(|table| !config.excluded_tables.contains(table))
        .collect();

    let models = notation::derive_model_names(&tables, &config.table_prefix);

    Ok(ModelTablePairing::new(models, tables)?)
}
