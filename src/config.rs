//! Generator configuration
//!
//! Read from `restgen.toml` in the project root. Every field has a default so
//! a missing file still yields a usable configuration.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for one scaffolding run
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Persisted model -> table mapping, used when no CLI options are given
    pub models: BTreeMap<String, String>,

    /// Tables excluded from full-schema discovery
    pub excluded_tables: Vec<String>,

    /// Prefix stripped from table names when deriving model names
    pub table_prefix: String,

    /// Directory whose filenames are scanned for migration matches
    pub migrations_dir: PathBuf,

    /// Root directory the artifact compilers write generated files under
    pub output_root: PathBuf,

    /// Seeder entry-point file patched by the auth flow
    pub seeder_path: PathBuf,

    /// Signature of the method the seeder patch appends into
    pub seeder_method: String,

    /// Marker whose presence means the seeder is already patched
    pub seeder_marker: String,

    /// External generator command invoked per artifact kind
    pub generator_command: String,

    /// Database connection string; falls back to the `DATABASE_URL` env var
    pub database_url: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            models: BTreeMap::new(),
            excluded_tables: vec!["migrations".to_string()],
            table_prefix: String::new(),
            migrations_dir: PathBuf::from("migrations"),
            output_root: PathBuf::from("storage/crud"),
            seeder_path: PathBuf::from("src/db/seeder.rs"),
            seeder_method: "async fn run".to_string(),
            seeder_marker: "seed_auth_actions".to_string(),
            generator_command: "restgen-compile".to_string(),
            database_url: None,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Resolve the database connection string.
    pub fn database_url(&self) -> Result<String> {
        if let Some(url) = &self.database_url {
            return Ok(url.clone());
        }

        std::env::var("DATABASE_URL")
            .context("No database_url in config and DATABASE_URL is not set")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_file_missing() {
        let config = GeneratorConfig::load(Path::new("does/not/exist.toml")).unwrap();
        assert!(config.models.is_empty());
        assert_eq!(config.migrations_dir, PathBuf::from("migrations"));
        assert_eq!(config.excluded_tables, vec!["migrations".to_string()]);
    }

    #[test]
    fn test_parse_config() {
        let raw = r#"
            table_prefix = "wp_"
            excluded_tables = ["migrations", "sessions"]

            [models]
            blog-post = "blog_posts"
            comment = "comments"
        "#;
        let config: GeneratorConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.table_prefix, "wp_");
        assert_eq!(config.models.get("blog-post").unwrap(), "blog_posts");
        assert_eq!(config.excluded_tables.len(), 2);
    }
}
