//! Database schema access
//!
//! Introspection and the two auth-table creation side effects run behind the
//! [`SchemaPort`] trait; [`PgSchema`] is the sqlx-backed implementation used
//! by the CLI commands. The pipeline itself is synchronous, so `PgSchema`
//! drives its pool on a private current-thread runtime.

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::runtime::{Builder, Runtime};

/// Schema introspection and auth-table provisioning capability
pub trait SchemaPort {
    /// List all base table names in the schema.
    fn list_table_names(&self) -> Result<Vec<String>>;

    /// Check that every named table exists.
    fn exists_tables(&self, names: &[&str]) -> Result<bool>;

    /// Check a single table's existence.
    fn has_table(&self, name: &str) -> Result<bool>;

    /// Create the baseline `users` table.
    fn create_users_table(&self) -> Result<()>;

    /// Create the baseline `password_resets` table.
    fn create_password_resets_table(&self) -> Result<()>;
}

/// PostgreSQL-backed schema port
pub struct PgSchema {
    runtime: Runtime,
    pool: PgPool,
}

impl PgSchema {
    /// Connect to the database behind `url`.
    pub fn connect(url: &str) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start database runtime")?;

        let pool = runtime
            .block_on(PgPoolOptions::new().max_connections(1).connect(url))
            .context("Failed to connect to database")?;

        Ok(Self { runtime, pool })
    }

    fn execute_all(&self, statements: &[&str]) -> Result<()> {
        for sql in statements {
            self.runtime
                .block_on(sqlx::query(sql).execute(&self.pool))
                .with_context(|| format!("Failed to execute: {sql}"))?;
        }
        Ok(())
    }
}

impl SchemaPort for PgSchema {
    fn list_table_names(&self) -> Result<Vec<String>> {
        self.runtime
            .block_on(
                sqlx::query_scalar::<_, String>(
                    "SELECT table_name FROM information_schema.tables \
                     WHERE table_schema = 'public' AND table_type = 'BASE TABLE' \
                     ORDER BY table_name",
                )
                .fetch_all(&self.pool),
            )
            .context("Failed to list table names")
    }

    fn exists_tables(&self, names: &[&str]) -> Result<bool> {
        for name in names {
            if !self.has_table(name)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn has_table(&self, name: &str) -> Result<bool> {
        self.runtime
            .block_on(
                sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS (SELECT 1 FROM information_schema.tables \
                     WHERE table_schema = 'public' AND table_name = $1)",
                )
                .bind(name)
                .fetch_one(&self.pool),
            )
            .with_context(|| format!("Failed to check table existence: {name}"))
    }

    fn create_users_table(&self) -> Result<()> {
        self.execute_all(&[
            "CREATE TABLE users (\
                id SERIAL PRIMARY KEY, \
                name VARCHAR(255) NOT NULL, \
                email VARCHAR(255) NOT NULL UNIQUE, \
                password VARCHAR(255) NOT NULL, \
                remember_token VARCHAR(100), \
                created_at TIMESTAMP, \
                updated_at TIMESTAMP\
            )",
        ])
    }

    fn create_password_resets_table(&self) -> Result<()> {
        self.execute_all(&[
            "CREATE TABLE password_resets (\
                email VARCHAR(255) NOT NULL, \
                token VARCHAR(255) NOT NULL, \
                created_at TIMESTAMP\
            )",
            "CREATE INDEX password_resets_email_index ON password_resets (email)",
        ])
    }
}
