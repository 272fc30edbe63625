//! CLI command implementations

pub mod auth;
pub mod project;

pub use auth::AuthCommand;
pub use project::ProjectCommand;
