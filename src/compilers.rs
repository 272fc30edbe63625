//! External artifact compiler invocation
//!
//! The per-artifact template compilers live outside this crate. Like the
//! original by-name generator dispatch, [`ProcessCompilerSet`] addresses
//! them through one configured generator command, passing the artifact kind
//! as the subcommand and the compile options as `--key=value` arguments.

use anyhow::{Context, Result};
use std::process::Command;

use crate::error::ScaffoldError;
use crate::orchestrator::{ArtifactCompiler, ArtifactKind, CompileOptions};

/// Artifact compiler set backed by an external generator command.
pub struct ProcessCompilerSet {
    command: String,
}

impl ProcessCompilerSet {
    /// Create a compiler set invoking `command`.
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl ArtifactCompiler for ProcessCompilerSet {
    fn compile(&mut self, kind: ArtifactKind, options: &CompileOptions) -> Result<()> {
        let mut invocation = Command::new(&self.command);
        invocation.arg(kind.as_str());
        for (key, value) in options {
            invocation.arg(format!("--{key}={value}"));
        }

        let status = invocation
            .status()
            .with_context(|| format!("Failed to run generator command: {}", self.command))?;

        if !status.success() {
            return Err(ScaffoldError::CompilerInvocation {
                kind: kind.as_str().to_string(),
                reason: status.to_string(),
            }
            .into());
        }

        Ok(())
    }
}
