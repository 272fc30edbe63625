//! Seeder file patching
//!
//! The auth flow appends seeder-invocation statements into the project's
//! seeder entry point. Patching is textual and deliberately narrow: locate
//! the method signature, find the matching closing brace of its body, and
//! insert the code immediately before it, leaving every other byte intact.
//! Idempotence is marker-based — a file already referencing the auth seeders
//! is left unchanged.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::error::ScaffoldError;

/// Insert `code` exactly once before the closing brace of the method
/// identified by `method_signature`, preserving all other content.
///
/// Brace matching is naive (no string/comment awareness); the contract is
/// documented so the textual strategy can be swapped for a structured one
/// without changing callers.
pub fn append_code_to_method(
    source: &str,
    code: &str,
    method_signature: &str,
) -> Result<String, ScaffoldError> {
    let sig_pos = source.find(method_signature).ok_or_else(|| {
        ScaffoldError::SeederPatch(format!("method signature '{method_signature}' not found"))
    })?;

    let after_sig = &source[sig_pos..];
    let open_offset = after_sig.find('{').ok_or_else(|| {
        ScaffoldError::SeederPatch(format!("no method body after '{method_signature}'"))
    })?;

    let mut depth = 0usize;
    for (offset, c) in after_sig[open_offset..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let insert_at = sig_pos + open_offset + offset;
                    let mut patched = String::with_capacity(source.len() + code.len());
                    patched.push_str(&source[..insert_at]);
                    patched.push_str(code);
                    patched.push_str(&source[insert_at..]);
                    return Ok(patched);
                }
            }
            _ => {}
        }
    }

    Err(ScaffoldError::SeederPatch(format!(
        "unbalanced braces in body of '{method_signature}'"
    )))
}

/// Filesystem patcher for the seeder entry-point file.
pub struct SeederPatcher<'a> {
    path: &'a Path,
    method_signature: &'a str,
    marker: &'a str,
}

impl<'a> SeederPatcher<'a> {
    /// Create a patcher for the seeder at `path`.
    #[must_use]
    pub fn new(path: &'a Path, method_signature: &'a str, marker: &'a str) -> Self {
        Self {
            path,
            method_signature,
            marker,
        }
    }

    /// Append `code` into the seeder method unless the marker is already
    /// present. Returns whether the file was rewritten.
    pub fn patch(&self, code: &str) -> Result<bool> {
        let source = fs::read_to_string(self.path)
            .with_context(|| format!("Failed to read seeder file: {}", self.path.display()))?;

        if source.contains(self.marker) {
            return Ok(false);
        }

        let patched = append_code_to_method(&source, code, self.method_signature)?;

        fs::write(self.path, patched)
            .with_context(|| format!("Failed to write seeder file: {}", self.path.display()))?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEEDER: &str = "\
use crate::db::Db;

pub struct Seeder;

impl Seeder {
    pub async fn run(db: &Db) -> anyhow::Result<()> {
        seed_base_data(db).await?;
        Ok(())
    }
}
";

    #[test]
    fn test_inserts_before_method_close() {
        let patched =
            append_code_to_method(SEEDER, "        seed_extra(db).await?;\n", "async fn run").unwrap();

        let insert_pos = patched.find("seed_extra").unwrap();
        let base_pos = patched.find("seed_base_data").unwrap();
        assert!(insert_pos > base_pos);

        // Everything outside the insertion is preserved byte-for-byte.
        let restored = patched.replacen("        seed_extra(db).await?;\n", "", 1);
        assert_eq!(restored, SEEDER);
    }

    #[test]
    fn test_inserts_exactly_once() {
        let patched =
            append_code_to_method(SEEDER, "        seed_extra(db).await?;\n", "async fn run").unwrap();
        assert_eq!(patched.matches("seed_extra").count(), 1);
    }

    #[test]
    fn test_missing_signature() {
        let err = append_code_to_method(SEEDER, "code", "fn does_not_exist").unwrap_err();
        assert!(matches!(err, ScaffoldError::SeederPatch(_)));
    }

    #[test]
    fn test_unbalanced_braces() {
        let err = append_code_to_method("fn run() {", "code", "fn run").unwrap_err();
        assert!(matches!(err, ScaffoldError::SeederPatch(_)));
    }

    #[test]
    fn test_patcher_is_idempotent_on_marker() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seeder.rs");
        fs::write(&path, SEEDER).unwrap();

        let patcher = SeederPatcher::new(&path, "async fn run", "seed_extra");
        let code = "        seed_extra(db).await?;\n";

        assert!(patcher.patch(code).unwrap());
        let after_first = fs::read_to_string(&path).unwrap();

        // Marker is now present, so the second patch is a no-op.
        assert!(!patcher.patch(code).unwrap());
        let after_second = fs::read_to_string(&path).unwrap();

        assert_eq!(after_first, after_second);
        assert_eq!(after_second.matches("seed_extra").count(), 1);
    }
}
