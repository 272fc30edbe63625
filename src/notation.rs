//! Identifier notation transforms
//!
//! Model names travel through the pipeline in two derived forms: kebab
//! notation for route/documentation artifacts and upper camel notation for
//! model/transformer/controller artifacts. All transforms are idempotent so
//! an already-derived name set passes through unchanged.

use convert_case::{Case, Casing};

use crate::input::ModelTablePairing;

/// Convert a kebab-notation model name to upper camel notation
/// (`blog-post` -> `BlogPost`).
#[must_use]
pub fn kebab_to_camel(name: &str) -> String {
    name.to_case(Case::Pascal)
}

/// Derive kebab-notation model names from table names.
///
/// Strips `prefix` from the front of each table name when present, then
/// converts the remainder to kebab case (`wp_blog_posts` with prefix `wp_`
/// -> `blog-posts`).
#[must_use]
pub fn derive_model_names(table_names: &[String], prefix: &str) -> Vec<String> {
    table_names
        .iter()
        .map(|table| {
            let stripped = if prefix.is_empty() {
                table.as_str()
            } else {
                table.strip_prefix(prefix).unwrap_or(table.as_str())
            };
            stripped.to_case(Case::Kebab)
        })
        .collect()
}

/// Check that a name is a valid kebab-notation identifier
/// (lowercase alphanumeric and hyphens, starting with a letter).
#[must_use]
pub fn is_valid_kebab_name(name: &str) -> bool {
    let Some(first) = name.chars().next() else {
        return false;
    };
    if !first.is_ascii_lowercase() {
        return false;
    }
    name.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// CSV string forms of a pairing's model list, computed once per run.
#[derive(Debug, Clone)]
pub struct NotationSet {
    /// Models joined as supplied, kebab notation
    pub kebab_csv: String,
    /// Models converted to upper camel notation and joined
    pub camel_csv: String,
}

impl NotationSet {
    /// Compute both notations from a resolved pairing.
    #[must_use]
    pub fn from_pairing(pairing: &ModelTablePairing) -> Self {
        let models = pairing.model_names();
        let kebab_csv = models.join(",");
        let camel_csv = models
            .iter()
            .map(|m| kebab_to_camel(m))
            .collect::<Vec<_>>()
            .join(",");
        Self { kebab_csv, camel_csv }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab_to_camel() {
        assert_eq!(kebab_to_camel("blog-post"), "BlogPost");
        assert_eq!(kebab_to_camel("comment"), "Comment");
        assert_eq!(kebab_to_camel("user-profile-image"), "UserProfileImage");
    }

    #[test]
    fn test_kebab_to_camel_idempotent() {
        let once = kebab_to_camel("blog-post");
        assert_eq!(kebab_to_camel(&once), once);
    }

    #[test]
    fn test_derive_model_names_strips_prefix() {
        let tables = vec!["wp_blog_posts".to_string(), "wp_comments".to_string()];
        assert_eq!(derive_model_names(&tables, "wp_"), vec!["blog-posts", "comments"]);
    }

    #[test]
    fn test_derive_model_names_prefix_absent() {
        let tables = vec!["comments".to_string()];
        assert_eq!(derive_model_names(&tables, "wp_"), vec!["comments"]);
    }

    #[test]
    fn test_derive_model_names_idempotent() {
        let tables = vec!["blog_posts".to_string(), "tags".to_string()];
        let once = derive_model_names(&tables, "");
        let twice = derive_model_names(&once, "");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_valid_kebab_names() {
        assert!(is_valid_kebab_name("blog-post"));
        assert!(is_valid_kebab_name("comment"));
        assert!(is_valid_kebab_name("a1-b2"));
    }

    #[test]
    fn test_invalid_kebab_names() {
        assert!(!is_valid_kebab_name(""));
        assert!(!is_valid_kebab_name("BlogPost"));
        assert!(!is_valid_kebab_name("1tag"));
        assert!(!is_valid_kebab_name("blog_post"));
        assert!(!is_valid_kebab_name("-leading"));
    }
}
