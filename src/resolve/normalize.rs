//! Canonical forms of lookup queries

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ApiRefError, ApiRefResult};

const MODULE_PREFIX: &str = "module:";

static FORBIDDEN_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>()"']"#).expect("Invalid regex"));

/// The remainder of `key` after a leading `module:` prefix, if present
pub fn strip_module_prefix(key: &str) -> Option<&str> {
    key.strip_prefix(MODULE_PREFIX)
}

/// Dotted, lowercase, whitespace-free index key of a raw query.
///
/// `sap/m/Button#text`, `module:sap/m/Button#text` and ` sap.m .Button#Text `
/// all normalize to `sap.m.button.text`.
pub fn normalize(query: &str) -> String {
    dotted(query).to_lowercase()
}

/// Same as [`normalize`] but keeps the spelling of the query, so that names
/// cut from it can be reported the way the caller wrote them
pub fn dotted(query: &str) -> String {
    let trimmed = query.trim();
    let stripped = match trimmed.get(..MODULE_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(MODULE_PREFIX) => {
            &trimmed[MODULE_PREFIX.len()..]
        }
        _ => trimmed,
    };
    stripped
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == '/' || c == '#' { '.' } else { c })
        .collect()
}

/// Module-path form of a query, as used in the `module` attribute of symbols
pub fn normalize_for_module_name(query: &str) -> String {
    normalize(query).replace('.', "/")
}

/// Reject queries with characters that never occur in symbol names
pub fn validate_query(query: &str) -> ApiRefResult<()> {
    if query.trim().is_empty() {
        return Err(ApiRefError::invalid_input("Query must not be empty"));
    }
    if let Some(found) = FORBIDDEN_CHARS.find(query) {
        return Err(ApiRefError::invalid_input(format!(
            "Query contains invalid character '{}': {query}",
            found.as_str()
        )));
    }
    Ok(())
}
