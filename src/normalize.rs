//! Author-name canonicalization
//!
//! Collapses free-form author strings to a single `Initial. Lastname` form so
//! the same person appearing as "Jane Smith", "J Smith" and "Jane A. Smith"
//! maps to one node. This is a deliberately lossy heuristic: middle names and
//! initials are dropped, only the final whitespace-delimited token is kept as
//! the surname (so hyphenated and multi-word surnames are truncated), and two
//! distinct people sharing an initial and surname merge into one identity.
//! Downstream grouping depends on this behavior; do not "improve" it quietly.

use regex_lite::Regex;
use std::sync::OnceLock;

fn normalized_form() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Single uppercase initial, dot, optional space, capitalized surname.
    RE.get_or_init(|| Regex::new(r"^[A-Z]\.\s?[A-Z][a-z]+$").expect("valid name pattern"))
}

/// Canonicalize an author name to `"{Initial}. {Lastname}"`.
///
/// Inputs already in canonical form are returned unchanged (trimmed), which
/// makes normalization idempotent. Empty or whitespace-only inputs come back
/// as-is.
pub fn normalize_author_name(name: &str) -> String {
    let trimmed = name.trim();
    if normalized_form().is_match(trimmed) {
        return trimmed.to_string();
    }

    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    if parts.is_empty() {
        return name.to_string();
    }

    let first = parts[0];
    let initial = if first.chars().count() == 1 {
        format!("{first}.")
    } else {
        let c = first.chars().next().unwrap_or_default();
        format!("{}.", c.to_uppercase())
    };

    let last = parts[parts.len() - 1];
    let last_name = capitalize(last);

    format!("{initial} {last_name}")
}

/// First letter uppercased, rest lowercased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}
