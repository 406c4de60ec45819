//! Fuzzy matching utilities for "did you mean" hints.

use strsim::jaro_winkler;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Minimum similarity threshold for suggestions (0.0 to 1.0).
const MIN_SIMILARITY: f64 = 0.7;

/// Maximum number of suggestions to show.
const MAX_SUGGESTIONS: usize = 3;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Find candidates similar to `query`, best match first.
pub fn find_similar<S: AsRef<str>>(query: &str, candidates: &[S]) -> Vec<String> {
    let mut scored: Vec<(String, f64)> = candidates
        .iter()
        .map(|c| {
            let c = c.as_ref();
            (c.to_string(), jaro_winkler(query, c))
        })
        .filter(|(_, score)| *score >= MIN_SIMILARITY)
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.dedup_by(|a, b| a.0 == b.0);

    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(name, _)| name)
        .collect()
}

/// Format suggestions in cargo-style.
///
/// Returns None if no suggestions are available.
pub fn format_suggestions(suggestions: &[String]) -> Option<String> {
    match suggestions.len() {
        0 => None,
        1 => Some(format!("Did you mean `{}`?", suggestions[0])),
        _ => {
            let formatted: Vec<String> = suggestions.iter().map(|s| format!("`{}`", s)).collect();
            Some(format!("Did you mean one of: {}?", formatted.join(", ")))
        }
    }
}

/// Suggest the closest candidates to `query`, formatted for a help line.
pub fn suggest<S: AsRef<str>>(query: &str, candidates: &[S]) -> Option<String> {
    format_suggestions(&find_similar(query, candidates))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
