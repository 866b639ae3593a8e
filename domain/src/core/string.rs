//! String utilities for the domain layer.

/// Cut `s` down to at most `max_chars` characters, appending `...` when
/// anything was dropped.
///
/// Counts `char`s rather than bytes so an excerpt never splits a code point.
pub fn excerpt(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((end, _)) => format!("{}...", &s[..end]),
    }
}
