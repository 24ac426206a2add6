//! String utility functions for text processing

/// Cut a string to at most `max_chars` characters without splitting a
/// multi-byte character.
///
/// # Arguments
///
/// * `s` - The input string
/// * `max_chars` - Maximum number of characters to keep
///
/// # Returns
///
/// The (possibly shortened) string
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Interpret the usual truthy spellings found in link parameters.
pub fn to_bool(s: &str) -> bool {
    matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Split a comma separated list, dropping empty items.
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
