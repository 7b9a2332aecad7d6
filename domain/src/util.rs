//! Shared utility functions.

/// Shorten `s` to at most `max_chars` characters for log lines, appending
/// an ellipsis when something was cut.
pub fn preview(s: &str, max_chars: usize) -> String {
    let mut chars = s.char_indices();
    match chars.nth(max_chars) {
        Some((cut, _)) => format!("{}…", &s[..cut]),
        None => s.to_string(),
    }
}
