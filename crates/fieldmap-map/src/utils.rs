//! Utility functions for name comparison.

/// Normalizes a field name for comparison.
///
/// Lowercases, turns `_ - . / \` into spaces and splits camelCase humps, so
/// `emailAddress`, `email_address` and `Email-Address` all become
/// `email address`.
pub fn normalize_name(raw: &str) -> String {
    let mut spaced = String::with_capacity(raw.len() + 4);
    let mut prev_lower = false;
    for ch in raw.trim().chars() {
        if ch.is_uppercase() && prev_lower {
            spaced.push(' ');
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        spaced.push(ch);
    }
    spaced
        .to_lowercase()
        .replace(['_', '-', '.', '/', '\\'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
