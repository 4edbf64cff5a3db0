//! Line and field splitting for uploaded CSV text.

/// Splits text into non-blank lines.
///
/// Lines end at `\n` or `\r\n`. Lines that are empty or whitespace-only are
/// dropped; the remaining lines are returned untrimmed.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Parses a CSV line into trimmed fields.
///
/// A `"` toggles the quoted state and is not kept; commas inside quotes do
/// not split. Doubled quotes are not treated as an escape: `"a""b"` toggles
/// twice and yields `ab`.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    // Don't forget the last field
    fields.push(current.trim().to_string());
    fields
}
