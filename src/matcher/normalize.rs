/// Quote characters stripped during normalization (straight and curly)
const QUOTE_CHARS: [char; 6] = ['"', '\'', '\u{201c}', '\u{201d}', '\u{2018}', '\u{2019}'];

/// Normalize a name for comparison: strip quotes, lowercase, trim, and
/// collapse internal whitespace runs to single spaces.
pub fn normalize(name: &str) -> String {
    let stripped: String = name.chars().filter(|c| !QUOTE_CHARS.contains(c)).collect();
    stripped
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
