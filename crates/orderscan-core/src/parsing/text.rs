use regex::Regex;
use std::sync::LazyLock;

/// Punctuation runs that start right after whitespace, e.g. the `.,` in
/// "Schraube .,M8". These are specks picked up from the scan. `|` is the
/// one symbol included: table rules touching a field read as a bar.
/// Other symbols (`+`, `€`, `°`) carry meaning and are kept.
static STRAY_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\s)[\p{P}|]+").expect("valid punctuation regex"));

/// Trimmed text, or `None` if nothing is left.
pub fn clean_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Clean a free-text description: drop punctuation that directly follows
/// whitespace and collapse repeated whitespace.
pub fn clean_description(raw: &str) -> Option<String> {
    let without_specks = STRAY_PUNCTUATION.replace_all(raw, "$1");
    let collapsed = without_specks.split_whitespace().collect::<Vec<_>>().join(" ");
    clean_text(&collapsed)
}

/// Accept an identifier only if it has exactly `length` characters after
/// trimming. Partial or garbled reads are rejected rather than passed on.
pub fn validate_identifier(raw: &str, length: usize) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.chars().count() == length {
        Some(trimmed.to_string())
    } else {
        None
    }
}
