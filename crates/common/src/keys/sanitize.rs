use std::sync::LazyLock;

use regex::Regex;

/// Maximum length of a sanitized comment or label, in characters
pub const MAX_COMMENT_LENGTH: usize = 256;

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern must compile"));

/// Sanitize free text that will later be shown back to a user.
///
/// Strips `<...>` tag-like sequences, replaces any remaining `<`, `>`, `"`
/// or `'` with `_`, drops everything outside printable ASCII (0x20-0x7E)
/// and truncates to [`MAX_COMMENT_LENGTH`] characters.
///
/// The result is raw text, not HTML-escaped. Escaping belongs to whatever
/// renders it.
pub fn sanitize_comment(raw: &str) -> String {
    let stripped = TAG_PATTERN.replace_all(raw, "");

    stripped
        .chars()
        .map(|c| match c {
            '<' | '>' | '"' | '\'' => '_',
            c => c,
        })
        .filter(|c| (' '..='~').contains(c))
        .take(MAX_COMMENT_LENGTH)
        .collect()
}

/// Sanitize a producer-supplied share label.
///
/// Runs [`sanitize_comment`] and trims the result; a label that ends up
/// blank is treated as absent.
pub fn sanitize_label(raw: Option<&str>) -> Option<String> {
    let sanitized = sanitize_comment(raw?);
    let trimmed = sanitized.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
