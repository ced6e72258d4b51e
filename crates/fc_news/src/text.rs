use fc_core::ArticleText;

/// Collapses every whitespace run to a single space and trims both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The first `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Normalizes, then caps at `max_chars`. The cut may land mid-word.
pub fn prepare_article_text(raw: &str, max_chars: usize) -> ArticleText {
    let normalized = normalize_whitespace(raw);
    ArticleText::new(truncate_chars(&normalized, max_chars).to_string())
}
