/// Trim then case-fold.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Exact match after normalization, no partial credit.
pub fn evaluate(submitted: &str, secret: &str) -> bool {
    normalize(submitted) == normalize(secret)
}
