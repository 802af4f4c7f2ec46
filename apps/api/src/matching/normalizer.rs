/// Canonicalizes raw resume text before any matching.
///
/// Lower-cases every character, turns each `\n` and `\r` into a single space
/// and trims surrounding whitespace. Inner runs of spaces are left alone, so
/// `"a\r\nb"` becomes `"a  b"`.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

/// True when the text carries nothing to match once normalized.
pub fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}
