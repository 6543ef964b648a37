#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    #[error("text is required")]
    Missing,
    #[error("text must not be blank")]
    Blank,
}

/// Trims `text` and rejects it if nothing is left.
pub fn validate_text(text: &str) -> Result<String, TextError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TextError::Blank);
    }
    Ok(trimmed.to_string())
}
