//! Logging helpers

/// Maximum length of text to log
pub const MAX_LOG_TEXT_LENGTH: usize = 50;

const SENSITIVE_PATTERNS: &[&str] = &[
    "password",
    "secret",
    "token",
    "xoxb-",
    "xoxp-",
    "api_key",
    "bearer",
    "-----begin",
];

/// Mask message text before it reaches the logs.
///
/// Redacts anything that looks like a credential and truncates long text on a
/// character boundary.
#[must_use]
pub fn mask_for_logging(text: &str) -> String {
    let lower = text.to_lowercase();
    if SENSITIVE_PATTERNS.iter().any(|p| lower.contains(p)) {
        return "[REDACTED]".to_string();
    }

    match text.char_indices().nth(MAX_LOG_TEXT_LENGTH) {
        Some((cut, _)) => format!("{}...[truncated]", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_passes_through() {
        assert_eq!(mask_for_logging("hi"), "hi");
    }

    #[test]
    fn test_sensitive_text_redacted() {
        assert_eq!(mask_for_logging("my token is xoxb-123"), "[REDACTED]");
        assert_eq!(mask_for_logging("PASSWORD=hunter2"), "[REDACTED]");
    }

    #[test]
    fn test_long_text_truncated_on_char_boundary() {
        let text = "é".repeat(60);
        let masked = mask_for_logging(&text);
        assert!(masked.ends_with("...[truncated]"));
        assert_eq!(masked.chars().filter(|c| *c == 'é').count(), MAX_LOG_TEXT_LENGTH);
    }
}
