const MAX_VISIBLE_LENGTH: usize = 100;

/// Sanitizes user-supplied text (blog content, prompts) for safe logging.
pub fn sanitize_content(content: &str) -> String {
    let trimmed = content.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let visible_end = trimmed
        .char_indices()
        .take(MAX_VISIBLE_LENGTH)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(trimmed.len());

    let sanitized = if visible_end < trimmed.len() {
        format!(
            "{}... ({} chars total)",
            &trimmed[..visible_end],
            trimmed.len()
        )
    } else {
        trimmed.to_string()
    };

    redact_sensitive_patterns(&sanitized)
}

fn redact_sensitive_patterns(text: &str) -> String {
    let patterns = [
        ("Bearer ", "Bearer [REDACTED]"),
        ("api_key=", "api_key=[REDACTED]"),
        ("password=", "password=[REDACTED]"),
        ("secret=", "secret=[REDACTED]"),
        ("token=", "token=[REDACTED]"),
    ];

    let mut result = text.to_string();
    for (pattern, replacement) in patterns {
        if let Some(idx) = result.find(pattern) {
            let end = result[idx + pattern.len()..]
                .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
                .map(|i| idx + pattern.len() + i)
                .unwrap_or(result.len());
            result = format!("{}{}{}", &result[..idx], replacement, &result[end..]);
        }
    }

    result
}
