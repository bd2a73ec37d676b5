const FENCE: &str = "```";

/// Returns the interior of a fenced code block, or `None` when the trimmed
/// input does not open with a fence. A missing closing fence (truncated
/// output) keeps everything after the opening marker.
pub fn strip_fences(raw: &str) -> Option<&str> {
    let rest = raw.trim().strip_prefix(FENCE)?;
    let rest = rest.trim_start_matches(|c: char| {
        c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.')
    });

    let inner = match rest.rfind(FENCE) {
        Some(end) => &rest[..end],
        None => rest,
    };
    Some(inner.trim())
}

/// First `{` through last `}` inclusive.
pub fn json_boundaries(text: &str) -> Result<&str, String> {
    let start = text
        .find('{')
        .ok_or_else(|| "no opening brace found".to_string())?;
    let end = text
        .rfind('}')
        .ok_or_else(|| "no closing brace found".to_string())?;

    if end < start {
        return Err(format!(
            "last closing brace (byte {end}) comes before first opening brace (byte {start})"
        ));
    }

    Ok(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fences_with_language_tag() {
        let raw = "```json\n{\"a\":1}\n```";
        assert_eq!(strip_fences(raw), Some("{\"a\":1}"));
    }

    #[test]
    fn test_strip_fences_without_language_tag() {
        let raw = "  ```\n{\"a\":1}\n```\n";
        assert_eq!(strip_fences(raw), Some("{\"a\":1}"));
    }

    #[test]
    fn test_strip_fences_inline_object() {
        assert_eq!(strip_fences("```{\"a\":1}```"), Some("{\"a\":1}"));
    }

    #[test]
    fn test_strip_fences_missing_closing_fence() {
        let raw = "```json\n{\"a\": [1, 2";
        assert_eq!(strip_fences(raw), Some("{\"a\": [1, 2"));
    }

    #[test]
    fn test_unfenced_input_is_left_alone() {
        assert_eq!(strip_fences("{\"a\":1}"), None);
        assert_eq!(strip_fences("Here you go: ```json {}```"), None);
    }

    #[test]
    fn test_boundaries_skip_surrounding_prose() {
        let text = "Sure! Here is the report: {\"a\": {\"b\": 2}} Let me know.";
        assert_eq!(json_boundaries(text), Ok("{\"a\": {\"b\": 2}}"));
    }

    #[test]
    fn test_boundaries_missing() {
        assert!(json_boundaries("no json here at all").is_err());
        assert!(json_boundaries("{ never closed").is_err());
        assert!(json_boundaries("only a closer }").is_err());
    }

    #[test]
    fn test_boundaries_reversed() {
        let err = json_boundaries("} backwards {").unwrap_err();
        assert!(err.contains("comes before"));
    }
}
