use regex::Regex;
use std::sync::OnceLock;

use super::AiError;

/// How much of a non-JSON reply is kept for diagnostics.
const RAW_PREFIX_CHARS: usize = 500;

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)```").unwrap())
}

/// Pulls the JSON object out of a model reply. The model is asked for bare
/// JSON but sometimes wraps it in a markdown fence; both forms are accepted.
/// The object's shape is trusted as-is — no field-level validation.
pub fn extract_analysis(content: &str) -> Result<serde_json::Value, AiError> {
    let candidate = match fence_regex().captures(content) {
        Some(caps) => caps.get(1).map(|m| m.as_str()).unwrap_or("").trim(),
        None => content.trim(),
    };

    serde_json::from_str(candidate).map_err(|_| AiError::ParseFailure {
        raw: content.chars().take(RAW_PREFIX_CHARS).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_bare_json() {
        let parsed = extract_analysis(r#"{"time_complexity": "O(n)"}"#).unwrap();
        assert_eq!(parsed["time_complexity"], "O(n)");
    }

    #[test]
    fn parses_json_inside_tagged_fence() {
        let content = "```json\n{\"error_analysis\": \"none\"}\n```";
        let parsed = extract_analysis(content).unwrap();
        assert_eq!(parsed["error_analysis"], "none");
    }

    #[test]
    fn parses_json_inside_untagged_fence() {
        let content = "```\n{\"space_complexity\": \"O(1)\"}\n```";
        let parsed = extract_analysis(content).unwrap();
        assert_eq!(parsed["space_complexity"], "O(1)");
    }

    #[test]
    fn ignores_prose_around_the_fence() {
        let content = "Here is the analysis:\n```json\n{\"ok\": true}\n```\nHope that helps!";
        let parsed = extract_analysis(content).unwrap();
        assert_eq!(parsed["ok"], true);
    }

    #[test]
    fn reparse_of_serialized_output_is_identity() {
        let original = json!({
            "time_complexity": "O(n log n)",
            "interview_questions": {"easy": [{"question": "q", "answer": "a"}]}
        });
        let reparsed = extract_analysis(&original.to_string()).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn invalid_json_carries_raw_text() {
        let err = extract_analysis("Sorry, I cannot analyze that.").unwrap_err();
        match err {
            AiError::ParseFailure { raw } => {
                assert_eq!(raw, "Sorry, I cannot analyze that.")
            }
            other => panic!("expected ParseFailure, got {other:?}"),
        }
    }

    #[test]
    fn raw_text_is_truncated_to_a_prefix() {
        let long = "x".repeat(2000);
        let err = extract_analysis(&long).unwrap_err();
        match err {
            AiError::ParseFailure { raw } => {
                assert_eq!(raw.chars().count(), 500);
                assert!(long.starts_with(&raw));
            }
            other => panic!("expected ParseFailure, got {other:?}"),
        }
    }
}
