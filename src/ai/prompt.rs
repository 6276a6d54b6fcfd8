use crate::db::types::Language;

use super::ChatMessage;

const SYSTEM_PROMPT: &str = r#"You are an expert code analyzer and interview preparation assistant. When given source code and its programming language, you MUST return a JSON object with exactly these fields:

{
  "error_analysis": "Detailed analysis of syntax errors, logical errors, runtime risks, edge case failures, and inefficient patterns found in the code.",
  "corrected_code": "The fixed version of the code with all errors corrected.",
  "correction_explanation": "Explanation of what was corrected and why.",
  "optimized_code": "A more efficient implementation of the code.",
  "optimization_strategy": "Explanation of the optimization strategy and comparison with original.",
  "time_complexity": "Big-O time complexity with explanation.",
  "space_complexity": "Big-O space complexity with explanation.",
  "step_by_step": "Line-by-line explanation of the code with example input/output walkthrough.",
  "conceptual_dive": "Deep explanation of concepts used (Arrays, HashMap, Recursion, DP, BFS, DFS, etc.), theory behind them, and real-world applications.",
  "interview_questions": {
    "easy": [{"question": "...", "answer": "..."}],
    "medium": [{"question": "...", "answer": "..."}],
    "hard": [{"question": "...", "answer": "..."}]
  },
  "viva_questions": [{"question": "...", "answer": "..."}],
  "company_relevance": [
    {"company": "Amazon", "relevance": "High/Medium/Low", "similar_pattern": "...", "interview_round": "OA/Technical/System Design"},
    {"company": "Microsoft", "relevance": "...", "similar_pattern": "...", "interview_round": "..."},
    {"company": "Google", "relevance": "...", "similar_pattern": "...", "interview_round": "..."},
    {"company": "Uber", "relevance": "...", "similar_pattern": "...", "interview_round": "..."},
    {"company": "Meta", "relevance": "...", "similar_pattern": "...", "interview_round": "..."}
  ],
  "practice_problems": [
    {"title": "...", "platform": "LeetCode/HackerRank/CodeChef", "difficulty": "Easy/Medium/Hard", "description": "...", "why_related": "..."}
  ]
}

Generate 5 easy, 5 medium, and 5 hard interview questions. Generate 10 viva questions. Generate at least 5 practice problems.
All content must be dynamically generated based on the actual code logic and concepts used. Return ONLY valid JSON, no markdown."#;

/// Builds the two-message completion payload: the fixed schema instruction
/// plus the user's code fenced by its language. Callers guarantee the code is
/// non-empty after trimming.
pub fn build_messages(language: Language, source_code: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: "system".to_string(),
            content: SYSTEM_PROMPT.to_string(),
        },
        ChatMessage {
            role: "user".to_string(),
            content: format!(
                "Language: {lang}\n\nSource Code:\n```{lang}\n{code}\n```",
                lang = language.as_str(),
                code = source_code
            ),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_exactly_two_messages() {
        let messages = build_messages(Language::Python, "def add(a, b): return a + b");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
    }

    #[test]
    fn system_message_carries_the_schema() {
        let messages = build_messages(Language::Java, "class A {}");
        assert!(messages[0].content.contains("\"interview_questions\""));
        assert!(messages[0].content.contains("Return ONLY valid JSON"));
    }

    #[test]
    fn user_message_embeds_language_tag_and_code() {
        let code = "const x = [1, 2, 3];";
        let messages = build_messages(Language::Typescript, code);
        let user = &messages[1].content;
        assert!(user.contains("Language: typescript"));
        assert!(user.contains("```typescript\n"));
        assert!(user.contains(code));
    }
}
