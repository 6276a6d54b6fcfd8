use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Languages the analyzer accepts. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Java,
    Cpp,
    Javascript,
    Typescript,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::Javascript => "javascript",
            Language::Typescript => "typescript",
        }
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "python" => Ok(Language::Python),
            "java" => Ok(Language::Java),
            "cpp" => Ok(Language::Cpp),
            "javascript" => Ok(Language::Javascript),
            "typescript" => Ok(Language::Typescript),
            _ => Err(UnsupportedLanguage),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct UnsupportedLanguage;

/// Tier tag on a generated question row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionTier {
    Easy,
    Medium,
    Hard,
    Viva,
}

impl QuestionTier {
    /// The interview tiers, in the order they are flattened and stored.
    pub const INTERVIEW: [QuestionTier; 3] =
        [QuestionTier::Easy, QuestionTier::Medium, QuestionTier::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionTier::Easy => "easy",
            QuestionTier::Medium => "medium",
            QuestionTier::Hard => "hard",
            QuestionTier::Viva => "viva",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_parses_all_supported_values() {
        for name in ["python", "java", "cpp", "javascript", "typescript"] {
            let language: Language = name.parse().expect(name);
            assert_eq!(language.as_str(), name);
        }
    }

    #[test]
    fn language_rejects_unknown_values() {
        assert!("ruby".parse::<Language>().is_err());
        assert!("Python".parse::<Language>().is_err());
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn interview_tiers_are_ordered_easy_to_hard() {
        let tags: Vec<&str> = QuestionTier::INTERVIEW.iter().map(|t| t.as_str()).collect();
        assert_eq!(tags, ["easy", "medium", "hard"]);
    }
}
