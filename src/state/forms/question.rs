//! Question value objects

use serde::{Deserialize, Serialize};

/// A single question shown by the iterative form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    /// Round this question belongs to (zero-based)
    pub round: usize,
}

impl Question {
    /// Create a question without help text
    pub fn new(text: &str, round: usize) -> Self {
        Self {
            text: text.to_string(),
            help_text: None,
            round,
        }
    }

    /// Create a question with help text
    pub fn with_help(text: &str, help_text: &str, round: usize) -> Self {
        Self {
            text: text.to_string(),
            help_text: Some(help_text.to_string()),
            round,
        }
    }

    /// Help text, if any non-blank text was provided
    pub fn help(&self) -> Option<&str> {
        self.help_text
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }
}

/// A question paired with the answer the user gave
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_no_help() {
        let q = Question::new("What is the audience?", 0);
        assert_eq!(q.text, "What is the audience?");
        assert!(q.help().is_none());
        assert_eq!(q.round, 0);
    }

    #[test]
    fn test_blank_help_is_hidden() {
        let q = Question::with_help("Topic?", "   ", 1);
        assert!(q.help().is_none());
    }

    #[test]
    fn test_help_is_trimmed() {
        let q = Question::with_help("Topic?", "  e.g. Rust async  ", 1);
        assert_eq!(q.help(), Some("e.g. Rust async"));
    }

    #[test]
    fn test_deserialize_without_help() {
        let q: Question = serde_json::from_str(r#"{"text": "Why?", "round": 2}"#).unwrap();
        assert_eq!(q, Question::new("Why?", 2));
    }
}
