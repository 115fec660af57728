//! Query analysis heuristics
//!
//! Cheap, deterministic classification of an incoming query: how complex it
//! is, what kind of interaction it represents, and whether it is too vague
//! to retrieve for at all. All pure functions over the query text; no model
//! calls, no state.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static BARE_PRONOUN_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"\b(this|that|it)\b").expect("pronoun regex is valid")
});

/// Interrogative/imperative openers that mark a query as a direct question.
const QUESTION_OPENERS: [&str; 10] = [
    "what", "why", "how", "when", "where", "who", "which", "explain", "compare", "summarize",
];

/// Trigger words that push a query to `Complex` regardless of length.
const COMPLEX_TRIGGERS: [&str; 9] = [
    "compare",
    "summarize",
    "evaluation",
    "critique",
    "detailed",
    "derive",
    "example",
    "project",
    "implementation",
];

/// Exact short commands that are always too vague to act on.
const AMBIGUOUS_COMMANDS: [&str; 4] = ["help", "explain", "notes", "summary"];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityLevel {
    Simple,
    Medium,
    Complex,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    PdfUpload,
    Summarize,
    Question,
}

pub struct QueryAnalyzer {}

impl QueryAnalyzer {
    pub fn new() -> Self {
        Self {}
    }

    /// Classify query complexity. First matching rule wins:
    /// 1. Starts with a question opener and is short -> Simple
    /// 2. Long, or carries a known heavy-work trigger word -> Complex
    /// 3. Otherwise -> Medium
    pub fn classify_complexity(&self, query: &str) -> ComplexityLevel {
        let q = query.trim();
        let q_lower = q.to_lowercase();

        let starts_with_opener = QUESTION_OPENERS.iter().any(|w| q_lower.starts_with(w));
        if starts_with_opener && q.chars().count() < 140 {
            return ComplexityLevel::Simple;
        }

        let word_count = q.split_whitespace().count();
        if word_count > 20 || COMPLEX_TRIGGERS.iter().any(|w| q_lower.contains(w)) {
            return ComplexityLevel::Complex;
        }

        ComplexityLevel::Medium
    }

    /// Decide the interaction modality. An attached file dominates the
    /// text; summary phrasing comes next; everything else is a question.
    pub fn detect_modality(&self, query: &str, has_uploaded_file: bool) -> Modality {
        if has_uploaded_file {
            return Modality::PdfUpload;
        }
        let q_lower = query.to_lowercase();
        if q_lower.contains("summarize") || q_lower.contains("summary") {
            return Modality::Summarize;
        }
        Modality::Question
    }

    /// Conservative vagueness check. Intentionally over-triggers: routing a
    /// clear but terse query to clarification is acceptable, answering a
    /// genuinely ambiguous one is not.
    pub fn is_ambiguous(&self, query: &str) -> bool {
        let q = query.trim();
        if q.chars().count() < 6 {
            return true;
        }
        let q_lower = q.to_lowercase();
        if AMBIGUOUS_COMMANDS.iter().any(|c| q_lower == *c) {
            return true;
        }
        // A bare context-dependent pronoun in a very short query means the
        // antecedent lives in the user's head, not in the text.
        if BARE_PRONOUN_RE.is_match(&q_lower) && q.split_whitespace().count() < 6 {
            return true;
        }
        false
    }
}

impl Default for QueryAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
