//! Retrieval strategy selection
//!
//! Maps analyzer output and surface features of the query onto concrete
//! retrieval parameters. Rule precedence is deliberate: later rules may
//! only raise `top_k`, never lower what an earlier rule set, except the
//! summary rule which is an absolute override (and already dominates the
//! complexity raise of 5).

use serde::{Deserialize, Serialize};

use crate::analysis::ComplexityLevel;
use crate::types::RetrievedChunk;

/// Source-name substrings favoured for definition-style questions:
/// syllabi and lecture notes tend to hold the canonical phrasing.
const DEFINITION_SOURCES: [&str; 5] = ["syllabus", "syllabi", "syllabus.pdf", "notes", "lecture"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievalStrategy {
    pub top_k: usize,
    /// Case-insensitive substrings matched against each candidate's
    /// source id, applied client-side after the raw similarity query.
    /// Narrows only; may legitimately empty the result set.
    pub source_filters: Option<Vec<String>>,
}

impl RetrievalStrategy {
    /// Apply the source filters to an ordered result set, preserving
    /// retrieval-rank order. No filters means pass-through.
    pub fn filter_chunks(&self, chunks: Vec<RetrievedChunk>) -> Vec<RetrievedChunk> {
        let Some(filters) = &self.source_filters else {
            return chunks;
        };
        chunks
            .into_iter()
            .filter(|chunk| {
                let source = chunk.source_id.to_lowercase();
                filters.iter().any(|f| source.contains(&f.to_lowercase()))
            })
            .collect()
    }
}

pub struct StrategySelector {
    default_top_k: usize,
}

impl StrategySelector {
    pub fn new(default_top_k: usize) -> Self {
        Self { default_top_k }
    }

    pub fn select(&self, query: &str, complexity: ComplexityLevel) -> RetrievalStrategy {
        let mut top_k = self.default_top_k;
        let mut source_filters = None;

        let q_lower = query.to_lowercase();

        // Definition-style questions bias toward syllabus/notes sources.
        if q_lower.starts_with("what is")
            || q_lower.contains("define")
            || q_lower.contains("definition")
        {
            top_k = self.default_top_k.max(2);
            source_filters = Some(DEFINITION_SOURCES.iter().map(|s| s.to_string()).collect());
        }

        // Whole-topic summaries want a wider net. Absolute override.
        if q_lower.contains("summarize") || q_lower.contains("give a summary") {
            top_k = 6;
        }

        // Complex queries raise the floor but never lower a prior rule.
        if complexity == ComplexityLevel::Complex {
            top_k = top_k.max(5);
        }

        tracing::debug!(top_k, has_filters = source_filters.is_some(), "selected retrieval strategy");

        RetrievalStrategy {
            top_k,
            source_filters,
        }
    }
}
