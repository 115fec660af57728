//! Answer persistence
//!
//! Every answered query leaves a durable, human-readable record pairing the
//! literal query and answer with the exact chunks that informed it, so any
//! answer is auditable independent of the generator's own citation
//! behavior. Records are append-only: written once, never mutated.

use anyhow::Context;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{Query, RetrievedChunk};

/// Maximum number of query characters carried into the filename.
const QUERY_PREFIX_LEN: usize = 60;

pub struct AnswerPersister {
    answers_dir: PathBuf,
}

impl AnswerPersister {
    pub fn new(answers_dir: impl Into<PathBuf>) -> Self {
        Self {
            answers_dir: answers_dir.into(),
        }
    }

    pub fn answers_dir(&self) -> &Path {
        &self.answers_dir
    }

    /// Write the answer record and return its path. The filename combines a
    /// second-granularity timestamp with a sanitized query prefix.
    pub fn persist(
        &self,
        query: &Query,
        answer: &str,
        chunks: &[RetrievedChunk],
    ) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(&self.answers_dir)
            .with_context(|| format!("creating answers dir {}", self.answers_dir.display()))?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let filename = format!("answer_{}_{}.txt", timestamp, sanitize_query(&query.text));
        let path = self.answers_dir.join(filename);

        let mut record = String::new();
        record.push_str("=== Query ===\n");
        record.push_str(&query.text);
        record.push_str("\n\n=== Answer ===\n");
        record.push_str(answer);
        record.push_str("\n\n=== Sources Retrieved ===\n");
        for chunk in chunks {
            record.push_str(&format!("- {}\n", chunk.citation_label()));
        }

        fs::write(&path, record)
            .with_context(|| format!("writing answer record {}", path.display()))?;

        tracing::info!(path = %path.display(), sources = chunks.len(), "persisted answer record");
        Ok(path)
    }
}

/// Join the query on whitespace, cap the length, and replace anything that
/// could break a path.
fn sanitize_query(query: &str) -> String {
    let joined = query.split_whitespace().collect::<Vec<_>>().join("_");
    joined
        .chars()
        .take(QUERY_PREFIX_LEN)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Query, RetrievedChunk};

    #[test]
    fn sanitizes_path_breaking_characters() {
        let sanitized = sanitize_query("what about ../other/dir?");
        assert!(!sanitized.contains('/'));
        assert!(!sanitized.contains('.'));
        assert!(!sanitized.contains('?'));
        assert_eq!(sanitize_query("a b\tc"), "a_b_c");
    }

    #[test]
    fn caps_query_prefix_length() {
        let long = "word ".repeat(40);
        assert!(sanitize_query(&long).chars().count() <= QUERY_PREFIX_LEN);
    }

    #[test]
    fn writes_record_with_sections_and_source_order() {
        let dir = tempfile::tempdir().unwrap();
        let persister = AnswerPersister::new(dir.path());
        let query = Query::new("what is a heap");
        let chunks = vec![
            RetrievedChunk::local("a", "notes.pdf", "2"),
            RetrievedChunk::local("b", "lecture1.pdf", "0"),
        ];

        let path = persister
            .persist(&query, "A heap is a priority structure.", &chunks)
            .unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        assert!(content.contains("=== Query ===\nwhat is a heap"));
        assert!(content.contains("=== Answer ===\nA heap is a priority structure."));
        let first = content.find("- notes.pdf_chunk2").unwrap();
        let second = content.find("- lecture1.pdf_chunk0").unwrap();
        assert!(first < second);
    }

    #[test]
    fn creates_answers_dir_on_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep").join("answers");
        let persister = AnswerPersister::new(&nested);
        persister
            .persist(&Query::new("define entropy"), "answer", &[])
            .unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn filename_embeds_query_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let persister = AnswerPersister::new(dir.path());
        let path = persister
            .persist(&Query::new("what is TCP"), "answer", &[])
            .unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("answer_"));
        assert!(name.ends_with("what_is_TCP.txt"));
    }
}
