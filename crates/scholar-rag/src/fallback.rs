//! Retrieval insufficiency and web fallback
//!
//! Detects when the local index gave the pipeline nothing usable, and, once
//! the user has authorized going outside their own material, reshapes web
//! search snippets into the same chunk form local retrieval produces so
//! the rest of the pipeline needs no special cases.

use crate::types::{ChunkOrigin, RetrievedChunk};

pub struct FallbackCoordinator {}

impl FallbackCoordinator {
    pub fn new() -> Self {
        Self {}
    }

    /// Drop blank chunks, keeping retrieval-rank order. The survivors are
    /// what assembly and persistence operate on.
    pub fn usable_chunks(&self, chunks: Vec<RetrievedChunk>) -> Vec<RetrievedChunk> {
        chunks.into_iter().filter(|c| !c.is_blank()).collect()
    }

    /// Insufficient means: nothing came back, or everything that came back
    /// is blank after trimming.
    pub fn is_insufficient(&self, chunks: &[RetrievedChunk]) -> bool {
        chunks.iter().all(|c| c.is_blank())
    }

    /// Wrap web snippets as retrieved chunks: source id `web`, synthetic
    /// 1-based chunk indices in returned order, blank snippets skipped.
    pub fn wrap_web_snippets(&self, snippets: Vec<String>) -> Vec<RetrievedChunk> {
        snippets
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .enumerate()
            .map(|(i, text)| RetrievedChunk {
                text,
                source_id: "web".to_string(),
                chunk_index: (i + 1).to_string(),
                origin: ChunkOrigin::Web,
            })
            .collect()
    }
}

impl Default for FallbackCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
