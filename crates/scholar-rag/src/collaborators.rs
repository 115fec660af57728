//! Collaborator contracts
//!
//! The orchestrator only ever talks to its infrastructure through these
//! traits: a similarity index over the user's material, a chat-shaped
//! generation service, and a web search used solely under explicit
//! authorization. Handles are constructed by the caller and injected, so
//! tests substitute them freely and nothing in this crate owns a global
//! client.

use async_trait::async_trait;

use crate::types::RetrievedChunk;

/// Similarity search over the user's indexed material. Implementations use
/// the same embedding model for indexing and querying; that consistency is
/// their concern, not the orchestrator's.
#[async_trait]
pub trait SimilarityIndex: Send + Sync {
    /// Return up to `top_k` chunks ordered by similarity rank. Source
    /// filtering happens client-side in the orchestrator, after this call.
    async fn query(&self, text: &str, top_k: usize) -> anyhow::Result<Vec<RetrievedChunk>>;
}

/// Chat-shaped generation service.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn chat(&self, system_prompt: &str, user_prompt: &str) -> anyhow::Result<String>;
}

/// External web search, consulted only after the user authorizes leaving
/// their own material.
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Return up to `max_results` text snippets in relevance order.
    async fn search(&self, query: &str, max_results: usize) -> anyhow::Result<Vec<String>>;
}
