//! Adaptive retrieval orchestration: decide *how* to retrieve before
//! generating, assemble a bounded citation-tagged context, fall back to
//! authorized web search when local material is insufficient, and persist
//! every answer for audit.
//!
//! Vector stores, embedders, language models, and web search are external
//! collaborators behind the traits in [`collaborators`]; the crate itself
//! holds only the decision pipeline.

pub mod analysis;
pub mod assembly;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod fallback;
pub mod persist;
pub mod pipeline;
pub mod strategy;
pub mod types;

// Re-export primary types for convenience
pub use analysis::{ComplexityLevel, Modality, QueryAnalyzer};
pub use assembly::{ContextAssembler, GroundedPrompt, NO_CONTEXT_PLACEHOLDER};
pub use collaborators::{ChatModel, SimilarityIndex, WebSearch};
pub use config::RagConfig;
pub use error::RagError;
pub use fallback::FallbackCoordinator;
pub use persist::AnswerPersister;
pub use pipeline::{AgenticRag, PendingFallback, PipelineOutcome};
pub use strategy::{RetrievalStrategy, StrategySelector};
pub use types::{ChunkOrigin, Query, ResponseStyle, RetrievedChunk};
