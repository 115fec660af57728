//! Query orchestration
//!
//! The single entry point `handle_query` sequences analysis, strategy
//! selection, retrieval, fallback, assembly, generation, and persistence,
//! and always lands in a terminal outcome. Insufficient retrieval does not
//! block on the user: it returns `AwaitingAuthorization` carrying resume
//! state, and a follow-up `resume_with_authorization` call supplies the
//! decision.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::analysis::QueryAnalyzer;
use crate::assembly::ContextAssembler;
use crate::collaborators::{ChatModel, SimilarityIndex, WebSearch};
use crate::config::RagConfig;
use crate::error::RagError;
use crate::fallback::FallbackCoordinator;
use crate::persist::AnswerPersister;
use crate::strategy::{RetrievalStrategy, StrategySelector};
use crate::types::{Query, RetrievedChunk};

const CLARIFY_PROMPT: &str = "Your question looks ambiguous. Could you briefly say what exactly you want? Examples:\n\
     - 'Define dynamic programming with a short example.'\n\
     - 'Summarize chapter 2 of my uploaded PDF.'\n\
     - 'Give step-by-step solution for the sample question 3 in exam.pdf'\n";

const ABORT_MESSAGE: &str =
    "Web fallback was declined. The uploaded material does not contain enough \
     content to answer this query.";

/// Resume state handed back with `AwaitingAuthorization` and passed to
/// `resume_with_authorization`. Serializable so a boundary layer can park
/// it across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingFallback {
    pub query: Query,
    pub strategy: RetrievalStrategy,
}

/// Terminal (or resumable) result of processing one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PipelineOutcome {
    Answer {
        answer: String,
        /// Citation labels of every chunk that informed the answer, in
        /// retrieval order. Mirrors the persisted record.
        sources: Vec<String>,
        saved_to: PathBuf,
        /// Set when the generation collaborator failed; the answer text
        /// then carries a visible error marker instead of real content.
        generation_error: Option<String>,
    },
    Clarify {
        prompt: String,
    },
    AwaitingAuthorization {
        pending: PendingFallback,
    },
    Abort {
        message: String,
    },
}

/// Adaptive retrieval orchestrator. Owns no cross-query state; collaborator
/// handles are injected and shared read-only, so independent instances can
/// serve queries concurrently against the same index and answers directory.
pub struct AgenticRag {
    config: RagConfig,
    analyzer: QueryAnalyzer,
    selector: StrategySelector,
    assembler: ContextAssembler,
    fallback: FallbackCoordinator,
    persister: AnswerPersister,
    index: Arc<dyn SimilarityIndex>,
    chat: Arc<dyn ChatModel>,
    web: Arc<dyn WebSearch>,
}

impl AgenticRag {
    pub fn new(
        config: RagConfig,
        index: Arc<dyn SimilarityIndex>,
        chat: Arc<dyn ChatModel>,
        web: Arc<dyn WebSearch>,
    ) -> Self {
        let selector = StrategySelector::new(config.default_top_k);
        let assembler = ContextAssembler::new(config.context_char_limit);
        let persister = AnswerPersister::new(config.answers_dir.clone());
        Self {
            config,
            analyzer: QueryAnalyzer::new(),
            selector,
            assembler,
            fallback: FallbackCoordinator::new(),
            persister,
            index,
            chat,
            web,
        }
    }

    /// Process one query end to end. Terminal outcomes are `Answer`,
    /// `Clarify`, and `Abort`; `AwaitingAuthorization` expects a follow-up
    /// call to `resume_with_authorization`.
    pub async fn handle_query(&self, query: Query) -> Result<PipelineOutcome, RagError> {
        let modality = self
            .analyzer
            .detect_modality(&query.text, query.has_uploaded_file);
        tracing::debug!(?modality, "detected query modality");

        // Ambiguity short-circuits before any retrieval happens.
        if self.analyzer.is_ambiguous(&query.text) {
            tracing::info!("query ambiguous, requesting clarification");
            return Ok(PipelineOutcome::Clarify {
                prompt: CLARIFY_PROMPT.to_string(),
            });
        }

        let complexity = self.analyzer.classify_complexity(&query.text);
        let strategy = self.selector.select(&query.text, complexity);
        tracing::debug!(?complexity, top_k = strategy.top_k, "analyzed query");

        let retrieved = self
            .index
            .query(&query.text, strategy.top_k)
            .await
            .map_err(RagError::Retrieval)?;
        let filtered = strategy.filter_chunks(retrieved);
        let usable = self.fallback.usable_chunks(filtered);

        if usable.is_empty() {
            tracing::info!("local retrieval insufficient, awaiting fallback authorization");
            return Ok(PipelineOutcome::AwaitingAuthorization {
                pending: PendingFallback { query, strategy },
            });
        }

        self.answer_with_chunks(&query, usable).await
    }

    /// Second phase of the fallback protocol: the caller relays the user's
    /// decision on broadening the search beyond their own material.
    pub async fn resume_with_authorization(
        &self,
        pending: PendingFallback,
        approved: bool,
    ) -> Result<PipelineOutcome, RagError> {
        if !approved {
            tracing::info!("web fallback declined, aborting");
            return Ok(PipelineOutcome::Abort {
                message: ABORT_MESSAGE.to_string(),
            });
        }

        let max_results = pending.strategy.top_k.min(self.config.max_web_results);
        let snippets = self
            .web
            .search(&pending.query.text, max_results)
            .await
            .map_err(RagError::WebSearch)?;
        let chunks = self.fallback.wrap_web_snippets(snippets);
        tracing::info!(count = chunks.len(), "substituted web chunks for local retrieval");

        // Web results re-enter the pipeline exactly as local chunks would.
        // If the web also came back empty, generation still runs against
        // the placeholder context and says so.
        self.answer_with_chunks(&pending.query, chunks).await
    }

    async fn answer_with_chunks(
        &self,
        query: &Query,
        chunks: Vec<RetrievedChunk>,
    ) -> Result<PipelineOutcome, RagError> {
        let prompt = self.assembler.assemble(query, &chunks);

        // A generation failure must not abort the pipeline: capture it,
        // mark the answer, and still persist for the audit trail.
        let (answer, generation_error) = match self.chat.chat(&prompt.system, &prompt.user).await {
            Ok(text) => (text, None),
            Err(e) => {
                tracing::warn!(error = %e, "generation failed, returning marked answer");
                (format!("[generation error: {e}]"), Some(e.to_string()))
            }
        };

        let saved_to = self
            .persister
            .persist(query, &answer, &chunks)
            .map_err(RagError::Persistence)?;

        let sources = chunks.iter().map(|c| c.citation_label()).collect();
        Ok(PipelineOutcome::Answer {
            answer,
            sources,
            saved_to,
            generation_error,
        })
    }
}
