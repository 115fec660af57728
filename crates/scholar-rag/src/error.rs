use thiserror::Error;

/// Pipeline-level failures. Ambiguity and a denied fallback are *not*
/// errors; they are designed terminal outcomes (`Clarify`, `Abort`) and
/// never surface here.
#[derive(Debug, Error)]
pub enum RagError {
    /// The similarity index call itself failed (as opposed to returning
    /// nothing, which routes through the fallback path).
    #[error("retrieval failed: {0}")]
    Retrieval(#[source] anyhow::Error),

    /// The authorized web-search fallback failed.
    #[error("web search failed: {0}")]
    WebSearch(#[source] anyhow::Error),

    /// The generation collaborator failed. The orchestrator captures this
    /// and degrades into a marked answer rather than propagating it, so
    /// callers normally never see this variant from `handle_query`.
    #[error("generation failed: {0}")]
    Generation(#[source] anyhow::Error),

    /// Writing the answer record failed. Always propagated: an answer
    /// that cannot be traced back to its sources breaks the audit
    /// invariant.
    #[error("failed to persist answer record: {0}")]
    Persistence(#[source] anyhow::Error),
}
