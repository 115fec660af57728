//! Grounded prompt assembly
//!
//! Turns an ordered set of retrieved chunks into a size-bounded,
//! citation-tagged context block and the paired instruction prompt. The
//! grounding rules (answer only from context, cite inline, admit
//! insufficiency) are a prompting contract: the generator is trusted but
//! not verified to comply.

use crate::types::{Query, RetrievedChunk};

pub const NO_CONTEXT_PLACEHOLDER: &str = "(no relevant context found)";

const SYSTEM_PROMPT: &str = "You are an academic assistant. Use ONLY the context provided to \
     answer the user's question. When you directly use facts from the provided context, add \
     citations in square brackets like [source:filename_chunkid]. If the context is insufficient \
     to answer fully, say you couldn't find enough information in the user's materials and \
     suggest next steps. Be concise when asked; otherwise provide detailed explanation with \
     examples when helpful.";

/// System directive plus fully rendered user prompt, ready for the
/// generation collaborator.
#[derive(Debug, Clone)]
pub struct GroundedPrompt {
    pub system: String,
    pub user: String,
    /// Size of the context block actually included, in characters.
    pub context_chars: usize,
}

pub struct ContextAssembler {
    context_char_limit: usize,
}

impl ContextAssembler {
    pub fn new(context_char_limit: usize) -> Self {
        Self { context_char_limit }
    }

    /// Build the context block and instruction prompt from chunks in
    /// retrieval-rank order. A chunk is included whole or not at all:
    /// accumulation stops before the first piece that would push the total
    /// over the character limit. If nothing fits, the context is the
    /// literal placeholder.
    pub fn assemble(&self, query: &Query, chunks: &[RetrievedChunk]) -> GroundedPrompt {
        let mut parts: Vec<String> = Vec::new();
        let mut total = 0usize;

        for chunk in chunks {
            if chunk.is_blank() {
                continue;
            }
            let piece = format!("[[{}]]\n{}\n\n", chunk.citation_label(), chunk.text);
            if total + piece.chars().count() > self.context_char_limit {
                break;
            }
            total += piece.chars().count();
            parts.push(piece);
        }

        let context = if parts.is_empty() {
            NO_CONTEXT_PLACEHOLDER.to_string()
        } else {
            parts.join("\n")
        };

        tracing::debug!(
            included = parts.len(),
            candidates = chunks.len(),
            context_chars = total,
            "assembled grounding context"
        );

        let user = format!(
            "Context:\n{context}\n\n\
             User query: {query}\n\n\
             Instructions:\n\
             - Answer the user's query based only on the context above.\n\
             - Include brief inline citations where facts come from the context using the format [source:filename_chunkid].\n\
             - Response style: {style}.\n\
             - If the context does not contain necessary information, say so and suggest whether to \
             (a) upload additional material, (b) broaden the search, or (c) consult external resources.",
            context = context,
            query = query.text,
            style = query.response_style.as_str(),
        );

        GroundedPrompt {
            system: SYSTEM_PROMPT.to_string(),
            user,
            context_chars: total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Query, ResponseStyle, RetrievedChunk};

    fn chunk(text: &str, source: &str, index: &str) -> RetrievedChunk {
        RetrievedChunk::local(text, source, index)
    }

    #[test]
    fn renders_citation_headers_in_rank_order() {
        let assembler = ContextAssembler::new(6000);
        let prompt = assembler.assemble(
            &Query::new("what is a heap"),
            &[
                chunk("A heap is a tree-shaped priority structure.", "notes.pdf", "0"),
                chunk("Heaps back priority queues.", "lecture2.pdf", "5"),
            ],
        );
        let first = prompt.user.find("[[notes.pdf_chunk0]]").unwrap();
        let second = prompt.user.find("[[lecture2.pdf_chunk5]]").unwrap();
        assert!(first < second);
    }

    #[test]
    fn context_never_exceeds_budget() {
        let assembler = ContextAssembler::new(200);
        let chunks: Vec<_> = (0..10)
            .map(|i| chunk(&"x".repeat(80), "notes.pdf", &i.to_string()))
            .collect();
        let prompt = assembler.assemble(&Query::new("query"), &chunks);
        assert!(prompt.context_chars <= 200);
        // Only whole chunks fit: two pieces of ~100 chars each.
        assert!(prompt.user.contains("[[notes.pdf_chunk0]]"));
        assert!(!prompt.user.contains("[[notes.pdf_chunk2]]"));
    }

    #[test]
    fn oversized_single_chunk_yields_placeholder_not_truncation() {
        let assembler = ContextAssembler::new(150);
        let big = "y".repeat(400);
        let prompt = assembler.assemble(&Query::new("query"), &[chunk(&big, "notes.pdf", "0")]);
        assert_eq!(prompt.context_chars, 0);
        assert!(prompt.user.contains(NO_CONTEXT_PLACEHOLDER));
        assert!(!prompt.user.contains("yyyy"));
    }

    #[test]
    fn empty_retrieval_yields_placeholder() {
        let assembler = ContextAssembler::new(6000);
        let prompt = assembler.assemble(&Query::new("query"), &[]);
        assert!(prompt.user.contains(NO_CONTEXT_PLACEHOLDER));
    }

    #[test]
    fn blank_chunks_are_skipped_but_later_ones_still_included() {
        let assembler = ContextAssembler::new(6000);
        let prompt = assembler.assemble(
            &Query::new("query"),
            &[
                chunk("   ", "empty.pdf", "0"),
                chunk("real content", "notes.pdf", "1"),
            ],
        );
        assert!(!prompt.user.contains("[[empty.pdf_chunk0]]"));
        assert!(prompt.user.contains("[[notes.pdf_chunk1]]"));
    }

    #[test]
    fn prompt_carries_query_and_style() {
        let assembler = ContextAssembler::new(6000);
        let query = Query::new("what is entropy").with_response_style(ResponseStyle::Detailed);
        let prompt = assembler.assemble(&query, &[chunk("Entropy measures disorder.", "notes.pdf", "0")]);
        assert!(prompt.user.contains("User query: what is entropy"));
        assert!(prompt.user.contains("Response style: detailed."));
        assert!(prompt.system.contains("[source:filename_chunkid]"));
    }
}
