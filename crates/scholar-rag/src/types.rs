use serde::{Deserialize, Serialize};

/// How verbose the generated answer should be. Threaded through to the
/// grounding prompt; the pipeline itself does not branch on it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStyle {
    #[default]
    Concise,
    Detailed,
}

impl ResponseStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Concise => "concise",
            Self::Detailed => "detailed",
        }
    }
}

/// A single user question, immutable once received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
    /// Whether the user attached a file alongside the question. Upload
    /// handling itself happens upstream; this only drives modality.
    pub has_uploaded_file: bool,
    pub response_style: ResponseStyle,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            has_uploaded_file: false,
            response_style: ResponseStyle::Concise,
        }
    }

    pub fn with_uploaded_file(mut self, has_file: bool) -> Self {
        self.has_uploaded_file = has_file;
        self
    }

    pub fn with_response_style(mut self, style: ResponseStyle) -> Self {
        self.response_style = style;
        self
    }
}

/// Where a retrieved chunk came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChunkOrigin {
    /// The user's own indexed material.
    Local,
    /// Authorized web-search fallback.
    Web,
}

/// One retrieved passage with the stable identifiers citation rendering
/// depends on. Collections of chunks are always in retrieval-rank order,
/// and that order survives filtering and fallback substitution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedChunk {
    pub text: String,
    pub source_id: String,
    pub chunk_index: String,
    pub origin: ChunkOrigin,
}

impl RetrievedChunk {
    pub fn local(text: impl Into<String>, source_id: impl Into<String>, chunk_index: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_id: source_id.into(),
            chunk_index: chunk_index.into(),
            origin: ChunkOrigin::Local,
        }
    }

    /// Citation label of the form `source_chunkN`, used both for the
    /// context header and the persisted source list.
    pub fn citation_label(&self) -> String {
        format!("{}_chunk{}", self.source_id, self.chunk_index)
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn citation_label_joins_source_and_index() {
        let chunk = RetrievedChunk::local("some text", "syllabus.pdf", "4");
        assert_eq!(chunk.citation_label(), "syllabus.pdf_chunk4");
    }

    #[test]
    fn blank_detection_trims_whitespace() {
        assert!(RetrievedChunk::local("  \n\t ", "a.pdf", "0").is_blank());
        assert!(!RetrievedChunk::local("x", "a.pdf", "0").is_blank());
    }
}
