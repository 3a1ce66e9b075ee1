//! Core data types that flow through the pipeline.
//!
//! Documents come in as [`RawDocument`]s, are segmented into [`Section`]s,
//! chunked into [`Chunk`]s, and each chunk is annotated with [`ChunkMetrics`]
//! and expanded into [`QaRecord`]s.

use std::fmt;

/// Where a document came from. Controls which segmentation variant is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// HTML fetched from a website; segmented by structural heading tags.
    Web,
    /// Text extracted from a PDF; segmented by heading-like line patterns.
    Pdf,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Web => "web",
            SourceKind::Pdf => "pdf",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() rather than write_str() so width flags align columns.
        f.pad(self.as_str())
    }
}

/// A scraped document before any processing.
///
/// `content` is raw HTML for web sources and extracted plain text for PDFs.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub source: String,
    pub kind: SourceKind,
    pub content: String,
}

/// A heading plus the body text that follows it, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub body: String,
}

/// A bounded-size span of section text. Insertion order equals document-scan
/// order, which the scorer relies on for previous-chunk overlap comparisons.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub source: String,
    pub kind: SourceKind,
    pub section: String,
    pub text: String,
}

/// Quality metrics for one chunk, as reported by the scoring oracle.
///
/// `overlap` is absent only for the first chunk of a run, which has no
/// previous chunk to compare against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkMetrics {
    pub coherence: i64,
    pub incomplete: bool,
    pub token_count: i64,
    pub overlap: Option<i64>,
    pub comment: String,
}

/// One generated question/answer pair, tied back to its source chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaRecord {
    pub chunk_index: usize,
    pub question: String,
    pub answer: String,
}
