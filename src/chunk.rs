//! Bounded-size text chunking.
//!
//! The default strategy accumulates whole sentences until a word budget is
//! reached; a sentence is never split, so one oversized sentence can push a
//! single chunk past the budget. The alternative strategy slides fixed-size
//! word windows with 50% overlap and ignores sentence boundaries entirely.

use unicode_segmentation::UnicodeSegmentation;

use crate::models::{Chunk, RawDocument};
use crate::segment;

/// How section bodies are cut into chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkStrategy {
    /// Accumulate sentences up to the word budget (default).
    Sentences,
    /// Overlapping fixed-size word windows with stride `max_words / 2`.
    Windows,
}

impl ChunkStrategy {
    /// Resolves a config string to a strategy. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sentences" => Some(ChunkStrategy::Sentences),
            "windows" => Some(ChunkStrategy::Windows),
            _ => None,
        }
    }
}

/// Segments a document and chunks every section body, preserving scan order.
pub fn segment_and_chunk(doc: &RawDocument, max_words: usize, strategy: ChunkStrategy) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    for section in segment::segment_document(doc) {
        let texts = match strategy {
            ChunkStrategy::Sentences => chunk_section(&section.body, max_words),
            ChunkStrategy::Windows => chunk_windowed(&section.body, max_words),
        };
        for text in texts {
            chunks.push(Chunk {
                source: doc.source.clone(),
                kind: doc.kind,
                section: section.heading.clone(),
                text,
            });
        }
    }
    chunks
}

/// Splits a section body into chunks on sentence boundaries.
///
/// Sentences are appended to a running buffer; once the cumulative word count
/// reaches `max_words` the buffer is emitted and reset. A non-empty tail is
/// always emitted, even under the budget. Empty bodies produce no chunks.
pub fn chunk_section(body: &str, max_words: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();
    let mut word_count = 0usize;

    for sentence in body.unicode_sentences() {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        buffer.push(sentence);
        word_count += sentence.split_whitespace().count();
        if word_count >= max_words {
            chunks.push(buffer.join(" "));
            buffer.clear();
            word_count = 0;
        }
    }

    if !buffer.is_empty() {
        chunks.push(buffer.join(" "));
    }

    chunks
}

/// Fixed-window fallback: bodies at or under the budget come back as one
/// chunk; longer bodies are cut into overlapping `max_words`-word windows
/// advanced by `max(max_words / 2, 1)` words.
pub fn chunk_windowed(body: &str, max_words: usize) -> Vec<String> {
    let words: Vec<&str> = body.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }
    if words.len() <= max_words {
        return vec![words.join(" ")];
    }

    let stride = (max_words / 2).max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < words.len() {
        let end = (start + max_words).min(words.len());
        chunks.push(words[start..end].join(" "));
        start += stride;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceKind;

    #[test]
    fn short_body_yields_single_chunk() {
        let chunks = chunk_section("Level 2 chargers use 240 volts.", 500);
        assert_eq!(chunks, vec!["Level 2 chargers use 240 volts.".to_string()]);
    }

    #[test]
    fn three_one_word_sentences_with_budget_two() {
        let chunks = chunk_section("A. B. C.", 2);
        assert_eq!(chunks, vec!["A. B.".to_string(), "C.".to_string()]);
    }

    #[test]
    fn empty_body_yields_no_chunks() {
        assert!(chunk_section("", 100).is_empty());
        assert!(chunk_section("   ", 100).is_empty());
    }

    #[test]
    fn oversized_sentence_is_emitted_whole() {
        let chunks = chunk_section("one two three four five six.", 3);
        assert_eq!(chunks, vec!["one two three four five six.".to_string()]);
    }

    #[test]
    fn sentence_sequence_is_lossless_and_order_preserving() {
        let body = "First point here. Second point follows. Third one too. Fourth closes it.";
        let chunks = chunk_section(body, 5);
        assert!(chunks.len() > 1);
        // Every chunk except the tail carries at least the budget.
        for chunk in &chunks[..chunks.len() - 1] {
            assert!(chunk.split_whitespace().count() >= 5);
        }
        // Rejoining the chunks reproduces the original sentence sequence.
        assert_eq!(chunks.join(" "), body);
        assert!(chunks.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn windowed_small_body_is_one_chunk() {
        let chunks = chunk_windowed("alpha beta gamma", 10);
        assert_eq!(chunks, vec!["alpha beta gamma".to_string()]);
    }

    #[test]
    fn windowed_long_body_overlaps_with_half_stride() {
        let body = "w1 w2 w3 w4 w5 w6 w7 w8 w9 w10";
        let chunks = chunk_windowed(body, 4);
        assert_eq!(
            chunks,
            vec![
                "w1 w2 w3 w4".to_string(),
                "w3 w4 w5 w6".to_string(),
                "w5 w6 w7 w8".to_string(),
                "w7 w8 w9 w10".to_string(),
                "w9 w10".to_string(),
            ]
        );
    }

    #[test]
    fn windowed_empty_body_yields_no_chunks() {
        assert!(chunk_windowed("  ", 4).is_empty());
    }

    #[test]
    fn segment_and_chunk_tags_chunks_with_section_headings() {
        let doc = RawDocument {
            source: "https://example.com/evs".to_string(),
            kind: SourceKind::Web,
            content: "<h1>Basics</h1><p>A. B. C.</p><h2>Costs</h2><p>Pricing varies.</p>"
                .to_string(),
        };
        let chunks = segment_and_chunk(&doc, 2, ChunkStrategy::Sentences);
        let tagged: Vec<(&str, &str)> = chunks
            .iter()
            .map(|c| (c.section.as_str(), c.text.as_str()))
            .collect();
        assert_eq!(
            tagged,
            vec![("Basics", "A. B."), ("Basics", "C."), ("Costs", "Pricing varies.")]
        );
        assert!(chunks.iter().all(|c| c.kind == SourceKind::Web));
    }

    #[test]
    fn strategy_names_resolve() {
        assert_eq!(ChunkStrategy::from_name("sentences"), Some(ChunkStrategy::Sentences));
        assert_eq!(ChunkStrategy::from_name("windows"), Some(ChunkStrategy::Windows));
        assert_eq!(ChunkStrategy::from_name("semantic"), None);
    }
}
