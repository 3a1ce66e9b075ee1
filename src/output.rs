//! CSV output tables and the QA-pair reader.
//!
//! Every table has an explicit schema constant. A [`TableWriter`] is opened
//! once per table for the duration of a run; it writes the header exactly
//! once at creation and flushes after every row, so an interrupted run never
//! leaves a partial row behind.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;

use crate::models::{Chunk, ChunkMetrics, QaRecord};

pub const CHUNKS_SCHEMA: [&str; 4] = ["Source", "Type", "Section", "Chunk Text"];
pub const METRICS_SCHEMA: [&str; 6] = [
    "Chunk Text",
    "Coherence",
    "Incomplete",
    "Token Count",
    "Overlap",
    "Comment",
];
pub const QA_SCHEMA: [&str; 3] = ["Chunk Index", "Question", "Answer"];

/// Chunk text prefix length stored in the metrics table.
pub const METRICS_TEXT_PREFIX: usize = 3000;

/// Append-style writer for one output table.
pub struct TableWriter {
    writer: csv::Writer<File>,
}

impl TableWriter {
    /// Creates (truncating) the file and writes the header row.
    pub fn create(path: &Path, schema: &[&str]) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(schema)?;
        writer.flush()?;
        Ok(Self { writer })
    }

    pub fn write_row<I, S>(&mut self, row: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        self.writer.write_record(row)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

pub fn chunk_row(chunk: &Chunk) -> [String; 4] {
    [
        chunk.source.clone(),
        chunk.kind.to_string(),
        chunk.section.clone(),
        chunk.text.clone(),
    ]
}

pub fn metrics_row(chunk_text: &str, metrics: &ChunkMetrics) -> [String; 6] {
    [
        truncate_chars(chunk_text, METRICS_TEXT_PREFIX),
        metrics.coherence.to_string(),
        metrics.incomplete.to_string(),
        metrics.token_count.to_string(),
        metrics
            .overlap
            .map(|o| o.to_string())
            .unwrap_or_default(),
        metrics.comment.clone(),
    ]
}

pub fn qa_row(record: &QaRecord) -> [String; 3] {
    [
        record.chunk_index.to_string(),
        record.question.clone(),
        record.answer.clone(),
    ]
}

/// Loads QA records from a CSV written with [`QA_SCHEMA`].
///
/// Short rows are tolerated: a missing question or answer becomes an empty
/// string and an unparseable chunk index becomes 0, so a hand-edited file
/// never aborts a dedup pass.
pub fn load_qa_pairs(path: &Path) -> Result<Vec<QaRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open QA file: {}", path.display()))?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        records.push(QaRecord {
            chunk_index: row.get(0).unwrap_or("").trim().parse().unwrap_or(0),
            question: row.get(1).unwrap_or("").to_string(),
            answer: row.get(2).unwrap_or("").to_string(),
        });
    }
    Ok(records)
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
