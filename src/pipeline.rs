//! End-to-end pipeline orchestration.
//!
//! A run is strictly linear: collect documents, segment and chunk them,
//! score each chunk, generate QA pairs per chunk, then deduplicate. Each
//! stage writes its table before the next stage starts, so a run killed
//! partway still leaves usable upstream artifacts.

use anyhow::{Context, Result};
use std::time::Duration;

use crate::chunk::{self, ChunkStrategy};
use crate::collect::collect_documents;
use crate::config::Config;
use crate::dedup::deduplicate;
use crate::models::{Chunk, QaRecord};
use crate::oracle::{generator, scorer, ChatClient};
use crate::output::{
    self, TableWriter, CHUNKS_SCHEMA, METRICS_SCHEMA, QA_SCHEMA,
};

/// Runs the full pipeline described by `config`.
///
/// `dry_run` stops after chunking and prints what would be processed.
/// `limit` caps the number of chunks sent to the oracles.
pub async fn run_pipeline(config: &Config, dry_run: bool, limit: Option<usize>) -> Result<()> {
    println!("Collecting documents...");
    let documents = collect_documents(config).await?;
    println!("Collected {} document(s)", documents.len());

    // Strategy name was validated at config load.
    let strategy = ChunkStrategy::from_name(&config.processing.chunk_strategy)
        .context("Unknown chunk strategy")?;

    let mut chunks: Vec<Chunk> = Vec::new();
    for doc in &documents {
        chunks.extend(chunk::segment_and_chunk(
            doc,
            config.processing.max_words_per_chunk,
            strategy,
        ));
    }
    if let Some(limit) = limit {
        chunks.truncate(limit);
    }
    println!("Produced {} chunk(s)", chunks.len());

    if dry_run {
        for (i, chunk) in chunks.iter().enumerate() {
            println!(
                "  [{}] {} | {} | {} | {} words",
                i,
                chunk.source,
                chunk.kind,
                chunk.section,
                chunk.text.split_whitespace().count()
            );
        }
        println!("Dry run: skipping scoring and QA generation");
        return Ok(());
    }

    let mut chunks_table = TableWriter::create(&config.output.chunks_csv, &CHUNKS_SCHEMA)?;
    for chunk in &chunks {
        chunks_table.write_row(output::chunk_row(chunk))?;
    }
    chunks_table.finish()?;
    println!("Wrote chunks to {}", config.output.chunks_csv.display());

    score_chunks(config, &chunks).await?;

    let records = generate_qa(config, &chunks).await?;

    let kept = deduplicate(&records, config.processing.fuzzy_match_threshold);
    let mut dedup_table =
        TableWriter::create(&config.output.deduplicated_qa_csv, &QA_SCHEMA)?;
    for record in &kept {
        dedup_table.write_row(output::qa_row(record))?;
    }
    dedup_table.finish()?;
    println!(
        "Deduplicated {} pair(s) down to {} ({})",
        records.len(),
        kept.len(),
        config.output.deduplicated_qa_csv.display()
    );

    println!("ok");
    Ok(())
}

/// Scores each chunk against the run-global previous chunk. A chunk whose
/// scoring fails after retries is skipped, not aborted on; an unusable
/// scorer (missing API key) skips the whole stage so QA generation still
/// runs.
async fn score_chunks(config: &Config, chunks: &[Chunk]) -> Result<()> {
    let client = match ChatClient::new(&config.scorer) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Skipping chunk scoring: {}", e);
            return Ok(());
        }
    };
    let mut metrics_table =
        TableWriter::create(&config.output.chunk_metrics_csv, &METRICS_SCHEMA)?;
    let delay = Duration::from_millis(config.processing.scorer_delay_ms);

    let mut scored = 0usize;
    for (i, chunk) in chunks.iter().enumerate() {
        println!("Scoring chunk {}/{}...", i + 1, chunks.len());
        let previous = if i > 0 {
            Some(chunks[i - 1].text.as_str())
        } else {
            None
        };

        match scorer::score_chunk(&client, &chunk.text, previous, config.processing.retry_attempts)
            .await
        {
            Ok(metrics) => {
                metrics_table.write_row(output::metrics_row(&chunk.text, &metrics))?;
                scored += 1;
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                eprintln!("Skipping metrics for chunk {}: {}", i, e);
            }
        }
    }
    metrics_table.finish()?;
    println!(
        "Scored {}/{} chunk(s) ({})",
        scored,
        chunks.len(),
        config.output.chunk_metrics_csv.display()
    );
    Ok(())
}

/// Generates QA pairs per chunk, writing raw pairs as they arrive and
/// returning the full set for deduplication. An unusable generator skips
/// the stage and contributes no pairs.
async fn generate_qa(config: &Config, chunks: &[Chunk]) -> Result<Vec<QaRecord>> {
    let client = match ChatClient::new(&config.generator) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Skipping QA generation: {}", e);
            return Ok(Vec::new());
        }
    };
    let mut qa_table = TableWriter::create(&config.output.qa_pairs_csv, &QA_SCHEMA)?;
    let delay = Duration::from_millis(config.processing.generator_delay_ms);

    let mut records = Vec::new();
    for (i, chunk) in chunks.iter().enumerate() {
        println!("Generating QA pairs for chunk {}/{}...", i + 1, chunks.len());
        match generator::generate_questions(
            &client,
            &chunk.text,
            config.processing.num_questions_per_chunk,
            config.processing.retry_attempts,
        )
        .await
        {
            Ok(pairs) => {
                for (question, answer) in pairs {
                    let record = QaRecord {
                        chunk_index: i,
                        question,
                        answer,
                    };
                    qa_table.write_row(output::qa_row(&record))?;
                    records.push(record);
                }
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                eprintln!("Skipping QA pairs for chunk {}: {}", i, e);
            }
        }
    }
    qa_table.finish()?;
    println!(
        "Generated {} raw pair(s) ({})",
        records.len(),
        config.output.qa_pairs_csv.display()
    );
    Ok(records)
}

/// Fetches the configured sources, chunks them, and writes the chunks table.
/// Never touches the oracles.
pub async fn run_collect(config: &Config) -> Result<()> {
    let documents = collect_documents(config).await?;
    for doc in &documents {
        println!(
            "{:4} {} ({} chars)",
            doc.kind,
            doc.source,
            doc.content.chars().count()
        );
    }
    println!("Collected {} document(s)", documents.len());

    let strategy = ChunkStrategy::from_name(&config.processing.chunk_strategy)
        .context("Unknown chunk strategy")?;
    let mut chunks_table = TableWriter::create(&config.output.chunks_csv, &CHUNKS_SCHEMA)?;
    let mut total = 0usize;
    for doc in &documents {
        for chunk in chunk::segment_and_chunk(doc, config.processing.max_words_per_chunk, strategy)
        {
            chunks_table.write_row(output::chunk_row(&chunk))?;
            total += 1;
        }
    }
    chunks_table.finish()?;
    println!(
        "Wrote {} chunk(s) to {}",
        total,
        config.output.chunks_csv.display()
    );
    Ok(())
}

/// Re-runs deduplication over an existing QA CSV.
pub fn run_dedup(
    config: &Config,
    input: Option<std::path::PathBuf>,
    output_path: Option<std::path::PathBuf>,
) -> Result<()> {
    let input = input.unwrap_or_else(|| config.output.qa_pairs_csv.clone());
    let output_path = output_path.unwrap_or_else(|| config.output.deduplicated_qa_csv.clone());

    let records = output::load_qa_pairs(&input)?;
    let kept = deduplicate(&records, config.processing.fuzzy_match_threshold);

    let mut table = TableWriter::create(&output_path, &QA_SCHEMA)?;
    for record in &kept {
        table.write_row(output::qa_row(record))?;
    }
    table.finish()?;

    println!(
        "Deduplicated {} pair(s) down to {} ({})",
        records.len(),
        kept.len(),
        output_path.display()
    );
    Ok(())
}
