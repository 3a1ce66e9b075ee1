//! # QA Forge CLI (`qaf`)
//!
//! The `qaf` binary drives the QA dataset pipeline. It provides commands
//! for running the full pipeline, fetching sources, re-running
//! deduplication, and listing configured inputs.
//!
//! ## Usage
//!
//! ```bash
//! qaf --config ./config/qaf.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `qaf run` | Collect, chunk, score, generate QA pairs, and deduplicate |
//! | `qaf run --dry-run` | Collect and chunk only, printing what would be processed |
//! | `qaf collect` | Fetch the configured sources, chunk them, and write the chunks table |
//! | `qaf dedup` | Re-run deduplication over an existing QA CSV |
//! | `qaf sources` | List configured web and PDF sources |
//!
//! ## Examples
//!
//! ```bash
//! # Preview chunking without calling any API
//! qaf run --dry-run --config ./config/qaf.toml
//!
//! # Full pipeline, capped at the first 20 chunks
//! qaf run --limit 20 --config ./config/qaf.toml
//!
//! # Deduplicate a hand-edited QA file
//! qaf dedup --input edited_qa.csv --output edited_qa_dedup.csv
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use qa_forge::{config, pipeline, sources};

/// QA Forge CLI — turns scraped documents into QA training pairs with
/// per-chunk quality metrics.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/qaf.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "qaf",
    about = "QA Forge — turn scraped documents into QA training pairs with quality metrics",
    version,
    long_about = "QA Forge fetches web pages and PDFs, segments and chunks them, asks an LLM \
    oracle to score each chunk and write question/answer pairs for it, and removes exact and \
    near-duplicate questions. Every stage writes a CSV table."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/qaf.toml`. Sources, output paths, processing
    /// limits, and oracle endpoints are read from this file.
    #[arg(long, global = true, default_value = "./config/qaf.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline.
    ///
    /// Collects the configured sources, segments and chunks them, scores
    /// each chunk, generates QA pairs per chunk, and deduplicates the
    /// result. Writes the chunks, metrics, raw QA, and deduplicated QA
    /// tables named in the config.
    Run {
        /// Collect and chunk only — print what would be processed without
        /// calling any API or writing any table.
        #[arg(long)]
        dry_run: bool,

        /// Maximum number of chunks to send to the oracles.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Fetch the configured sources, chunk them, and write the chunks table.
    ///
    /// Useful for inspecting chunk boundaries before spending oracle calls.
    /// Never contacts the oracles.
    Collect,

    /// Re-run deduplication over an existing QA CSV.
    ///
    /// Reads the raw QA table (or `--input`), removes exact and fuzzy
    /// duplicate pairs, and writes the deduplicated table (or `--output`).
    Dedup {
        /// QA CSV to read. Defaults to the config's qa_pairs_csv.
        #[arg(long)]
        input: Option<PathBuf>,

        /// CSV to write. Defaults to the config's deduplicated_qa_csv.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List configured web and PDF sources.
    Sources,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Run { dry_run, limit } => pipeline::run_pipeline(&config, dry_run, limit).await,
        Commands::Collect => pipeline::run_collect(&config).await,
        Commands::Dedup { input, output } => pipeline::run_dedup(&config, input, output),
        Commands::Sources => {
            sources::list_sources(&config);
            Ok(())
        }
    }
}
