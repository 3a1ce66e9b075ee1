//! # QA Forge
//!
//! A pipeline that turns scraped documents into question/answer training
//! pairs with per-chunk quality metrics.
//!
//! QA Forge fetches web pages and PDFs, segments them into sections,
//! chunks the sections into bounded spans of whole sentences, asks an
//! LLM oracle to score each chunk and to write QA pairs for it, and
//! finally removes exact and near-duplicate questions. Every stage writes
//! its results to a CSV table as it goes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌─────────────┐
//! │   Collect   │──▶│ Segment +    │──▶│   Oracles   │
//! │  Web / PDF  │   │ Chunk        │   │ Score + QA  │
//! └─────────────┘   └──────────────┘   └──────┬──────┘
//!                                             │
//!                          ┌──────────────────┤
//!                          ▼                  ▼
//!                    ┌──────────┐       ┌──────────┐
//!                    │ Metrics  │       │  Dedup   │
//!                    │   CSV    │       │ QA CSVs  │
//!                    └──────────┘       └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! qaf run --dry-run             # collect + chunk, print what would run
//! qaf run                       # full pipeline
//! qaf collect                   # fetch + chunk, no oracle calls
//! qaf dedup                     # re-run dedup over an existing QA CSV
//! qaf sources                   # list configured inputs
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`collect`] | Web and PDF document fetching |
//! | [`normalize`] | Noise-stripping text cleanup |
//! | [`segment`] | Heading-based section segmentation |
//! | [`chunk`] | Sentence and window chunking |
//! | [`oracle`] | LLM scoring and QA generation |
//! | [`similarity`] | Token-set fuzzy matching |
//! | [`dedup`] | Exact and fuzzy QA deduplication |
//! | [`output`] | CSV tables |
//! | [`pipeline`] | End-to-end orchestration |

pub mod chunk;
pub mod collect;
pub mod config;
pub mod dedup;
pub mod models;
pub mod normalize;
pub mod oracle;
pub mod output;
pub mod pipeline;
pub mod segment;
pub mod similarity;
pub mod sources;
