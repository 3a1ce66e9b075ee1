use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::chunk::ChunkStrategy;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub processing: ProcessingConfig,
    pub scorer: OracleConfig,
    pub generator: OracleConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SourcesConfig {
    #[serde(default)]
    pub web: Vec<String>,
    #[serde(default)]
    pub pdfs: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    pub chunks_csv: PathBuf,
    pub chunk_metrics_csv: PathBuf,
    pub qa_pairs_csv: PathBuf,
    pub deduplicated_qa_csv: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProcessingConfig {
    #[serde(default = "default_max_words")]
    pub max_words_per_chunk: usize,
    #[serde(default = "default_num_questions")]
    pub num_questions_per_chunk: usize,
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_match_threshold: u32,
    #[serde(default = "default_chunk_strategy")]
    pub chunk_strategy: String,
    #[serde(default = "default_scorer_delay_ms")]
    pub scorer_delay_ms: u64,
    #[serde(default = "default_generator_delay_ms")]
    pub generator_delay_ms: u64,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_words_per_chunk: default_max_words(),
            num_questions_per_chunk: default_num_questions(),
            retry_attempts: default_retry_attempts(),
            fuzzy_match_threshold: default_fuzzy_threshold(),
            chunk_strategy: default_chunk_strategy(),
            scorer_delay_ms: default_scorer_delay_ms(),
            generator_delay_ms: default_generator_delay_ms(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

fn default_max_words() -> usize {
    500
}
fn default_num_questions() -> usize {
    3
}
fn default_retry_attempts() -> u32 {
    3
}
fn default_fuzzy_threshold() -> u32 {
    90
}
fn default_chunk_strategy() -> String {
    "sentences".to_string()
}
fn default_scorer_delay_ms() -> u64 {
    2000
}
fn default_generator_delay_ms() -> u64 {
    3000
}
fn default_fetch_timeout_secs() -> u64 {
    10
}

/// Endpoint settings for one LLM oracle. The API key is read from the
/// environment variable named in `api_key_env`, never from the file itself.
#[derive(Debug, Deserialize, Clone)]
pub struct OracleConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key_env: String,
    #[serde(default = "default_oracle_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub temperature: f32,
}

fn default_oracle_timeout_secs() -> u64 {
    30
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.processing.max_words_per_chunk == 0 {
        anyhow::bail!("processing.max_words_per_chunk must be > 0");
    }

    if config.processing.num_questions_per_chunk == 0 {
        anyhow::bail!("processing.num_questions_per_chunk must be >= 1");
    }

    if config.processing.retry_attempts == 0 {
        anyhow::bail!("processing.retry_attempts must be >= 1");
    }

    if config.processing.fuzzy_match_threshold > 100 {
        anyhow::bail!("processing.fuzzy_match_threshold must be in [0, 100]");
    }

    if ChunkStrategy::from_name(&config.processing.chunk_strategy).is_none() {
        anyhow::bail!(
            "Unknown chunk strategy: '{}'. Must be sentences or windows.",
            config.processing.chunk_strategy
        );
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    const MINIMAL: &str = r#"
[output]
chunks_csv = "chunks.csv"
chunk_metrics_csv = "chunk_metrics.csv"
qa_pairs_csv = "chunk_qa.csv"
deduplicated_qa_csv = "chunk_qa_deduplicated.csv"

[scorer]
endpoint = "https://openrouter.ai/api/v1/chat/completions"
model = "deepseek/deepseek-r1"
api_key_env = "OPENROUTER_API_KEY"

[generator]
endpoint = "https://api.groq.com/openai/v1/chat/completions"
model = "gemma2-9b-it"
api_key_env = "GROQ_API_KEY"
temperature = 0.7
"#;

    #[test]
    fn minimal_config_gets_processing_defaults() {
        let file = write_config(MINIMAL);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.processing.max_words_per_chunk, 500);
        assert_eq!(config.processing.num_questions_per_chunk, 3);
        assert_eq!(config.processing.retry_attempts, 3);
        assert_eq!(config.processing.fuzzy_match_threshold, 90);
        assert_eq!(config.processing.chunk_strategy, "sentences");
        assert!(config.sources.web.is_empty());
        assert_eq!(config.scorer.timeout_secs, 30);
        assert_eq!(config.generator.temperature, 0.7);
    }

    #[test]
    fn zero_max_words_is_rejected() {
        let body = format!("{}\n[processing]\nmax_words_per_chunk = 0\n", MINIMAL);
        let file = write_config(&body);
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("max_words_per_chunk"));
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let body = format!("{}\n[processing]\nfuzzy_match_threshold = 120\n", MINIMAL);
        let file = write_config(&body);
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn unknown_chunk_strategy_is_rejected() {
        let body = format!("{}\n[processing]\nchunk_strategy = \"semantic\"\n", MINIMAL);
        let file = write_config(&body);
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("chunk strategy"));
    }
}
