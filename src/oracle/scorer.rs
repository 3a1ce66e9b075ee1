//! Chunk quality scoring via the LLM oracle.
//!
//! Each chunk is rated for coherence, sentence completeness, and approximate
//! token count; when a previous chunk exists (anywhere earlier in the run)
//! the model also rates semantic overlap with it.

use serde_json::Value;
use std::time::Duration;

use super::client::ChatClient;
use super::retry::with_retries;
use super::{strip_code_fences, OracleError};
use crate::models::ChunkMetrics;

const BASE_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Scores one chunk, retrying transient failures with backoff.
pub async fn score_chunk(
    client: &ChatClient,
    chunk: &str,
    previous_chunk: Option<&str>,
    retry_attempts: u32,
) -> Result<ChunkMetrics, OracleError> {
    let prompt = build_eval_prompt(chunk, previous_chunk);
    let expect_overlap = previous_chunk.is_some();

    with_retries(retry_attempts, BASE_RETRY_DELAY, || async {
        let content = client.complete(None, &prompt).await?;
        parse_metrics(&content, expect_overlap)
    })
    .await
}

pub fn build_eval_prompt(chunk: &str, previous_chunk: Option<&str>) -> String {
    let overlap_metric = if previous_chunk.is_some() {
        "\n4. **Semantic Overlap (1-5)** with the previous chunk: Compare and rate overlap."
    } else {
        ""
    };
    let overlap_field = if previous_chunk.is_some() {
        "\n  \"overlap\": int (1-5),"
    } else {
        ""
    };
    let previous_block = previous_chunk
        .map(|prev| format!("\nPrevious Chunk:\n\"\"\"{}\"\"\"\n", prev))
        .unwrap_or_default();

    format!(
        r#"Evaluate the following text chunk on the following metrics:
1. **Coherence (1-5)**: Does the text flow well and make sense on its own?
2. **Incomplete Sentences (Yes/No)**: Does it look like the chunk ends or begins mid-sentence?
3. **Token Count**: How many tokens approximately?{overlap_metric}

Chunk:
"""{chunk}"""
{previous_block}
Return only the result as raw JSON. Do not add any extra explanation or formatting:
{{
  "coherence": int (1-5),
  "incomplete": "Yes" or "No",
  "token_count": int,{overlap_field}
  "comment": brief explanation
}}"#
    )
}

/// Parses the model's metrics JSON. Any shape problem is retryable — the
/// model is asked again rather than the chunk being mis-scored.
pub fn parse_metrics(content: &str, expect_overlap: bool) -> Result<ChunkMetrics, OracleError> {
    let json: Value = serde_json::from_str(strip_code_fences(content))
        .map_err(|e| OracleError::Retryable(format!("metrics JSON did not parse: {}", e)))?;

    let coherence = json
        .get("coherence")
        .and_then(Value::as_i64)
        .ok_or_else(|| malformed("coherence"))?;
    let incomplete = parse_yes_no(json.get("incomplete"))?;
    let token_count = json
        .get("token_count")
        .and_then(Value::as_i64)
        .ok_or_else(|| malformed("token_count"))?;
    let overlap = if expect_overlap {
        json.get("overlap").and_then(Value::as_i64)
    } else {
        None
    };
    let comment = json
        .get("comment")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    Ok(ChunkMetrics {
        coherence,
        incomplete,
        token_count,
        overlap,
        comment,
    })
}

fn parse_yes_no(value: Option<&Value>) -> Result<bool, OracleError> {
    match value {
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::String(s)) => match s.to_lowercase().as_str() {
            "yes" => Ok(true),
            "no" => Ok(false),
            _ => Err(malformed("incomplete")),
        },
        _ => Err(malformed("incomplete")),
    }
}

fn malformed(field: &str) -> OracleError {
    OracleError::Retryable(format!("metrics JSON missing or invalid field: {}", field))
}
