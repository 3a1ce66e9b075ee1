//! LLM-backed oracles: per-chunk quality scoring and Q&A generation.
//!
//! Both oracles speak the chat-completions protocol through [`ChatClient`]
//! and share one retry policy ([`retry::with_retries`]): transient failures
//! (rate limits, server errors, network faults, malformed responses) back off
//! exponentially with jitter; client errors and missing credentials fail
//! immediately. A chunk whose oracle call exhausts its retries is skipped by
//! the pipeline, never fatal to the run.

pub mod client;
pub mod generator;
pub mod retry;
pub mod scorer;

pub use client::ChatClient;
pub use retry::with_retries;

use thiserror::Error;

/// Oracle failure, split by whether retrying can help.
#[derive(Debug, Error)]
pub enum OracleError {
    /// Transient: rate limit, server error, network fault, malformed response.
    #[error("retryable oracle failure: {0}")]
    Retryable(String),
    /// Permanent: bad credentials or a non-retryable client error.
    #[error("fatal oracle failure: {0}")]
    Fatal(String),
}

/// Removes a markdown code fence wrapper from model output, if present.
pub(crate) fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fences_with_language_tag_are_stripped() {
        let content = "```json\n{\"coherence\": 4}\n```";
        assert_eq!(strip_code_fences(content), "{\"coherence\": 4}");
    }

    #[test]
    fn bare_fences_are_stripped() {
        assert_eq!(strip_code_fences("```\n[1, 2]\n```"), "[1, 2]");
    }

    #[test]
    fn unfenced_content_is_only_trimmed() {
        assert_eq!(strip_code_fences("  {\"a\": 1} \n"), "{\"a\": 1}");
    }
}
