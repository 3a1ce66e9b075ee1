//! Question/answer pair generation via the LLM oracle.

use serde_json::Value;
use std::time::Duration;

use super::client::ChatClient;
use super::retry::with_retries;
use super::{strip_code_fences, OracleError};

const BASE_RETRY_DELAY: Duration = Duration::from_secs(1);

const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that generates Q&A pairs from technical content.";

/// Generates question/answer pairs for one chunk, retrying transient
/// failures. Returns an empty list when the model's output is malformed
/// beyond repair — the chunk simply contributes no pairs.
pub async fn generate_questions(
    client: &ChatClient,
    chunk: &str,
    num_questions: usize,
    retry_attempts: u32,
) -> Result<Vec<(String, String)>, OracleError> {
    let prompt = build_qa_prompt(chunk, num_questions);

    with_retries(retry_attempts, BASE_RETRY_DELAY, || async {
        let content = client.complete(Some(SYSTEM_PROMPT), &prompt).await?;
        Ok(parse_qa_pairs(&content))
    })
    .await
}

pub fn build_qa_prompt(chunk: &str, num_questions: usize) -> String {
    format!(
        r#"Generate {num_questions} question-and-answer pairs from the following text.
Each pair should be a dictionary with "question" and "answer" keys.
Return the full output as a JSON array like this:

[
  {{"question": "What is ...?", "answer": "The ..."}},
  ...
]

Text:
"""{chunk}""""#
    )
}

/// Parses the model's JSON array of pairs.
///
/// A truncated array (output cut off after a closing `}}`) is salvaged by
/// appending the missing `]`. Anything else that fails to parse yields no
/// pairs. Missing `question`/`answer` fields default to empty strings.
pub fn parse_qa_pairs(content: &str) -> Vec<(String, String)> {
    let content = strip_code_fences(content);

    let parsed: Option<Value> = serde_json::from_str(content).ok().or_else(|| {
        if content.ends_with('}') {
            serde_json::from_str(&format!("{}]", content)).ok()
        } else {
            None
        }
    });

    let Some(Value::Array(items)) = parsed else {
        return Vec::new();
    };

    items
        .iter()
        .map(|item| {
            let question = item
                .get("question")
                .and_then(Value::as_str)
                .unwrap_or("")
                .trim()
                .to_string();
            let answer = item
                .get("answer")
                .and_then(Value::as_str)
                .unwrap_or("")
                .trim()
                .to_string();
            (question, answer)
        })
        .collect()
}
