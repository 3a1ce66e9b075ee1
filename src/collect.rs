//! Document collection: web page fetching and PDF text extraction.
//!
//! Sources are processed one at a time; a source that fails to fetch or
//! extract is reported and skipped so the rest of the batch still runs.

use anyhow::Result;
use std::time::Duration;

use crate::config::Config;
use crate::models::{RawDocument, SourceKind};

/// Fetches every configured web and PDF source into raw documents.
pub async fn collect_documents(config: &Config) -> Result<Vec<RawDocument>> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.processing.fetch_timeout_secs))
        .build()?;

    let mut documents = Vec::new();

    for url in &config.sources.web {
        match fetch_web(&client, url).await {
            Ok(doc) => documents.push(doc),
            Err(e) => eprintln!("error scraping {}: {:#}", url, e),
        }
    }

    for source in &config.sources.pdfs {
        match fetch_pdf(&client, source).await {
            Ok(doc) => documents.push(doc),
            Err(e) => eprintln!("error processing PDF {}: {:#}", source, e),
        }
    }

    Ok(documents)
}

async fn fetch_web(client: &reqwest::Client, url: &str) -> Result<RawDocument> {
    let response = client.get(url).send().await?.error_for_status()?;
    let content = response.text().await?;
    Ok(RawDocument {
        source: url.to_string(),
        kind: SourceKind::Web,
        content,
    })
}

/// PDF sources may be http(s) URLs or local paths.
async fn fetch_pdf(client: &reqwest::Client, source: &str) -> Result<RawDocument> {
    let bytes: Vec<u8> = if source.starts_with("http://") || source.starts_with("https://") {
        client
            .get(source)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?
            .to_vec()
    } else {
        tokio::fs::read(source).await?
    };

    let content = pdf_extract::extract_text_from_mem(&bytes)
        .map_err(|e| anyhow::anyhow!("PDF extraction failed: {}", e))?;

    Ok(RawDocument {
        source: source.to_string(),
        kind: SourceKind::Pdf,
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalid_pdf_bytes_are_an_error() {
        let client = reqwest::Client::new();
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), b"not a pdf").unwrap();
        let result = fetch_pdf(&client, tmp.path().to_str().unwrap()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn missing_local_pdf_is_an_error() {
        let client = reqwest::Client::new();
        let result = fetch_pdf(&client, "/no/such/file.pdf").await;
        assert!(result.is_err());
    }
}
