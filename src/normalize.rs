//! Raw text cleanup applied before pattern-based segmentation.

use regex::Regex;
use std::sync::LazyLock;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static CITATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\d+(–\d+)?\]").unwrap());
static CAPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(Figure|Table) \d+[^.\n]*").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strips URLs, leftover markup, citation markers like `[1]` or `[1–3]`, and
/// figure/table captions, then collapses all whitespace runs to single spaces.
pub fn clean_text(text: &str) -> String {
    let text = URL_RE.replace_all(text, "");
    let text = TAG_RE.replace_all(&text, "");
    let text = CITATION_RE.replace_all(&text, "");
    let text = CAPTION_RE.replace_all(&text, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_urls() {
        let cleaned = clean_text("see https://example.com/page for details");
        assert_eq!(cleaned, "see for details");
    }

    #[test]
    fn removes_markup_and_citations() {
        let cleaned = clean_text("chargers <b>deliver</b> power [1] and [2–4] quickly");
        assert_eq!(cleaned, "chargers deliver power and quickly");
    }

    #[test]
    fn removes_figure_and_table_captions() {
        let cleaned = clean_text("Results follow.\nFigure 3 shows charger uptime\nDone.");
        assert_eq!(cleaned, "Results follow. Done.");
        let cleaned = clean_text("Table 12: utilization by region\nSummary.");
        assert_eq!(cleaned, "Summary.");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(clean_text("  a \t b\n\n c  "), "a b c");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(clean_text("   "), "");
    }
}
