//! Section detection for web and PDF documents.
//!
//! Two variants share the [`Section`] output shape:
//!
//! - **Structural** ([`segment_html`]) walks `h1`/`h2`/`h3`/`p` elements in
//!   document order. Each heading starts a new section; paragraphs accumulate
//!   under the current heading. Body text before the first heading lands
//!   under the `"Intro"` sentinel.
//! - **Pattern-based** ([`segment_text`]) locates heading-like spans in flat
//!   text (short capitalized line, optionally numbered, terminated by a colon
//!   or newline). When nothing matches, the whole document becomes a single
//!   `"Generic"` section rather than being dropped.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::models::{RawDocument, Section, SourceKind};
use crate::normalize::clean_text;

/// Sentinel heading for web body text preceding the first heading tag.
pub const INTRO_HEADING: &str = "Intro";
/// Sentinel heading used when pattern-based segmentation finds no headings.
pub const GENERIC_HEADING: &str = "Generic";

static BLOCK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, p").unwrap());

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n?\s*(\d{0,2}\.?\s*[A-Z][^\n:.]{3,80})[:\n]").unwrap());

/// Splits a document into sections using the variant matching its kind.
///
/// PDF text is normalized first; raw HTML is handed to the structural parser
/// as-is so heading tags survive.
pub fn segment_document(doc: &RawDocument) -> Vec<Section> {
    match doc.kind {
        SourceKind::Web => segment_html(&doc.content),
        SourceKind::Pdf => segment_text(&clean_text(&doc.content)),
    }
}

/// Structural segmentation over HTML.
pub fn segment_html(html: &str) -> Vec<Section> {
    let document = Html::parse_document(html);
    let mut sections = Vec::new();
    let mut heading = INTRO_HEADING.to_string();
    let mut body: Vec<String> = Vec::new();

    for element in document.select(&BLOCK_SELECTOR) {
        let text = collapse_whitespace(&element.text().collect::<String>());
        if element.value().name() == "p" {
            if !text.is_empty() {
                body.push(text);
            }
        } else {
            if !body.is_empty() {
                sections.push(Section {
                    heading: heading.clone(),
                    body: body.join(" "),
                });
                body.clear();
            }
            heading = text;
        }
    }

    if !body.is_empty() {
        sections.push(Section {
            heading,
            body: body.join(" "),
        });
    }

    sections
}

/// Pattern-based segmentation over flat (already normalized) text.
pub fn segment_text(text: &str) -> Vec<Section> {
    let matches: Vec<(String, usize, usize)> = HEADING_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let heading = caps.get(1)?.as_str().trim().to_string();
            Some((heading, whole.start(), whole.end()))
        })
        .collect();

    if matches.is_empty() {
        return vec![Section {
            heading: GENERIC_HEADING.to_string(),
            body: text.trim().to_string(),
        }];
    }

    let mut sections = Vec::with_capacity(matches.len());
    for (i, (heading, _, body_start)) in matches.iter().enumerate() {
        let body_end = matches
            .get(i + 1)
            .map(|(_, next_start, _)| *next_start)
            .unwrap_or(text.len());
        sections.push(Section {
            heading: heading.clone(),
            body: text[*body_start..body_end].trim().to_string(),
        });
    }
    sections
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_intro_captures_leading_paragraphs() {
        let html = "<html><body>\
            <p>Opening remarks.</p>\
            <h1>Charging Basics</h1>\
            <p>Level 2 chargers use 240 volts.</p>\
            </body></html>";
        let sections = segment_html(html);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, "Intro");
        assert_eq!(sections[0].body, "Opening remarks.");
        assert_eq!(sections[1].heading, "Charging Basics");
        assert_eq!(sections[1].body, "Level 2 chargers use 240 volts.");
    }

    #[test]
    fn html_paragraphs_accumulate_under_heading() {
        let html = "<h2>Networks</h2><p>First.</p><p>Second.</p><h2>Costs</h2><p>Third.</p>";
        let sections = segment_html(html);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].body, "First. Second.");
        assert_eq!(sections[1].heading, "Costs");
        assert_eq!(sections[1].body, "Third.");
    }

    #[test]
    fn html_empty_paragraphs_and_trailing_heading_are_ignored() {
        let html = "<h1>Alpha</h1><p>  </p><p>Body text.</p><h1>Dangling</h1>";
        let sections = segment_html(html);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading, "Alpha");
        assert_eq!(sections[0].body, "Body text.");
    }

    #[test]
    fn html_without_blocks_yields_nothing() {
        assert!(segment_html("<div>stray text</div>").is_empty());
    }

    #[test]
    fn text_headings_split_sections() {
        let text = "1. Introduction: EVs are spreading fast. 2. Methodology: We surveyed stations.";
        let sections = segment_text(text);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, "1. Introduction");
        assert_eq!(sections[0].body, "EVs are spreading fast.");
        assert_eq!(sections[1].heading, "2. Methodology");
        assert_eq!(sections[1].body, "We surveyed stations.");
    }

    #[test]
    fn text_without_headings_falls_back_to_generic() {
        let text = "plain prose with no heading markers at all.";
        let sections = segment_text(text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading, "Generic");
        assert_eq!(sections[0].body, text);
    }

    #[test]
    fn pdf_document_is_normalized_before_segmentation() {
        let doc = RawDocument {
            source: "report.pdf".to_string(),
            kind: SourceKind::Pdf,
            content: "see https://example.com\nBackground Overview: stations   grew [1] rapidly."
                .to_string(),
        };
        let sections = segment_document(&doc);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading, "Background Overview");
        assert_eq!(sections[0].body, "stations grew rapidly.");
    }
}
