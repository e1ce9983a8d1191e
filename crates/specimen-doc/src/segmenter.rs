//! Description document segmentation
//!
//! A description is a Markdown document with one level-1 title, an opening
//! paragraph, and optional recognized level-2+ headings. The segmenter turns
//! it into ordered [`Section`]s:
//!
//! ```text
//! # Ammonite                      <- title
//!
//! Coiled marine cephalopod...     <- Overview
//!
//! ## Key Features                 <- Features
//! - ...
//!
//! ## Taxonomy & Classification    <- Taxonomy
//! ...
//!
//! *Source: ...*                   <- appended to Taxonomy (or its own Source tab)
//! ```

use specimen_settings::DocumentSettings;

use crate::blocks::{scan_blocks, Block, BlockKind};
use crate::error::{DocumentResult, MalformedReason};
use crate::section::{Section, SectionKind};

/// Lowercase prefixes that mark a trailing citation paragraph
const CITATION_PREFIXES: [&str; 5] = [
    "source:",
    "sources:",
    "citation:",
    "reference:",
    "references:",
];

/// Result of segmenting a document
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentedDocument {
    /// Plain text of the title heading
    pub title: String,
    /// Sections in document order
    pub sections: Vec<Section>,
}

/// Section under construction
struct Draft<'a> {
    kind: SectionKind,
    parts: Vec<&'a str>,
}

/// Splits description documents into sections
#[derive(Debug, Clone)]
pub struct Segmenter {
    min_length: usize,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(&DocumentSettings::default())
    }
}

impl Segmenter {
    /// Create a segmenter from document settings
    pub fn new(settings: &DocumentSettings) -> Self {
        Self {
            min_length: settings.min_length,
        }
    }

    /// Create a segmenter with an explicit minimum length
    pub fn with_min_length(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Minimum trimmed length for a document to be segmented
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Segment a document
    ///
    /// Fails with a [`MalformedReason`] when the document is too short, has no
    /// title, has content ahead of the title or has nothing after it. Callers
    /// fall back to verbatim display.
    pub fn segment(&self, document: &str) -> DocumentResult<SegmentedDocument> {
        let len = document.trim().len();
        if len < self.min_length {
            return Err(MalformedReason::TooShort {
                len,
                min: self.min_length,
            }
            .into());
        }

        let blocks = scan_blocks(document);
        let title_index = blocks
            .iter()
            .position(|b| b.is_heading(1))
            .ok_or(MalformedReason::MissingTitle)?;
        if title_index > 0 {
            return Err(MalformedReason::ContentBeforeTitle.into());
        }
        let title = blocks[title_index].text.trim().to_string();

        let (body, citation) = split_citation(&blocks[title_index + 1..]);

        let mut drafts: Vec<Draft<'_>> = Vec::new();
        for block in body {
            if let BlockKind::Heading(level) = block.kind {
                if level >= 2 {
                    if let Some(kind) = SectionKind::from_heading(&block.text) {
                        drafts.push(Draft {
                            kind,
                            parts: Vec::new(),
                        });
                        continue;
                    }
                }
            }

            // Anything before the first recognized heading belongs to the overview
            if drafts.is_empty() {
                drafts.push(Draft {
                    kind: SectionKind::Overview,
                    parts: Vec::new(),
                });
            }
            if let Some(draft) = drafts.last_mut() {
                draft.parts.push(block.source(document));
            }
        }

        if let Some(citation) = citation {
            let citation = citation.source(document);
            match drafts.iter_mut().find(|d| d.kind == SectionKind::Taxonomy) {
                Some(taxonomy) => taxonomy.parts.push(citation),
                None => drafts.push(Draft {
                    kind: SectionKind::Source,
                    parts: vec![citation],
                }),
            }
        }

        if drafts.is_empty() {
            return Err(MalformedReason::NoSections.into());
        }

        Ok(SegmentedDocument {
            title,
            sections: finish(drafts),
        })
    }
}

/// Separate a trailing citation paragraph (and a rule right before it) from the body
fn split_citation(body: &[Block]) -> (&[Block], Option<&Block>) {
    let Some((last, rest)) = body.split_last() else {
        return (body, None);
    };
    if last.kind != BlockKind::Paragraph || !is_citation(&last.text) {
        return (body, None);
    }

    match rest.split_last() {
        Some((rule, before)) if rule.kind == BlockKind::Rule => (before, Some(last)),
        _ => (rest, Some(last)),
    }
}

fn is_citation(text: &str) -> bool {
    let lower = text.trim_start().to_lowercase();
    CITATION_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}

/// Number drafts and assign ids, suffixing repeated kinds
fn finish(drafts: Vec<Draft<'_>>) -> Vec<Section> {
    let mut seen: Vec<SectionKind> = Vec::new();

    drafts
        .into_iter()
        .enumerate()
        .map(|(order, draft)| {
            let repeat = seen.iter().filter(|k| **k == draft.kind).count();
            seen.push(draft.kind);

            let id = if repeat == 0 {
                draft.kind.id().to_string()
            } else {
                format!("{}-{}", draft.kind.id(), repeat + 1)
            };

            Section {
                id,
                kind: draft.kind,
                title: draft.kind.title().to_string(),
                content: draft.parts.join("\n\n"),
                order,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocumentError;

    const AMMONITE: &str = "\
# Ammonite

Ammonites are extinct marine cephalopods with coiled, chambered shells.

## Key Features

- Planispiral coiled shell
- Complex suture lines
- Gas-filled chambers for buoyancy

## Taxonomy & Classification

Class Cephalopoda, subclass Ammonoidea.

*Source: Treatise on Invertebrate Paleontology*
";

    fn ids(doc: &SegmentedDocument) -> Vec<&str> {
        doc.sections.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_overview_features_taxonomy() {
        let doc = Segmenter::default().segment(AMMONITE).unwrap();
        assert_eq!(doc.title, "Ammonite");
        assert_eq!(ids(&doc), vec!["overview", "features", "taxonomy"]);

        let features = &doc.sections[1];
        assert_eq!(features.content.lines().filter(|l| l.starts_with("- ")).count(), 3);

        let taxonomy = &doc.sections[2];
        assert!(taxonomy.content.starts_with("Class Cephalopoda"));
        assert!(taxonomy.content.ends_with("*Source: Treatise on Invertebrate Paleontology*"));

        let orders: Vec<usize> = doc.sections.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_citation_without_taxonomy_becomes_source() {
        let doc = "\
# Quartz Geode

A hollow rock lined with crystals that grew inward from the walls over millions of years.

## Geological Significance

Records the chemistry of groundwater that filled the cavity.

---

Source: Mineralogical Society field guide
";
        let doc = Segmenter::default().segment(doc).unwrap();
        assert_eq!(ids(&doc), vec!["overview", "significance", "source"]);
        assert_eq!(doc.sections[2].content, "Source: Mineralogical Society field guide");
        // Rule before the citation is dropped, not left in the previous section
        assert!(!doc.sections[1].content.contains("---"));
    }

    #[test]
    fn test_unrecognized_heading_stays_in_section() {
        let doc = "\
# Trilobite

Trilobites are extinct marine arthropods that thrived through the Paleozoic era.

## Key Features

Three lobes along the body.

### Eyes

Calcite lenses.

## Habitat

Shallow seas.
";
        let doc = Segmenter::default().segment(doc).unwrap();
        assert_eq!(ids(&doc), vec!["overview", "features"]);
        let features = &doc.sections[1].content;
        assert!(features.contains("### Eyes"));
        assert!(features.contains("## Habitat"));
        assert!(features.ends_with("Shallow seas."));
    }

    #[test]
    fn test_preamble_joins_overview() {
        let doc = "\
# Specimen

First paragraph is the overview of this specimen and its history.

Second paragraph still belongs to the overview section.

## Key Features

- one
";
        let doc = Segmenter::default().segment(doc).unwrap();
        assert_eq!(ids(&doc), vec!["overview", "features"]);
        assert!(doc.sections[0].content.contains("Second paragraph"));
    }

    #[test]
    fn test_repeated_heading_ids() {
        let doc = "\
# Specimen

An overview paragraph that is long enough to pass the minimum length rule.

## Key Features

- shell

## Key Features (continued)

- ribs
";
        let doc = Segmenter::default().segment(doc).unwrap();
        assert_eq!(ids(&doc), vec!["overview", "features", "features-2"]);
    }

    #[test]
    fn test_too_short() {
        let err = Segmenter::default().segment("Loading description...").unwrap_err();
        assert_eq!(
            err,
            DocumentError::Malformed(MalformedReason::TooShort { len: 22, min: 100 })
        );
    }

    #[test]
    fn test_missing_title() {
        let doc = "## Key Features\n\nThis document never declares a top-level title, \
                   so it cannot be split into tabs and is shown as written.";
        let err = Segmenter::default().segment(doc).unwrap_err();
        assert_eq!(err, DocumentError::Malformed(MalformedReason::MissingTitle));
    }

    #[test]
    fn test_title_without_body() {
        let doc = "# An exceptionally long specimen title that easily clears the minimum \
                   length rule entirely on its own merits\n";
        let err = Segmenter::default().segment(doc).unwrap_err();
        assert_eq!(err, DocumentError::Malformed(MalformedReason::NoSections));
    }

    #[test]
    fn test_content_before_title() {
        let doc = "\
Draft notes that were left above the heading by mistake.

# Ammonite

Ammonites are extinct marine cephalopods with coiled, chambered shells.
";
        let err = Segmenter::default().segment(doc).unwrap_err();
        assert_eq!(err, DocumentError::Malformed(MalformedReason::ContentBeforeTitle));
    }

    #[test]
    fn test_custom_min_length() {
        let segmenter = Segmenter::with_min_length(0);
        let doc = segmenter.segment("# T\n\nShort.").unwrap();
        assert_eq!(ids(&doc), vec!["overview"]);
    }
}
