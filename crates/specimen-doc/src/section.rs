//! Section model for segmented descriptions

use serde::Serialize;

/// Kind of a description section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SectionKind {
    /// First paragraph after the title
    Overview,
    /// "Key Features"
    Features,
    /// "Geological/Biological Significance"
    Significance,
    /// "Taxonomy & Classification"
    Taxonomy,
    /// Trailing citation when no taxonomy section exists
    Source,
}

impl SectionKind {
    /// Kinds that are introduced by a heading in the document
    pub const HEADED: [SectionKind; 3] = [
        SectionKind::Features,
        SectionKind::Significance,
        SectionKind::Taxonomy,
    ];

    /// Stable identifier used for tab ids
    pub fn id(&self) -> &'static str {
        match self {
            SectionKind::Overview => "overview",
            SectionKind::Features => "features",
            SectionKind::Significance => "significance",
            SectionKind::Taxonomy => "taxonomy",
            SectionKind::Source => "source",
        }
    }

    /// Tab title
    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Overview => "Overview",
            SectionKind::Features => "Features",
            SectionKind::Significance => "Significance",
            SectionKind::Taxonomy => "Taxonomy",
            SectionKind::Source => "Source",
        }
    }

    /// Lowercase substrings that identify this kind's heading
    fn heading_patterns(&self) -> &'static [&'static str] {
        match self {
            SectionKind::Features => &["key features"],
            SectionKind::Significance => &[
                "geological/biological significance",
                "geological significance",
                "biological significance",
            ],
            SectionKind::Taxonomy => &["taxonomy"],
            SectionKind::Overview | SectionKind::Source => &[],
        }
    }

    /// Match heading text against the recognized section headings
    ///
    /// Matching is a case-insensitive substring test, so
    /// "Taxonomy & Classification" and "Taxonomy" both map to [`SectionKind::Taxonomy`].
    pub fn from_heading(text: &str) -> Option<SectionKind> {
        let lower = text.to_lowercase();
        Self::HEADED.into_iter().find(|kind| {
            kind.heading_patterns()
                .iter()
                .any(|pattern| lower.contains(pattern))
        })
    }
}

/// A titled slice of a description document
///
/// `content` is the Markdown source of the section body (heading excluded).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub id: String,
    pub kind: SectionKind,
    pub title: String,
    pub content: String,
    pub order: usize,
}
