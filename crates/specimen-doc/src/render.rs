//! Description rendering entry point

use specimen_settings::DocumentSettings;

use crate::error::DocumentResult;
use crate::segmenter::Segmenter;
use crate::tabs::TabView;

/// A rendered description, ready for the info panel
#[derive(Debug, Clone)]
pub enum RenderedDescription {
    /// Document shown as-is (short placeholder or unstructured text)
    Verbatim(String),
    /// Segmented document with tab switching
    Tabbed(TabView),
}

impl RenderedDescription {
    /// HTML fragment for the info panel
    ///
    /// Verbatim documents are returned unmodified.
    pub fn to_html(&self) -> String {
        match self {
            RenderedDescription::Verbatim(text) => text.clone(),
            RenderedDescription::Tabbed(view) => view.render_html(),
        }
    }

    pub fn is_tabbed(&self) -> bool {
        matches!(self, RenderedDescription::Tabbed(_))
    }

    pub fn tab_view(&self) -> Option<&TabView> {
        match self {
            RenderedDescription::Tabbed(view) => Some(view),
            RenderedDescription::Verbatim(_) => None,
        }
    }

    pub fn tab_view_mut(&mut self) -> Option<&mut TabView> {
        match self {
            RenderedDescription::Tabbed(view) => Some(view),
            RenderedDescription::Verbatim(_) => None,
        }
    }

    /// Switch tabs; a verbatim description has none to switch
    pub fn select_tab(&mut self, id: &str) -> DocumentResult<()> {
        match self {
            RenderedDescription::Tabbed(view) => view.select(id),
            RenderedDescription::Verbatim(_) => {
                Err(crate::error::DocumentError::UnknownTab(id.to_string()))
            }
        }
    }
}

/// Segment and render a description document
///
/// Malformed or undersized documents degrade to [`RenderedDescription::Verbatim`].
pub fn render_description(document: &str, settings: &DocumentSettings) -> RenderedDescription {
    match Segmenter::new(settings).segment(document) {
        Ok(segmented) => {
            RenderedDescription::Tabbed(TabView::new(segmented.title, segmented.sections))
        }
        Err(e) => {
            log::debug!("Rendering description verbatim: {}", e);
            RenderedDescription::Verbatim(document.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
# Ammonite

Ammonites are extinct marine cephalopods with coiled, chambered shells.

## Key Features

- Planispiral coiled shell
- Complex suture lines
- Gas-filled chambers

## Taxonomy & Classification

Class Cephalopoda.

*Source: Treatise on Invertebrate Paleontology*
";

    #[test]
    fn test_structured_document_is_tabbed() {
        let rendered = render_description(DOC, &DocumentSettings::default());
        let view = rendered.tab_view().expect("should be tabbed");
        assert_eq!(view.title(), "Ammonite");
        assert_eq!(view.active_id(), Some("overview"));

        let titles: Vec<&str> = view.tabs().iter().map(|t| t.section.title.as_str()).collect();
        assert_eq!(titles, vec!["Overview", "Features", "Taxonomy"]);
        assert!(view.tabs()[2]
            .html
            .contains("<em>Source: Treatise on Invertebrate Paleontology</em>"));
    }

    #[test]
    fn test_short_document_verbatim() {
        let text = "Select a specimen to see its description.";
        let rendered = render_description(text, &DocumentSettings::default());
        assert!(!rendered.is_tabbed());
        assert_eq!(rendered.to_html(), text);
        assert!(!rendered.to_html().contains("tab-"));
    }

    #[test]
    fn test_untitled_document_verbatim() {
        let text = "No heading here, just a long block of text that goes on well beyond the \
                    minimum length so that only the missing title triggers the fallback.";
        let rendered = render_description(text, &DocumentSettings::default());
        assert_eq!(rendered.to_html(), text);
    }

    #[test]
    fn test_title_only_document_verbatim() {
        let text = "# An exceptionally long specimen title that easily clears the minimum \
                    length rule entirely on its own merits\n";
        let rendered = render_description(text, &DocumentSettings::default());
        assert!(!rendered.is_tabbed());
        assert_eq!(rendered.to_html(), text);
    }

    #[test]
    fn test_preamble_before_title_verbatim() {
        let text = "Draft notes left above the heading.\n\n# Ammonite\n\n\
                    Ammonites are extinct marine cephalopods with coiled, chambered shells.\n";
        let rendered = render_description(text, &DocumentSettings::default());
        assert!(!rendered.is_tabbed());
        assert!(rendered.to_html().contains("Draft notes"));
    }

    #[test]
    fn test_select_tab_verbatim_fails() {
        let mut rendered = RenderedDescription::Verbatim("Loading...".to_string());
        assert!(rendered.select_tab("overview").is_err());
    }

    #[test]
    fn test_select_tab_does_not_reparse() {
        let mut rendered = render_description(DOC, &DocumentSettings::default());
        let before: Vec<String> = rendered
            .tab_view()
            .unwrap()
            .tabs()
            .iter()
            .map(|t| t.html.clone())
            .collect();

        rendered.select_tab("taxonomy").unwrap();
        let view = rendered.tab_view().unwrap();
        assert!(view.is_active("taxonomy"));
        let after: Vec<String> = view.tabs().iter().map(|t| t.html.clone()).collect();
        assert_eq!(before, after);
    }
}
