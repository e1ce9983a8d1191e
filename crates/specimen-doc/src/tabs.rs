//! Tabbed reading view
//!
//! Panels are rendered to HTML once, when the view is built. Switching tabs
//! only moves the active index.

use std::fmt::Write as _;

use pulldown_cmark::{html, Parser};

use crate::blocks::markdown_options;
use crate::error::{DocumentError, DocumentResult};
use crate::section::Section;

/// A section with its pre-rendered panel
#[derive(Debug, Clone)]
pub struct Tab {
    pub section: Section,
    /// Panel body HTML
    pub html: String,
}

/// Tab bar plus content panels with exactly one active tab
#[derive(Debug, Clone)]
pub struct TabView {
    title: String,
    tabs: Vec<Tab>,
    active: usize,
}

impl TabView {
    /// Build a view; the first section is active
    pub fn new(title: impl Into<String>, sections: Vec<Section>) -> Self {
        let tabs = sections
            .into_iter()
            .map(|section| {
                let html = markdown_to_html(&section.content);
                Tab { section, html }
            })
            .collect();

        Self {
            title: title.into(),
            tabs,
            active: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Currently active tab
    pub fn active(&self) -> Option<&Tab> {
        self.tabs.get(self.active)
    }

    /// Id of the active tab
    pub fn active_id(&self) -> Option<&str> {
        self.active().map(|tab| tab.section.id.as_str())
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active_id() == Some(id)
    }

    /// Activate the tab with the given id
    ///
    /// An unknown id leaves the current tab active.
    pub fn select(&mut self, id: &str) -> DocumentResult<()> {
        let index = self
            .tabs
            .iter()
            .position(|tab| tab.section.id == id)
            .ok_or_else(|| DocumentError::UnknownTab(id.to_string()))?;
        self.active = index;
        Ok(())
    }

    /// Render the tab bar and the content panels
    pub fn render_html(&self) -> String {
        let mut out = String::new();
        out.push_str("<div class=\"description-tabs\">\n");

        out.push_str("<div class=\"tab-bar\" role=\"tablist\">\n");
        for (i, tab) in self.tabs.iter().enumerate() {
            let id = escape_html(&tab.section.id);
            let _ = writeln!(
                out,
                "<button class=\"tab-button{}\" role=\"tab\" data-tab=\"{}\" aria-selected=\"{}\">{}</button>",
                active_class(i == self.active),
                id,
                i == self.active,
                escape_html(&tab.section.title),
            );
        }
        out.push_str("</div>\n");

        out.push_str("<div class=\"tab-content\">\n");
        for (i, tab) in self.tabs.iter().enumerate() {
            let _ = writeln!(
                out,
                "<section class=\"tab-panel{}\" id=\"tab-{}\" role=\"tabpanel\">\n{}</section>",
                active_class(i == self.active),
                escape_html(&tab.section.id),
                tab.html,
            );
        }
        out.push_str("</div>\n");

        out.push_str("</div>\n");
        out
    }
}

fn active_class(active: bool) -> &'static str {
    if active {
        " active"
    } else {
        ""
    }
}

/// Render Markdown to HTML
pub fn markdown_to_html(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, Parser::new_ext(markdown, markdown_options()));
    out
}

/// Escape text for HTML attribute and element content
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::SectionKind;

    fn section(kind: SectionKind, content: &str, order: usize) -> Section {
        Section {
            id: kind.id().to_string(),
            kind,
            title: kind.title().to_string(),
            content: content.to_string(),
            order,
        }
    }

    fn sample() -> TabView {
        TabView::new(
            "Ammonite",
            vec![
                section(SectionKind::Overview, "Coiled shell.", 0),
                section(SectionKind::Features, "- ribs\n- keel", 1),
            ],
        )
    }

    #[test]
    fn test_first_tab_active() {
        let view = sample();
        assert_eq!(view.active_id(), Some("overview"));
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_select() {
        let mut view = sample();
        view.select("features").unwrap();
        assert!(view.is_active("features"));
        assert!(!view.is_active("overview"));
    }

    #[test]
    fn test_select_unknown_keeps_active() {
        let mut view = sample();
        view.select("features").unwrap();
        let err = view.select("nope").unwrap_err();
        assert_eq!(err, DocumentError::UnknownTab("nope".to_string()));
        assert_eq!(view.active_id(), Some("features"));
    }

    #[test]
    fn test_panels_prerendered() {
        let view = sample();
        assert_eq!(view.tabs()[0].html, "<p>Coiled shell.</p>\n");
        assert!(view.tabs()[1].html.contains("<li>ribs</li>"));
    }

    #[test]
    fn test_render_html_single_active() {
        let mut view = sample();
        view.select("features").unwrap();
        let html = view.render_html();

        assert_eq!(html.matches("tab-button active").count(), 1);
        assert_eq!(html.matches("tab-panel active").count(), 1);
        assert!(html.contains(
            "<button class=\"tab-button active\" role=\"tab\" data-tab=\"features\""
        ));
        assert!(html.contains("<section class=\"tab-panel active\" id=\"tab-features\""));
        assert!(html.contains("<section class=\"tab-panel\" id=\"tab-overview\""));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("Taxonomy & <Classification>"),
            "Taxonomy &amp; &lt;Classification&gt;"
        );
    }

    #[test]
    fn test_empty_view() {
        let view = TabView::new("Empty", Vec::new());
        assert!(view.is_empty());
        assert_eq!(view.active_id(), None);
    }
}
