//! Top-level Markdown block scanning
//!
//! Splits a Markdown document into its top-level blocks with their source
//! ranges, so sections can keep the original Markdown of their content.

use std::ops::Range;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};

/// Markdown extensions enabled for both scanning and HTML rendering
pub(crate) fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockKind {
    /// Heading with its level (1-6)
    Heading(u8),
    Paragraph,
    /// Thematic break (`---`)
    Rule,
    /// Lists, quotes, code, tables, HTML
    Other,
}

/// A top-level block
#[derive(Debug, Clone)]
pub(crate) struct Block {
    pub kind: BlockKind,
    /// Byte range in the source document
    pub range: Range<usize>,
    /// Plain text content without markup
    pub text: String,
}

impl Block {
    /// Source Markdown of this block
    pub fn source<'a>(&self, document: &'a str) -> &'a str {
        document[self.range.clone()].trim_end()
    }

    pub fn is_heading(&self, level: u8) -> bool {
        self.kind == BlockKind::Heading(level)
    }
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn block_kind(tag: &Tag<'_>) -> BlockKind {
    match tag {
        Tag::Heading { level, .. } => BlockKind::Heading(heading_depth(*level)),
        Tag::Paragraph => BlockKind::Paragraph,
        _ => BlockKind::Other,
    }
}

/// Scan the top-level blocks of a Markdown document in order
pub(crate) fn scan_blocks(document: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut current: Option<Block> = None;

    for (event, range) in Parser::new_ext(document, markdown_options()).into_offset_iter() {
        match event {
            Event::Start(tag) => {
                if depth == 0 {
                    current = Some(Block {
                        kind: block_kind(&tag),
                        range,
                        text: String::new(),
                    });
                }
                depth += 1;
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    if let Some(block) = current.take() {
                        blocks.push(block);
                    }
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(block) = current.as_mut() {
                    block.text.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(block) = current.as_mut() {
                    block.text.push(' ');
                }
            }
            Event::Rule if depth == 0 => blocks.push(Block {
                kind: BlockKind::Rule,
                range,
                text: String::new(),
            }),
            _ => {}
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_kinds() {
        let doc = "# Title\n\nFirst *para*.\n\n## Key Features\n\n- a\n- b\n\n---\n\nEnd.\n";
        let blocks = scan_blocks(doc);
        let kinds: Vec<BlockKind> = blocks.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Heading(1),
                BlockKind::Paragraph,
                BlockKind::Heading(2),
                BlockKind::Other,
                BlockKind::Rule,
                BlockKind::Paragraph,
            ]
        );
    }

    #[test]
    fn test_block_text_strips_markup() {
        let doc = "# The *Title*\n\nSome **bold** and `code`\nacross lines.\n";
        let blocks = scan_blocks(doc);
        assert_eq!(blocks[0].text, "The Title");
        assert_eq!(blocks[1].text, "Some bold and code across lines.");
    }

    #[test]
    fn test_block_source_keeps_markdown() {
        let doc = "# T\n\n- one\n- two\n";
        let blocks = scan_blocks(doc);
        assert_eq!(blocks[1].source(doc), "- one\n- two");
    }
}
