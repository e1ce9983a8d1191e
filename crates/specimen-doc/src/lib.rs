//! Specimen description documents
//!
//! This crate turns a specimen's Markdown description into a tabbed reading
//! view:
//!
//! - [`Segmenter`] - splits a document into ordered [`Section`]s
//! - [`TabView`] - tab bar plus pre-rendered panels, one active at a time
//! - [`render_description`] - segment and render, falling back to verbatim text
//!
//! # Example
//!
//! ```rust
//! use specimen_doc::render_description;
//! use specimen_settings::DocumentSettings;
//!
//! let rendered = render_description("Loading...", &DocumentSettings::default());
//! assert_eq!(rendered.to_html(), "Loading...");
//! ```

mod blocks;
mod error;
mod render;
mod section;
mod segmenter;
mod tabs;

pub use error::{DocumentError, DocumentResult, MalformedReason};
pub use render::{render_description, RenderedDescription};
pub use section::{Section, SectionKind};
pub use segmenter::{SegmentedDocument, Segmenter};
pub use tabs::{markdown_to_html, Tab, TabView};
