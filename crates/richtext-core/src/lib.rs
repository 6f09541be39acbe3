//! richtext-core - portable rich-text document model and HTML rendering
//!
//! This crate provides the document shape persisted by the content store
//! (the Strapi "blocks" JSON) and its projection to static HTML. It is used
//! by `richtext-editor`, which converts editing-surface trees into documents,
//! and by `richtext-dashboard`, which stores documents on reading-corner
//! articles.
//!
//! # Architecture
//!
//! ```text
//! Editor Tree ──convert──▶ ┌──────────┐
//!                          │          │ ──render──▶ HTML String
//!                          │ Document │
//! Stored JSON ───serde───▶ │          │ ──serde───▶ Stored JSON
//!                          └──────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use richtext_core::{render_html, Block, Document, HtmlOptions, Inline, Text};
//!
//! let doc = Document::from(vec![
//!     Block::heading(1, vec![Inline::text("Hello World")]),
//!     Block::paragraph(vec![
//!         Inline::text("This is "),
//!         Text::new("bold").bold().into(),
//!         Inline::text(" text."),
//!     ]),
//! ]);
//!
//! let html = render_html(doc.blocks(), &HtmlOptions::default());
//! assert_eq!(html, "<h1>Hello World</h1><p>This is <strong>bold</strong> text.</p>");
//! ```

mod ast;
mod options;
mod render;

pub use ast::{inlines_text, Block, Document, Inline, Link, ListFormat, ListItem, Text};
pub use options::HtmlOptions;
pub use render::{render_html, render_inlines_html};

/// Error type for document (de)serialization
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Document {
    /// Render this document to HTML
    pub fn to_html(&self, options: &HtmlOptions) -> String {
        render_html(self.blocks(), options)
    }
}
