//! # richtext-editor
//!
//! Convert editing-surface trees to portable rich-text documents.
//!
//! A WYSIWYG editor (ProseMirror/tiptap) describes its content as a JSON tree
//! of typed nodes with marks on text runs. The content store expects the
//! portable [`Document`](richtext_core::Document) shape instead. This crate
//! converts between the two, renders documents back to HTML for seeding the
//! editor, and guards the editor against update loops.
//!
//! ## Design
//!
//! - **Total conversion**: malformed or half-typed nodes are skipped, never
//!   reported as errors, so an edit in progress always converts.
//! - **Surface agnostic**: any editor that can report its tree and accept
//!   HTML (or a tree) plugs in through [`EditorSurface`].
//! - **Optional parser**: the `html` feature parses HTML back into a tree,
//!   standing in for the editor's initializer.
//!
//! ## Example
//!
//! ```rust
//! use richtext_editor::{EditorNode, Mark, RichTextService};
//!
//! let service = RichTextService::new();
//!
//! let tree = vec![EditorNode::paragraph(vec![
//!     EditorNode::marked_text("Hello", vec![Mark::bold()]),
//!     EditorNode::text(" World"),
//! ])];
//!
//! let document = service.to_document(&tree);
//! let html = service.to_html(&document);
//! assert_eq!(html, "<p><strong>Hello</strong> World</p>");
//! ```

mod convert;
#[cfg(feature = "html")]
pub mod html;
pub mod node;
mod options;
mod service;
pub mod sync;

pub use convert::{convert, convert_inlines, convert_root};
#[cfg(feature = "html")]
pub use html::parse_html;
pub use node::{EditorNode, Mark, MarkKind, NodeKind};
pub use options::ConvertOptions;
pub use service::RichTextService;
pub use sync::{to_tree, EditorSurface, EditorSync, SurfaceContent, SyncOutcome, SyncState};

/// Error type for editor content operations
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("Invalid editor JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Document(#[from] richtext_core::Error),
}

pub type Result<T> = std::result::Result<T, EditorError>;
