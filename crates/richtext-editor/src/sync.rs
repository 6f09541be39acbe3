//! Keeping an editing surface and an externally owned document in step.
//!
//! The surrounding form owns the authoritative [`Document`]. The editing
//! surface owns its own tree and reports changes. Without a guard, every
//! change the editor emits comes back as an "external" update and resets the
//! editor's own content. [`EditorSync`] compares the document derived from
//! the editor's current tree with the incoming one and only writes into the
//! surface when they differ.

use richtext_core::{Block, Document, HtmlOptions, Inline, ListFormat};

use crate::convert::convert;
use crate::node::{EditorNode, Mark};
use crate::options::ConvertOptions;

/// Content pushed into an editing surface
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceContent {
    /// An HTML fragment for the surface's initializer
    Html(String),
    /// A native tree, for surfaces that accept one
    Tree(Vec<EditorNode>),
}

/// Capability contract of a WYSIWYG editing surface
pub trait EditorSurface {
    /// Current block-level tree
    fn tree(&self) -> Vec<EditorNode>;

    /// Replace the surface's content
    fn set_content(&mut self, content: SurfaceContent);

    /// Whether `set_content` takes a native tree instead of HTML
    fn accepts_tree(&self) -> bool {
        false
    }
}

/// Guard state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// The editor's derived document equals the authoritative one
    Synced,
    /// An external write into the surface is pending
    Syncing,
}

/// Result of offering an external document to the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The editor already shows this document; nothing was written
    Unchanged,
    /// The surface content was replaced
    Pushed,
}

/// Synchronization guard around an editing surface
pub struct EditorSync<S: EditorSurface> {
    surface: S,
    convert_options: ConvertOptions,
    html_options: HtmlOptions,
    document: Document,
    state: SyncState,
}

impl<S: EditorSurface> EditorSync<S> {
    /// Wrap a surface. The authoritative document starts as whatever the
    /// surface currently holds.
    pub fn new(surface: S) -> Self {
        Self::with_options(surface, ConvertOptions::default(), HtmlOptions::default())
    }

    pub fn with_options(
        surface: S,
        convert_options: ConvertOptions,
        html_options: HtmlOptions,
    ) -> Self {
        let document = convert(&surface.tree(), &convert_options);
        Self {
            surface,
            convert_options,
            html_options,
            document,
            state: SyncState::Synced,
        }
    }

    /// Load stored content into the surface unconditionally.
    ///
    /// Used when an edit session starts with a fetched record.
    pub fn seed(&mut self, document: Document) {
        self.push(&document);
        self.document = document;
    }

    /// Offer an externally supplied document (e.g. a form re-populated with
    /// another record). The surface is only written when the document derived
    /// from its current tree differs.
    pub fn apply_external(&mut self, document: Document) -> SyncOutcome {
        let current = self.derive();
        let outcome = if current == document {
            log::trace!("external document matches editor, skipping write");
            SyncOutcome::Unchanged
        } else {
            self.push(&document);
            SyncOutcome::Pushed
        };
        self.document = document;
        outcome
    }

    /// Change hook, called after every edit on the surface.
    ///
    /// Returns the derived document when it differs from the authoritative
    /// one; that document becomes authoritative. Returns `None` when the
    /// change is an echo of content that is already authoritative.
    pub fn on_change(&mut self) -> Option<Document> {
        let derived = self.derive();
        if derived == self.document {
            None
        } else {
            self.document = derived.clone();
            Some(derived)
        }
    }

    /// Document derived from the surface's current tree
    pub fn derive(&self) -> Document {
        convert(&self.surface.tree(), &self.convert_options)
    }

    /// The authoritative document
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface, for driving edits
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    fn push(&mut self, document: &Document) {
        self.state = SyncState::Syncing;
        log::trace!("sync state: syncing ({} blocks)", document.len());

        let content = if self.surface.accepts_tree() {
            SurfaceContent::Tree(to_tree(document))
        } else {
            SurfaceContent::Html(document.to_html(&self.html_options))
        };
        self.surface.set_content(content);

        self.state = SyncState::Synced;
        log::trace!("sync state: synced");
    }
}

/// Build the native tree for a document, for surfaces that accept trees.
pub fn to_tree(document: &Document) -> Vec<EditorNode> {
    let mut nodes = Vec::new();
    for block in document {
        match block {
            Block::Paragraph { children } => nodes.push(paragraph_node(children)),
            Block::Heading { level, children } => {
                let mut content = Vec::new();
                push_runs(children, None, &mut content);
                nodes.push(EditorNode::heading((*level).clamp(1, 6), content));
            }
            Block::List { format, children } => {
                let items = children
                    .iter()
                    .map(|item| EditorNode::list_item(vec![paragraph_node(&item.children)]))
                    .collect();
                nodes.push(match format {
                    ListFormat::Ordered => EditorNode::ordered_list(items),
                    ListFormat::Unordered => EditorNode::bullet_list(items),
                });
            }
            Block::Quote { children } => {
                nodes.push(EditorNode::blockquote(vec![paragraph_node(children)]))
            }
            Block::Unsupported => {}
        }
    }
    nodes
}

fn paragraph_node(inlines: &[Inline]) -> EditorNode {
    let mut content = Vec::new();
    push_runs(inlines, None, &mut content);
    EditorNode::paragraph(content)
}

/// Flatten inlines into marked text runs; a link becomes a mark on each run.
fn push_runs(inlines: &[Inline], link: Option<&str>, out: &mut Vec<EditorNode>) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => {
                if text.text.is_empty() {
                    continue;
                }
                let mut marks = Vec::new();
                if text.bold {
                    marks.push(Mark::bold());
                }
                if text.italic {
                    marks.push(Mark::italic());
                }
                if text.underline {
                    marks.push(Mark::underline());
                }
                if text.strikethrough {
                    marks.push(Mark::strike());
                }
                if let Some(href) = link {
                    marks.push(Mark::link(href));
                }
                out.push(EditorNode::marked_text(&text.text, marks));
            }
            Inline::Link(inner) => push_runs(&inner.children, Some(&inner.url), out),
            Inline::Unsupported => {}
        }
    }
}
