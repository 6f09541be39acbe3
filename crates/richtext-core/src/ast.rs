//! Portable rich-text document model
//!
//! This module defines the serializable document exchanged with the content
//! store. The JSON shape matches the Strapi "blocks" field: every node carries
//! a `type` tag, blocks hold inline `children`, and formatting is expressed as
//! independent boolean flags on text runs.

use serde::{Deserialize, Serialize};

/// A portable rich-text document: an ordered sequence of blocks.
///
/// Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(pub Vec<Block>);

/// A block-level node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Block {
    /// Paragraph containing inline content
    Paragraph {
        #[serde(default)]
        children: Vec<Inline>,
    },

    /// Heading with level (1-6) and inline content
    Heading {
        #[serde(default = "default_heading_level")]
        level: u8,
        #[serde(default)]
        children: Vec<Inline>,
    },

    /// Ordered or unordered list
    List {
        format: ListFormat,
        #[serde(default)]
        children: Vec<ListItem>,
    },

    /// Block quote containing inline content
    Quote {
        #[serde(default)]
        children: Vec<Inline>,
    },

    /// A block type this model does not know about. Renders to nothing.
    #[serde(other)]
    Unsupported,
}

/// List numbering style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    Ordered,
    Unordered,
}

/// A single list entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ListItemRepr", into = "ListItemRepr")]
pub struct ListItem {
    pub children: Vec<Inline>,
}

/// Wire form of [`ListItem`], which carries its own `"type": "list-item"` tag.
#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum ListItemRepr {
    ListItem {
        #[serde(default)]
        children: Vec<Inline>,
    },
}

impl From<ListItemRepr> for ListItem {
    fn from(repr: ListItemRepr) -> Self {
        let ListItemRepr::ListItem { children } = repr;
        Self { children }
    }
}

impl From<ListItem> for ListItemRepr {
    fn from(item: ListItem) -> Self {
        ListItemRepr::ListItem {
            children: item.children,
        }
    }
}

/// An inline node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Inline {
    /// A run of text with optional formatting flags
    Text(Text),

    /// A hyperlink wrapping text runs
    Link(Link),

    /// An inline type this model does not know about. Renders to nothing.
    #[serde(other)]
    Unsupported,
}

/// A run of text.
///
/// Flags are independent; an unset flag is omitted from the JSON form and an
/// absent flag reads back as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub strikethrough: bool,
}

/// A hyperlink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub children: Vec<Inline>,
}

fn default_heading_level() -> u8 {
    1
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl Document {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn blocks(&self) -> &[Block] {
        &self.0
    }

    pub fn push(&mut self, block: Block) {
        self.0.push(block);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.0.iter()
    }

    /// Check whether every block is blank
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|b| b.is_blank())
    }

    /// Text content of the document, one line per block (and per list item).
    pub fn plain_text(&self) -> String {
        let mut lines = Vec::new();
        for block in &self.0 {
            match block {
                Block::Paragraph { children }
                | Block::Heading { children, .. }
                | Block::Quote { children } => lines.push(inlines_text(children)),
                Block::List { children, .. } => {
                    lines.extend(children.iter().map(|item| inlines_text(&item.children)))
                }
                Block::Unsupported => {}
            }
        }
        lines.join("\n")
    }

    /// Parse a document from its JSON array form
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the document to its JSON array form
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<Vec<Block>> for Document {
    fn from(blocks: Vec<Block>) -> Self {
        Self(blocks)
    }
}

impl FromIterator<Block> for Document {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Document {
    type Item = Block;
    type IntoIter = std::vec::IntoIter<Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Block {
    pub fn paragraph(children: Vec<Inline>) -> Self {
        Block::Paragraph { children }
    }

    pub fn heading(level: u8, children: Vec<Inline>) -> Self {
        Block::Heading { level, children }
    }

    pub fn list(format: ListFormat, items: Vec<ListItem>) -> Self {
        Block::List {
            format,
            children: items,
        }
    }

    pub fn quote(children: Vec<Inline>) -> Self {
        Block::Quote { children }
    }

    /// A paragraph holding a single empty text run
    pub fn empty_paragraph() -> Self {
        Block::Paragraph {
            children: vec![Inline::empty()],
        }
    }

    /// Check if this block is empty/blank
    pub fn is_blank(&self) -> bool {
        match self {
            Block::Paragraph { children }
            | Block::Heading { children, .. }
            | Block::Quote { children } => children.iter().all(|i| i.is_blank()),
            Block::List { children, .. } => children.iter().all(|i| i.is_blank()),
            Block::Unsupported => true,
        }
    }
}

impl ListItem {
    pub fn new(children: Vec<Inline>) -> Self {
        Self { children }
    }

    pub fn is_blank(&self) -> bool {
        self.children.iter().all(|i| i.is_blank())
    }
}

impl Inline {
    /// Plain text run without formatting
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text(Text::new(text))
    }

    /// Link around a single plain text run
    pub fn link(url: impl Into<String>, text: impl Into<String>) -> Self {
        Inline::Link(Link {
            url: url.into(),
            children: vec![Inline::text(text)],
        })
    }

    /// The `{"type": "text", "text": ""}` placeholder used for empty blocks
    pub fn empty() -> Self {
        Inline::Text(Text::default())
    }

    /// Check if this inline is empty/blank
    pub fn is_blank(&self) -> bool {
        match self {
            Inline::Text(text) => text.text.trim().is_empty(),
            Inline::Link(link) => link.children.iter().all(|i| i.is_blank()),
            Inline::Unsupported => true,
        }
    }

    /// Text content of this inline
    pub fn plain_text(&self) -> String {
        match self {
            Inline::Text(text) => text.text.clone(),
            Inline::Link(link) => inlines_text(&link.children),
            Inline::Unsupported => String::new(),
        }
    }
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn strikethrough(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    /// Check whether any formatting flag is set
    pub fn has_marks(&self) -> bool {
        self.bold || self.italic || self.underline || self.strikethrough
    }
}

impl From<Text> for Inline {
    fn from(text: Text) -> Self {
        Inline::Text(text)
    }
}

impl From<Link> for Inline {
    fn from(link: Link) -> Self {
        Inline::Link(link)
    }
}

/// Concatenated text content of a run of inlines
pub fn inlines_text(inlines: &[Inline]) -> String {
    inlines.iter().map(|i| i.plain_text()).collect()
}
