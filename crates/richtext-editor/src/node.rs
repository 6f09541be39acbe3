//! Editing-surface tree structure.
//!
//! This module mirrors the JSON tree a ProseMirror/tiptap editor emits from
//! `getJSON()`: every node has a `type` string, optional `attrs`, optional
//! `content` children, and text nodes carry `text` plus a list of `marks`.
//! Any editing surface that can produce this shape can feed the converter.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Node types the converter understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Doc,
    Paragraph,
    Heading,
    BulletList,
    OrderedList,
    ListItem,
    Blockquote,
    Text,
    HardBreak,
    /// Any type not listed above
    Other,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Doc => "doc",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading => "heading",
            NodeKind::BulletList => "bulletList",
            NodeKind::OrderedList => "orderedList",
            NodeKind::ListItem => "listItem",
            NodeKind::Blockquote => "blockquote",
            NodeKind::Text => "text",
            NodeKind::HardBreak => "hardBreak",
            NodeKind::Other => "other",
        }
    }
}

impl From<&str> for NodeKind {
    fn from(value: &str) -> Self {
        match value {
            "doc" => NodeKind::Doc,
            "paragraph" => NodeKind::Paragraph,
            "heading" => NodeKind::Heading,
            "bulletList" => NodeKind::BulletList,
            "orderedList" => NodeKind::OrderedList,
            "listItem" => NodeKind::ListItem,
            "blockquote" => NodeKind::Blockquote,
            "text" => NodeKind::Text,
            "hardBreak" => NodeKind::HardBreak,
            _ => NodeKind::Other,
        }
    }
}

/// Mark types the converter understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    Bold,
    Italic,
    Strike,
    Underline,
    Link,
    Other,
}

impl MarkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkKind::Bold => "bold",
            MarkKind::Italic => "italic",
            MarkKind::Strike => "strike",
            MarkKind::Underline => "underline",
            MarkKind::Link => "link",
            MarkKind::Other => "other",
        }
    }
}

impl From<&str> for MarkKind {
    fn from(value: &str) -> Self {
        match value {
            "bold" => MarkKind::Bold,
            "italic" => MarkKind::Italic,
            "strike" => MarkKind::Strike,
            "underline" => MarkKind::Underline,
            "link" => MarkKind::Link,
            _ => MarkKind::Other,
        }
    }
}

/// A formatting annotation on a text node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    /// Mark type (`bold`, `italic`, `strike`, `underline`, `link`, ...)
    #[serde(rename = "type")]
    pub mark_type: String,

    /// Mark attributes (`href` for links)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<IndexMap<String, Value>>,
}

impl Mark {
    pub fn new(mark_type: &str) -> Self {
        Self {
            mark_type: mark_type.to_string(),
            attrs: None,
        }
    }

    pub fn bold() -> Self {
        Self::new("bold")
    }

    pub fn italic() -> Self {
        Self::new("italic")
    }

    pub fn strike() -> Self {
        Self::new("strike")
    }

    pub fn underline() -> Self {
        Self::new("underline")
    }

    /// Create a link mark pointing at `href`
    pub fn link(href: &str) -> Self {
        let mut attrs = IndexMap::new();
        attrs.insert("href".to_string(), Value::String(href.to_string()));
        Self {
            mark_type: "link".to_string(),
            attrs: Some(attrs),
        }
    }

    pub fn kind(&self) -> MarkKind {
        MarkKind::from(self.mark_type.as_str())
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attrs.as_ref()?.get(name)
    }

    /// The `href` of a link mark, if present and a string
    pub fn href(&self) -> Option<&str> {
        self.attr("href").and_then(Value::as_str)
    }
}

/// A node of the editing-surface tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorNode {
    /// Node type (`paragraph`, `heading`, `bulletList`, `text`, ...)
    #[serde(rename = "type")]
    pub node_type: String,

    /// Node attributes (`level` for headings)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<IndexMap<String, Value>>,

    /// Child nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<EditorNode>>,

    /// Text content for text nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Marks on text nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<Vec<Mark>>,
}

impl EditorNode {
    /// Create an empty node of the given type
    pub fn new(node_type: &str) -> Self {
        Self {
            node_type: node_type.to_string(),
            ..Default::default()
        }
    }

    /// Create a node of the given type holding `content`
    pub fn with_content(node_type: &str, content: Vec<EditorNode>) -> Self {
        Self {
            node_type: node_type.to_string(),
            content: Some(content),
            ..Default::default()
        }
    }

    pub fn doc(content: Vec<EditorNode>) -> Self {
        Self::with_content("doc", content)
    }

    pub fn paragraph(content: Vec<EditorNode>) -> Self {
        Self::with_content("paragraph", content)
    }

    pub fn heading(level: u8, content: Vec<EditorNode>) -> Self {
        let mut node = Self::with_content("heading", content);
        node.set_attr("level", Value::from(level));
        node
    }

    pub fn bullet_list(items: Vec<EditorNode>) -> Self {
        Self::with_content("bulletList", items)
    }

    pub fn ordered_list(items: Vec<EditorNode>) -> Self {
        let mut node = Self::with_content("orderedList", items);
        node.set_attr("start", Value::from(1));
        node
    }

    pub fn list_item(content: Vec<EditorNode>) -> Self {
        Self::with_content("listItem", content)
    }

    pub fn blockquote(content: Vec<EditorNode>) -> Self {
        Self::with_content("blockquote", content)
    }

    /// Create a text node
    pub fn text(content: &str) -> Self {
        Self {
            node_type: "text".to_string(),
            text: Some(content.to_string()),
            ..Default::default()
        }
    }

    /// Create a text node carrying marks
    pub fn marked_text(content: &str, marks: Vec<Mark>) -> Self {
        let mut node = Self::text(content);
        if !marks.is_empty() {
            node.marks = Some(marks);
        }
        node
    }

    pub fn hard_break() -> Self {
        Self::new("hardBreak")
    }

    pub fn kind(&self) -> NodeKind {
        NodeKind::from(self.node_type.as_str())
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        self.kind() == NodeKind::Text
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attrs.as_ref()?.get(name)
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: &str, value: Value) {
        self.attrs
            .get_or_insert_with(IndexMap::new)
            .insert(name.to_string(), value);
    }

    /// Heading level attribute, if present and numeric
    pub fn level(&self) -> Option<u64> {
        self.attr("level").and_then(Value::as_u64)
    }

    /// Get all child nodes
    pub fn children(&self) -> impl Iterator<Item = &EditorNode> {
        self.content.iter().flat_map(|c| c.iter())
    }

    /// Child nodes as a slice (empty when absent)
    pub fn content(&self) -> &[EditorNode] {
        self.content.as_deref().unwrap_or(&[])
    }

    /// Add a child node
    pub fn add_child(&mut self, child: EditorNode) {
        self.content.get_or_insert_with(Vec::new).push(child);
    }

    /// Add a mark to this node
    pub fn add_mark(&mut self, mark: Mark) {
        self.marks.get_or_insert_with(Vec::new).push(mark);
    }

    /// Get all marks
    pub fn marks(&self) -> impl Iterator<Item = &Mark> {
        self.marks.iter().flat_map(|m| m.iter())
    }

    /// Find the first mark of a kind
    pub fn mark(&self, kind: MarkKind) -> Option<&Mark> {
        self.marks().find(|m| m.kind() == kind)
    }

    /// Check if a mark of this kind is present
    pub fn has_mark(&self, kind: MarkKind) -> bool {
        self.mark(kind).is_some()
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        match self.kind() {
            NodeKind::Text => self.text.clone().unwrap_or_default(),
            _ => self.children().map(|child| child.text_content()).collect(),
        }
    }
}
