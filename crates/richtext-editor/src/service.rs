//! RichTextService - the main entry point for editor content conversion.

use richtext_core::{Document, HtmlOptions};
use serde_json::Value;

use crate::convert::{convert, convert_root};
use crate::node::{EditorNode, NodeKind};
use crate::options::ConvertOptions;
use crate::{EditorError, Result};

/// The main service for converting between editor trees, documents and HTML
#[derive(Debug, Clone, Default)]
pub struct RichTextService {
    options: ConvertOptions,
    html_options: HtmlOptions,
}

impl RichTextService {
    /// Create a new RichTextService with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a RichTextService with custom options
    pub fn with_options(options: ConvertOptions, html_options: HtmlOptions) -> Self {
        Self {
            options,
            html_options,
        }
    }

    /// Convert editor block nodes to a portable document
    pub fn to_document(&self, nodes: &[EditorNode]) -> Document {
        convert(nodes, &self.options)
    }

    /// Convert an editor tree rooted at a `doc` node
    pub fn root_to_document(&self, root: &EditorNode) -> Document {
        convert_root(root, &self.options)
    }

    /// Render a document to HTML
    pub fn to_html(&self, document: &Document) -> String {
        document.to_html(&self.html_options)
    }

    /// Convert editor block nodes straight to HTML
    pub fn tree_to_html(&self, nodes: &[EditorNode]) -> String {
        self.to_html(&self.to_document(nodes))
    }

    /// Parse the editor's JSON output.
    ///
    /// Accepts either a `{"type": "doc", "content": [...]}` root or a bare
    /// array of block nodes.
    pub fn tree_from_json(&self, json: &str) -> Result<Vec<EditorNode>> {
        let value: Value = serde_json::from_str(json)?;

        match value {
            Value::Array(_) => Ok(serde_json::from_value(value)?),
            Value::Object(_) => {
                let root: EditorNode = serde_json::from_value(value)?;
                if root.kind() == NodeKind::Doc {
                    Ok(root.content.unwrap_or_default())
                } else {
                    Ok(vec![root])
                }
            }
            other => Err(EditorError::InvalidInput(format!(
                "expected an editor node or an array of nodes, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Parse a stored document from JSON
    pub fn document_from_json(&self, json: &str) -> Result<Document> {
        Ok(Document::from_json(json)?)
    }

    /// Parse HTML into editor block nodes, as the editing surface would
    #[cfg(feature = "html")]
    pub fn tree_from_html(&self, html: &str) -> Vec<EditorNode> {
        crate::html::parse_html(html)
    }

    /// Get the conversion options
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Get mutable access to conversion options
    pub fn options_mut(&mut self) -> &mut ConvertOptions {
        &mut self.options
    }

    /// Get the HTML rendering options
    pub fn html_options(&self) -> &HtmlOptions {
        &self.html_options
    }

    /// Get mutable access to HTML rendering options
    pub fn html_options_mut(&mut self) -> &mut HtmlOptions {
        &mut self.html_options
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use richtext_core::{Block, Inline};

    const EDITOR_JSON: &str = r#"{
        "type": "doc",
        "content": [
            {"type": "heading", "attrs": {"level": 2, "textAlign": "left"}, "content": [
                {"type": "text", "text": "Pengumuman"}
            ]},
            {"type": "paragraph", "content": [
                {"type": "text", "text": "Baca "},
                {"type": "text", "text": "di sini", "marks": [
                    {"type": "link", "attrs": {"href": "https://example.com", "target": "_blank"}}
                ]}
            ]},
            {"type": "paragraph"}
        ]
    }"#;

    #[test]
    fn test_tree_from_doc_json() {
        let service = RichTextService::new();
        let nodes = service.tree_from_json(EDITOR_JSON).unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].kind(), NodeKind::Heading);
    }

    #[test]
    fn test_tree_from_array_json() {
        let service = RichTextService::new();
        let nodes = service
            .tree_from_json(r#"[{"type":"paragraph","content":[{"type":"text","text":"a"}]}]"#)
            .unwrap();
        assert_eq!(nodes, vec![EditorNode::paragraph(vec![EditorNode::text("a")])]);
    }

    #[test]
    fn test_tree_from_invalid_json() {
        let service = RichTextService::new();
        assert!(matches!(
            service.tree_from_json("42"),
            Err(EditorError::InvalidInput(_))
        ));
        assert!(matches!(
            service.tree_from_json("{not json"),
            Err(EditorError::Json(_))
        ));
    }

    #[test]
    fn test_editor_json_to_html() {
        let service = RichTextService::new();
        let nodes = service.tree_from_json(EDITOR_JSON).unwrap();
        let html = service.tree_to_html(&nodes);
        assert_eq!(
            html,
            concat!(
                "<h2>Pengumuman</h2>",
                "<p>Baca <a target=\"_self\" rel=\"noopener noreferrer nofollow\" ",
                "href=\"https://example.com\">di sini</a></p>",
                "<p></p>"
            )
        );
    }

    #[test]
    fn test_list_then_heading_html() {
        let service = RichTextService::new();
        let nodes = service
            .tree_from_json(
                r#"[
                    {"type": "orderedList", "attrs": {"start": 1}, "content": [
                        {"type": "listItem", "content": [
                            {"type": "paragraph", "content": [
                                {"type": "text", "text": "Lapor", "marks": [{"type": "bold"}]}
                            ]}
                        ]}
                    ]},
                    {"type": "heading", "attrs": {"level": 3}, "content": [
                        {"type": "text", "text": "Tindak lanjut"}
                    ]}
                ]"#,
            )
            .unwrap();
        insta::assert_snapshot!(
            service.tree_to_html(&nodes),
            @"<ol><li><p><strong>Lapor</strong></p></li></ol><p></p><h3>Tindak lanjut</h3>"
        );
    }

    #[test]
    fn test_document_from_json() {
        let service = RichTextService::new();
        let doc = service
            .document_from_json(r#"[{"type":"paragraph","children":[{"type":"text","text":"x"}]}]"#)
            .unwrap();
        assert_eq!(doc.blocks(), &[Block::paragraph(vec![Inline::text("x")])]);
        assert!(matches!(
            service.document_from_json("{}"),
            Err(EditorError::Document(_))
        ));
    }

    #[test]
    fn test_options_are_applied() {
        let mut service = RichTextService::new();
        service.html_options_mut().link_target = "_blank".to_string();
        let html = service.to_html(&Document::from(vec![Block::paragraph(vec![Inline::link(
            "/a", "a",
        )])]));
        assert!(html.contains(r#"target="_blank""#));
    }
}
