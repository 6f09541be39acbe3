//! Convert an editing-surface tree to a portable document
//!
//! This module maps the editor's block nodes onto the document model defined
//! in richtext-core. The mapping is total: nodes it cannot use are skipped
//! rather than reported, so a half-typed editor state never fails to convert.

use richtext_core::{Block, Document, Inline, Link, ListFormat, ListItem, Text};

use crate::node::{EditorNode, MarkKind, NodeKind};
use crate::options::ConvertOptions;

/// Convert a sequence of editor block nodes to a document
pub fn convert(nodes: &[EditorNode], options: &ConvertOptions) -> Document {
    nodes
        .iter()
        .filter_map(|node| convert_block(node, options))
        .collect()
}

/// Convert an editor tree, unwrapping a `doc` root if one is given
pub fn convert_root(root: &EditorNode, options: &ConvertOptions) -> Document {
    match root.kind() {
        NodeKind::Doc => convert(root.content(), options),
        _ => convert(std::slice::from_ref(root), options),
    }
}

/// Convert a single block node. `None` means the node produces no output.
fn convert_block(node: &EditorNode, options: &ConvertOptions) -> Option<Block> {
    match node.kind() {
        NodeKind::Paragraph => Some(Block::paragraph(non_empty(convert_inlines(
            node.content(),
            options,
        )))),

        NodeKind::Heading => Some(Block::heading(
            heading_level(node),
            non_empty(convert_inlines(node.content(), options)),
        )),

        NodeKind::BulletList => convert_list(node, ListFormat::Unordered, options),

        NodeKind::OrderedList => convert_list(node, ListFormat::Ordered, options),

        NodeKind::Blockquote => {
            let children = convert_inlines(first_child_content(node), options);
            if children.iter().all(Inline::is_blank) {
                log::debug!("dropping blockquote without content");
                None
            } else {
                Some(Block::quote(children))
            }
        }

        _ => {
            log::debug!("skipping unsupported block node `{}`", node.node_type);
            None
        }
    }
}

fn convert_list(node: &EditorNode, format: ListFormat, options: &ConvertOptions) -> Option<Block> {
    let items: Vec<ListItem> = node
        .children()
        .filter_map(|item| {
            let children = convert_inlines(first_child_content(item), options);
            if children.is_empty() {
                None
            } else {
                Some(ListItem::new(children))
            }
        })
        .collect();

    if items.is_empty() {
        log::debug!("dropping `{}` without items", node.node_type);
        None
    } else {
        Some(Block::list(format, items))
    }
}

/// The editing surface wraps list-item and quote text in an inner paragraph;
/// only that first wrapper is read.
fn first_child_content(node: &EditorNode) -> &[EditorNode] {
    node.children().next().map(EditorNode::content).unwrap_or(&[])
}

fn heading_level(node: &EditorNode) -> u8 {
    match node.level() {
        None | Some(0) => 1,
        Some(level @ 1..=6) => level as u8,
        Some(level) => {
            log::warn!("heading level {level} out of range, clamping to 6");
            6
        }
    }
}

/// Substitute a single empty text run for an empty child list
fn non_empty(children: Vec<Inline>) -> Vec<Inline> {
    if children.is_empty() {
        vec![Inline::empty()]
    } else {
        children
    }
}

/// Convert the inline runs of a block node
pub fn convert_inlines(runs: &[EditorNode], options: &ConvertOptions) -> Vec<Inline> {
    runs.iter()
        .filter(|run| has_visible_text(run) || run.has_mark(MarkKind::Link))
        .filter_map(|run| convert_run(run, options))
        .collect()
}

fn has_visible_text(run: &EditorNode) -> bool {
    run.text.as_deref().is_some_and(|t| !t.trim().is_empty())
}

fn convert_run(run: &EditorNode, options: &ConvertOptions) -> Option<Inline> {
    let text = run.text.as_deref().unwrap_or("");

    if let Some(link) = run.mark(MarkKind::Link) {
        if text.is_empty() {
            log::debug!("dropping link without text");
            return None;
        }

        let href = link.href().unwrap_or("");
        if href.is_empty() {
            log::debug!("link mark without href, keeping text only");
            return Some(Inline::Text(text_with_flags(run, text)));
        }

        let inner = if options.link_marks {
            text_with_flags(run, text)
        } else {
            Text::new(text)
        };

        return Some(Inline::Link(Link {
            url: href.to_string(),
            children: vec![Inline::Text(inner)],
        }));
    }

    Some(Inline::Text(text_with_flags(run, text)))
}

fn text_with_flags(run: &EditorNode, text: &str) -> Text {
    let mut result = Text::new(text);

    for mark in run.marks() {
        match mark.kind() {
            MarkKind::Bold => result.bold = true,
            MarkKind::Italic => result.italic = true,
            MarkKind::Strike => result.strikethrough = true,
            MarkKind::Underline => result.underline = true,
            MarkKind::Link => {}
            MarkKind::Other => log::trace!("ignoring mark `{}`", mark.mark_type),
        }
    }

    result
}
