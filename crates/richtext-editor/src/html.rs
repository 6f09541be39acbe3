//! HTML parsing support.
//!
//! This module turns an HTML fragment into the editing-surface tree, the way
//! the editor's own initializer does when it is handed rendered content. It
//! lets stored documents be re-seeded and round-tripped without a browser.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::{EditorNode, Mark, NodeKind};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\r\n\x0C]+").unwrap());
static HEADING_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^h([1-6])$").unwrap());

/// Parse an HTML fragment into editor block nodes.
///
/// # Example
///
/// ```rust
/// use richtext_editor::{parse_html, NodeKind};
///
/// let nodes = parse_html("<h2>Hello <em>World</em></h2>");
/// assert_eq!(nodes[0].kind(), NodeKind::Heading);
/// assert_eq!(nodes[0].text_content(), "Hello World");
/// ```
pub fn parse_html(html: &str) -> Vec<EditorNode> {
    let fragment = Html::parse_fragment(html);
    parse_blocks(fragment.root_element())
}

/// Marks active at a point of the inline walk
#[derive(Debug, Clone, Default)]
struct ActiveMarks {
    bold: bool,
    italic: bool,
    underline: bool,
    strike: bool,
    link: Option<String>,
}

impl ActiveMarks {
    fn to_marks(&self) -> Vec<Mark> {
        let mut marks = Vec::new();
        if self.bold {
            marks.push(Mark::bold());
        }
        if self.italic {
            marks.push(Mark::italic());
        }
        if self.underline {
            marks.push(Mark::underline());
        }
        if self.strike {
            marks.push(Mark::strike());
        }
        if let Some(href) = &self.link {
            marks.push(Mark::link(href));
        }
        marks
    }
}

/// Parse the children of a block container (fragment root, list item, quote)
fn parse_blocks(element: ElementRef) -> Vec<EditorNode> {
    let mut blocks = Vec::new();
    let mut pending = Vec::new();

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                push_text(&text.text, &ActiveMarks::default(), &mut pending);
            }
            ScraperNode::Element(_) => {
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };
                if is_block(child_element.value().name()) {
                    flush_paragraph(&mut pending, &mut blocks);
                    blocks.extend(parse_block(child_element));
                } else {
                    collect_inline(child_element, &ActiveMarks::default(), &mut pending);
                }
            }
            _ => {}
        }
    }

    flush_paragraph(&mut pending, &mut blocks);
    blocks
}

/// Wrap loose inline runs in a paragraph, unless they are only whitespace
fn flush_paragraph(pending: &mut Vec<EditorNode>, blocks: &mut Vec<EditorNode>) {
    let runs = finish_runs(std::mem::take(pending));
    if !runs.is_empty() {
        blocks.push(EditorNode::paragraph(runs));
    }
}

fn parse_block(element: ElementRef) -> Vec<EditorNode> {
    let tag = element.value().name();

    if let Some(caps) = HEADING_TAG.captures(tag) {
        let level = caps[1].parse().unwrap_or(1);
        return vec![EditorNode::heading(level, inline_runs(element))];
    }

    match tag {
        "p" => vec![EditorNode::paragraph(inline_runs(element))],

        "ul" => vec![EditorNode::bullet_list(list_items(element))],

        "ol" => vec![EditorNode::ordered_list(list_items(element))],

        "blockquote" => {
            let mut content = parse_blocks(element);
            if content.is_empty() {
                content.push(EditorNode::paragraph(Vec::new()));
            }
            vec![EditorNode::blockquote(content)]
        }

        // Containers and stray items contribute their blocks directly
        _ => parse_blocks(element),
    }
}

fn list_items(list: ElementRef) -> Vec<EditorNode> {
    list.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "li")
        .map(|li| {
            let mut content = parse_blocks(li);
            if content.first().map(EditorNode::kind) != Some(NodeKind::Paragraph) {
                content.insert(0, EditorNode::paragraph(Vec::new()));
            }
            EditorNode::list_item(content)
        })
        .collect()
}

/// Inline runs of a textblock element
fn inline_runs(element: ElementRef) -> Vec<EditorNode> {
    let mut runs = Vec::new();
    collect_children(element, &ActiveMarks::default(), &mut runs);
    finish_runs(runs)
}

fn collect_children(element: ElementRef, marks: &ActiveMarks, out: &mut Vec<EditorNode>) {
    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => push_text(&text.text, marks, out),
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_inline(child_element, marks, out);
                }
            }
            _ => {}
        }
    }
}

fn collect_inline(element: ElementRef, marks: &ActiveMarks, out: &mut Vec<EditorNode>) {
    let mut marks = marks.clone();

    match element.value().name() {
        "strong" | "b" => marks.bold = true,
        "em" | "i" => marks.italic = true,
        "u" => marks.underline = true,
        "s" | "strike" | "del" => marks.strike = true,
        "a" => {
            if let Some(href) = element.value().attr("href") {
                marks.link = Some(href.to_string());
            }
        }
        "br" => {
            out.push(EditorNode::hard_break());
            return;
        }
        "script" | "style" | "template" => return,
        _ => {}
    }

    collect_children(element, &marks, out);
}

fn push_text(text: &str, marks: &ActiveMarks, out: &mut Vec<EditorNode>) {
    let collapsed = WHITESPACE.replace_all(text, " ");
    if !collapsed.is_empty() {
        out.push(EditorNode::marked_text(&collapsed, marks.to_marks()));
    }
}

/// Strip spaces at textblock edges and after a run that already ends in a
/// space, dropping runs left empty.
fn finish_runs(runs: Vec<EditorNode>) -> Vec<EditorNode> {
    let mut result: Vec<EditorNode> = Vec::with_capacity(runs.len());
    let mut at_space = true;

    for mut run in runs {
        if let Some(text) = run.text.as_mut() {
            if at_space && text.starts_with(' ') {
                text.remove(0);
            }
            if text.is_empty() {
                continue;
            }
            at_space = text.ends_with(' ');
        } else {
            at_space = true;
        }
        result.push(run);
    }

    let trailing_emptied = match result.last_mut().and_then(|last| last.text.as_mut()) {
        Some(text) => {
            if text.ends_with(' ') {
                text.pop();
            }
            text.is_empty()
        }
        None => false,
    };
    if trailing_emptied {
        result.pop();
    }

    result
}

/// Elements that open a new block in the editor
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "center", "dd", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "ul",
];

fn is_block(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag)
}
