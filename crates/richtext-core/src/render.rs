//! Document to HTML rendering
//!
//! Produces the static HTML used for read-only display and for seeding the
//! editing surface. One fragment is written per top-level block, in order.

use crate::ast::{Block, Inline, Link, ListFormat, ListItem, Text};
use crate::options::HtmlOptions;

/// Render a sequence of blocks to an HTML string
pub fn render_html(blocks: &[Block], options: &HtmlOptions) -> String {
    let mut output = String::with_capacity(blocks.len() * 64);

    for (index, block) in blocks.iter().enumerate() {
        render_block(block, options, &mut output);

        if let Block::List { .. } = block {
            if options.separate_lists && needs_separator(blocks.get(index + 1)) {
                output.push_str("<p></p>");
            }
        }
    }

    output
}

/// Render a run of inlines to an HTML string
pub fn render_inlines_html(inlines: &[Inline], options: &HtmlOptions) -> String {
    let mut output = String::new();
    render_inlines(inlines, options, &mut output);
    output
}

/// A list followed by anything other than a list or a paragraph needs an
/// empty paragraph after it.
fn needs_separator(next: Option<&Block>) -> bool {
    match next {
        None => false,
        Some(Block::List { .. }) | Some(Block::Paragraph { .. }) => false,
        Some(_) => true,
    }
}

fn render_block(block: &Block, options: &HtmlOptions, out: &mut String) {
    match block {
        Block::Paragraph { children } => {
            out.push_str("<p>");
            render_inlines(children, options, out);
            out.push_str("</p>");
        }

        Block::Heading { level, children } => {
            let level = (*level).clamp(1, 6);
            out.push_str("<h");
            out.push_str(&level.to_string());
            out.push('>');
            render_inlines(children, options, out);
            out.push_str("</h");
            out.push_str(&level.to_string());
            out.push('>');
        }

        Block::List { format, children } => render_list(*format, children, options, out),

        Block::Quote { children } => {
            if children.iter().all(|i| i.is_blank()) {
                log::debug!("skipping quote without content");
                return;
            }
            out.push_str("<blockquote><p>");
            render_inlines(children, options, out);
            out.push_str("</p></blockquote>");
        }

        Block::Unsupported => log::debug!("skipping unsupported block"),
    }
}

fn render_list(format: ListFormat, items: &[ListItem], options: &HtmlOptions, out: &mut String) {
    let tag = match format {
        ListFormat::Ordered => "ol",
        ListFormat::Unordered => "ul",
    };

    out.push('<');
    out.push_str(tag);
    out.push('>');
    for item in items {
        out.push_str("<li><p>");
        render_inlines(&item.children, options, out);
        out.push_str("</p></li>");
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn render_inlines(inlines: &[Inline], options: &HtmlOptions, out: &mut String) {
    for inline in inlines {
        render_inline(inline, options, out);
    }
}

fn render_inline(inline: &Inline, options: &HtmlOptions, out: &mut String) {
    match inline {
        Inline::Text(text) => render_text(text, options, out),
        Inline::Link(link) => render_link(link, options, out),
        Inline::Unsupported => {}
    }
}

fn render_text(text: &Text, options: &HtmlOptions, out: &mut String) {
    // Outermost first; closed in reverse.
    let tags: Vec<&str> = [
        (text.bold, "strong"),
        (text.italic, "em"),
        (text.underline, "u"),
        (text.strikethrough, "s"),
    ]
    .into_iter()
    .filter_map(|(on, tag)| on.then_some(tag))
    .collect();

    for tag in &tags {
        out.push('<');
        out.push_str(tag);
        out.push('>');
    }
    push_text(&text.text, options, out);
    for tag in tags.iter().rev() {
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}

fn render_link(link: &Link, options: &HtmlOptions, out: &mut String) {
    if link.url.is_empty() {
        log::debug!("skipping link without url");
        return;
    }
    if !options.allows_url(&link.url) {
        log::warn!("link scheme not allowed, writing text only: {}", link.url);
        render_inlines(&link.children, options, out);
        return;
    }

    out.push_str("<a");
    push_attr("target", &options.link_target, options, out);
    push_attr("rel", &options.link_rel, options, out);
    if let Some(class) = &options.link_class {
        push_attr("class", class, options, out);
    }
    push_attr("href", &link.url, options, out);
    out.push('>');
    render_inlines(&link.children, options, out);
    out.push_str("</a>");
}

fn push_text(text: &str, options: &HtmlOptions, out: &mut String) {
    if options.escape_text {
        out.push_str(&html_escape::encode_text(text));
    } else {
        out.push_str(text);
    }
}

fn push_attr(name: &str, value: &str, options: &HtmlOptions, out: &mut String) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    if options.escape_text {
        out.push_str(&html_escape::encode_double_quoted_attribute(value));
    } else {
        out.push_str(value);
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Document;

    fn render(blocks: Vec<Block>) -> String {
        render_html(&blocks, &HtmlOptions::default())
    }

    fn list(format: ListFormat, items: &[&str]) -> Block {
        Block::list(
            format,
            items
                .iter()
                .map(|s| ListItem::new(vec![Inline::text(*s)]))
                .collect(),
        )
    }

    #[test]
    fn test_paragraph() {
        let result = render(vec![Block::paragraph(vec![Inline::text("Hello")])]);
        assert_eq!(result, "<p>Hello</p>");
    }

    #[test]
    fn test_empty_paragraph() {
        let result = render(vec![Block::empty_paragraph()]);
        assert_eq!(result, "<p></p>");
    }

    #[test]
    fn test_heading() {
        let result = render(vec![Block::heading(3, vec![Inline::text("Section")])]);
        assert_eq!(result, "<h3>Section</h3>");
    }

    #[test]
    fn test_heading_level_is_clamped() {
        let result = render(vec![
            Block::heading(0, vec![Inline::text("a")]),
            Block::heading(9, vec![Inline::text("b")]),
        ]);
        assert_eq!(result, "<h1>a</h1><h6>b</h6>");
    }

    #[test]
    fn test_mark_nesting_order() {
        let text = Text::new("X").strikethrough().underline().italic().bold();
        let result = render(vec![Block::paragraph(vec![text.into()])]);
        insta::assert_snapshot!(result, @"<p><strong><em><u><s>X</s></u></em></strong></p>");
    }

    #[test]
    fn test_bold_italic() {
        let result = render_inlines_html(
            &[Text::new("X").bold().italic().into()],
            &HtmlOptions::default(),
        );
        assert_eq!(result, "<strong><em>X</em></strong>");
    }

    #[test]
    fn test_link() {
        let result = render_inlines_html(
            &[Inline::link("https://example.com", "click")],
            &HtmlOptions::default(),
        );
        assert_eq!(
            result,
            r#"<a target="_self" rel="noopener noreferrer nofollow" href="https://example.com">click</a>"#
        );
    }

    #[test]
    fn test_link_class_option() {
        let options = HtmlOptions::default().with_link_class("article-link");
        let result = render_inlines_html(&[Inline::link("/a", "a")], &options);
        assert_eq!(
            result,
            r#"<a target="_self" rel="noopener noreferrer nofollow" class="article-link" href="/a">a</a>"#
        );
    }

    #[test]
    fn test_link_without_url_renders_nothing() {
        let result = render_inlines_html(&[Inline::link("", "orphan")], &HtmlOptions::default());
        assert_eq!(result, "");
    }

    #[test]
    fn test_link_with_disallowed_scheme_renders_text() {
        let result = render_inlines_html(
            &[Inline::Link(Link {
                url: "javascript:alert(1)".to_string(),
                children: vec![Text::new("klik").bold().into()],
            })],
            &HtmlOptions::default(),
        );
        assert_eq!(result, "<strong>klik</strong>");
    }

    #[test]
    fn test_relative_link_is_kept() {
        let result = render_inlines_html(&[Inline::link("/bacaan/4", "baca")], &HtmlOptions::default());
        assert!(result.contains(r#"href="/bacaan/4""#));
    }

    #[test]
    fn test_lists() {
        let result = render(vec![
            list(ListFormat::Unordered, &["a", "b"]),
            list(ListFormat::Ordered, &["c"]),
        ]);
        insta::assert_snapshot!(
            result,
            @"<ul><li><p>a</p></li><li><p>b</p></li></ul><ol><li><p>c</p></li></ol>"
        );
    }

    #[test]
    fn test_separator_before_heading() {
        let result = render(vec![
            list(ListFormat::Unordered, &["a"]),
            Block::heading(2, vec![Inline::text("Next")]),
        ]);
        assert_eq!(result, "<ul><li><p>a</p></li></ul><p></p><h2>Next</h2>");
    }

    #[test]
    fn test_separator_before_quote() {
        let result = render(vec![
            list(ListFormat::Ordered, &["a"]),
            Block::quote(vec![Inline::text("q")]),
        ]);
        assert_eq!(
            result,
            "<ol><li><p>a</p></li></ol><p></p><blockquote><p>q</p></blockquote>"
        );
    }

    #[test]
    fn test_no_separator_before_paragraph_or_end() {
        let result = render(vec![
            list(ListFormat::Unordered, &["a"]),
            Block::paragraph(vec![Inline::text("p")]),
            list(ListFormat::Unordered, &["b"]),
        ]);
        assert_eq!(
            result,
            "<ul><li><p>a</p></li></ul><p>p</p><ul><li><p>b</p></li></ul>"
        );
    }

    #[test]
    fn test_separator_can_be_disabled() {
        let options = HtmlOptions::default().with_separate_lists(false);
        let blocks = vec![
            list(ListFormat::Unordered, &["a"]),
            Block::heading(1, vec![Inline::text("h")]),
        ];
        assert_eq!(
            render_html(&blocks, &options),
            "<ul><li><p>a</p></li></ul><h1>h</h1>"
        );
    }

    #[test]
    fn test_quote() {
        let result = render(vec![Block::quote(vec![Inline::text("Quote")])]);
        assert_eq!(result, "<blockquote><p>Quote</p></blockquote>");
    }

    #[test]
    fn test_empty_quote_is_omitted() {
        let result = render(vec![
            Block::quote(vec![]),
            Block::paragraph(vec![Inline::text("after")]),
        ]);
        assert_eq!(result, "<p>after</p>");
    }

    #[test]
    fn test_text_is_escaped() {
        let result = render(vec![Block::paragraph(vec![Inline::text(
            "<script>alert(1)</script> & co",
        )])]);
        assert_eq!(
            result,
            "<p>&lt;script&gt;alert(1)&lt;/script&gt; &amp; co</p>"
        );
    }

    #[test]
    fn test_href_is_escaped() {
        let result = render_inlines_html(
            &[Inline::link(r#"https://x.test/?a=1&b="2""#, "x")],
            &HtmlOptions::default(),
        );
        assert!(result.contains(r#"href="https://x.test/?a=1&amp;b=&quot;2&quot;""#));
    }

    #[test]
    fn test_raw_text_when_escaping_disabled() {
        let options = HtmlOptions::default().with_escape_text(false);
        let blocks = vec![Block::paragraph(vec![Inline::text("<b>raw</b>")])];
        assert_eq!(render_html(&blocks, &options), "<p><b>raw</b></p>");
    }

    #[test]
    fn test_unsupported_nodes_render_nothing() {
        let doc = Document::from(vec![
            Block::Unsupported,
            Block::paragraph(vec![Inline::Unsupported, Inline::text("ok")]),
        ]);
        assert_eq!(render_html(doc.blocks(), &HtmlOptions::default()), "<p>ok</p>");
    }
}
