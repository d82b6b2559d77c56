//! HTML parsing support.
//!
//! Parses HTML strings with scraper (html5ever) and converts the result to
//! the [`Node`] tree the serializer works on.

use scraper::{ElementRef, Html, Node as ScraperNode};
use tracing::debug;
use visible_text_dom::{Document, Node, NodeKind, Page, Result, SerializerOptions};

/// Parse an HTML document into a Node tree rooted at `<html>`.
///
/// # Example
///
/// ```rust
/// use visible_text::parse_html;
///
/// let node = parse_html("<p>Hello <em>World</em></p>");
/// assert_eq!(node.tag_name(), "html");
/// ```
pub fn parse_html(html: &str) -> Node {
    let document = Html::parse_document(html);
    scraper_to_node(document.root_element())
}

/// Convert a scraper tree to our Node structure.
///
/// Runs without recursion so deeply nested markup reaches the
/// serializer's depth check instead of overflowing the stack.
fn scraper_to_node(root: ElementRef) -> Node {
    // Pre-order list of converted nodes with their parent's index.
    let mut entries: Vec<(Node, Option<usize>)> = Vec::new();
    let mut stack = vec![(*root, None)];
    while let Some((handle, parent)) = stack.pop() {
        let node = match handle.value() {
            ScraperNode::Element(element) => {
                let attrs: Vec<(&str, &str)> = element.attrs().collect();
                if attrs.is_empty() {
                    Node::element(element.name())
                } else {
                    Node::element_with_attrs(element.name(), attrs)
                }
            }
            ScraperNode::Text(text) => Node::text(&text.text),
            ScraperNode::Comment(comment) => Node::comment(&comment.comment),
            _ => continue,
        };
        let index = entries.len();
        entries.push((node, parent));
        if handle.value().is_element() {
            stack.extend(handle.children().rev().map(|child| (child, Some(index))));
        }
    }

    // Children always come after their parent, so popping attaches them
    // before the parent itself is moved.
    let mut pending: Vec<Vec<Node>> = (0..entries.len()).map(|_| Vec::new()).collect();
    let mut converted = None;
    while let Some((mut node, parent)) = entries.pop() {
        let mut children = std::mem::take(&mut pending[entries.len()]);
        children.reverse();
        for child in children {
            node.add_child(child);
        }
        match parent {
            Some(parent) => pending[parent].push(node),
            None => converted = Some(node),
        }
    }
    converted.unwrap_or_else(|| Node::element("html"))
}

/// Parse `html` into a [`Page`] with default options.
///
/// Inline frames with a `srcdoc` attribute get that markup attached as
/// their embedded page.
pub fn page_from_html(html: &str) -> Page {
    page_from_html_with_options(html, SerializerOptions::default())
}

pub fn page_from_html_with_options(html: &str, options: SerializerOptions) -> Page {
    let document = Document::from_node(&parse_html(html));
    let frames: Vec<_> = document
        .nodes()
        .filter(|node| node.kind() == NodeKind::InlineFrame)
        .filter_map(|frame| Some((frame.id(), frame.attr("srcdoc")?.to_string())))
        .collect();

    let mut page = Page::with_options(document, options.clone());
    for (frame, srcdoc) in frames {
        debug!(%frame, len = srcdoc.len(), "parsing srcdoc frame");
        page.set_frame_content(frame, page_from_html_with_options(&srcdoc, options.clone()));
    }
    page
}

/// Visible text of an HTML document.
pub fn visible_text_html(html: &str) -> Result<String> {
    page_from_html(html).visible_text()
}
