//! Resolved style snapshot consumed by the serializer.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::document::{Document, NodeId, NodeRef};

/// Source of resolved (post-cascade) style values.
///
/// Only `display` and `white-space` are queried. Implementations return
/// `None` when the property is not set for the element, so the
/// serializer can keep looking further up the tree.
pub trait StyleProvider {
    fn computed_value(&self, element: NodeRef<'_>, property: &str) -> Option<String>;
}

/// Block-level HTML elements
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "center", "dd", "dialog", "dir", "div",
    "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "frameset", "h1", "h2",
    "h3", "h4", "h5", "h6", "header", "hgroup", "hr", "html", "legend", "listing", "main",
    "menu", "nav", "ol", "optgroup", "p", "plaintext", "pre", "search", "section", "summary",
    "ul", "xmp",
];

/// Elements hidden by the user-agent sheet
pub const HIDDEN_ELEMENTS: &[&str] = &[
    "area", "base", "datalist", "head", "link", "meta", "noembed", "noframes", "param", "rp",
    "script", "style", "template", "title",
];

/// Elements whose white-space is preformatted by default
pub const PREFORMATTED_ELEMENTS: &[&str] = &["listing", "plaintext", "pre", "xmp"];

static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*([a-z-]+)\s*:\s*(.*?)\s*(?:!\s*important\s*)?$").unwrap()
});

/// Default `display` for a tag, if the user-agent sheet sets one
fn default_display(tag: &str) -> Option<&'static str> {
    match tag {
        "li" => Some("list-item"),
        "table" => Some("table"),
        "caption" => Some("table-caption"),
        "thead" => Some("table-header-group"),
        "tbody" => Some("table-row-group"),
        "tfoot" => Some("table-footer-group"),
        "tr" => Some("table-row"),
        "td" | "th" => Some("table-cell"),
        "col" => Some("table-column"),
        "colgroup" => Some("table-column-group"),
        "ruby" => Some("ruby"),
        "rt" => Some("ruby-text"),
        _ if HIDDEN_ELEMENTS.contains(&tag) => Some("none"),
        _ if BLOCK_ELEMENTS.contains(&tag) => Some("block"),
        _ => None,
    }
}

/// Default `white-space` for a tag, if the user-agent sheet sets one
fn default_white_space(tag: &str) -> Option<&'static str> {
    match tag {
        "nobr" => Some("nowrap"),
        _ if PREFORMATTED_ELEMENTS.contains(&tag) => Some("pre"),
        _ => None,
    }
}

/// Parse an inline `style` attribute into (property, value) pairs.
///
/// Property names are lowercased, `!important` is dropped and malformed
/// declarations are skipped.
pub fn parse_declarations(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter(|declaration| !declaration.trim().is_empty())
        .filter_map(|declaration| match DECLARATION.captures(declaration) {
            Some(caps) if !caps[2].is_empty() => {
                Some((caps[1].to_ascii_lowercase(), caps[2].to_string()))
            }
            _ => {
                trace!(declaration, "skipping malformed style declaration");
                None
            }
        })
        .collect()
}

/// Declared styles for every element of a [`Document`].
///
/// Values come from a small user-agent sheet, then the inline `style`
/// attribute, then explicit [`CascadedStyles::set_property`] calls; later
/// sources win. Properties are not inherited here: the serializer walks
/// the ancestor chain itself.
#[derive(Debug, Clone, Default)]
pub struct CascadedStyles {
    declared: IndexMap<NodeId, IndexMap<String, String>>,
}

impl CascadedStyles {
    /// An empty snapshot: no element declares anything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve user-agent defaults and inline styles for `document`.
    pub fn for_document(document: &Document) -> Self {
        let mut styles = Self::new();

        for node in document.nodes().filter(|node| node.is_element()) {
            let tag = node.tag_name();
            if let Some(display) = default_display(tag) {
                styles.set_property(node.id(), "display", display);
            }
            if let Some(white_space) = default_white_space(tag) {
                styles.set_property(node.id(), "white-space", white_space);
            }
            if node.has_attr("hidden") {
                styles.set_property(node.id(), "display", "none");
            }
            if let Some(style) = node.attr("style") {
                for (property, value) in parse_declarations(style) {
                    styles.set_property(node.id(), &property, &value);
                }
            }
        }
        styles
    }

    /// Declare `property: value` for one element, replacing earlier values.
    pub fn set_property(&mut self, element: NodeId, property: &str, value: &str) {
        self.declared
            .entry(element)
            .or_default()
            .insert(property.to_ascii_lowercase(), value.trim().to_string());
    }

    pub fn remove_property(&mut self, element: NodeId, property: &str) {
        if let Some(properties) = self.declared.get_mut(&element) {
            properties.shift_remove(&property.to_ascii_lowercase());
        }
    }

    pub fn declared_value(&self, element: NodeId, property: &str) -> Option<&str> {
        self.declared
            .get(&element)?
            .get(property)
            .map(String::as_str)
    }
}

impl StyleProvider for CascadedStyles {
    fn computed_value(&self, element: NodeRef<'_>, property: &str) -> Option<String> {
        if !element.is_element() {
            return None;
        }
        self.declared_value(element.id(), property)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Node;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_declarations() {
        let declarations =
            parse_declarations("Display: block; white-space : pre-line !important;; bogus");
        assert_eq!(
            declarations,
            vec![
                ("display".to_string(), "block".to_string()),
                ("white-space".to_string(), "pre-line".to_string()),
            ]
        );
    }

    #[test]
    fn test_user_agent_defaults() {
        let root = Node::element("body")
            .with_child(Node::element("p"))
            .with_child(Node::element("span"))
            .with_child(Node::element("pre"))
            .with_child(Node::element("li"))
            .with_child(Node::element("script"));
        let document = Document::from_node(&root);
        let styles = CascadedStyles::for_document(&document);
        let value = |index: usize, property: &str| {
            let node = document.nodes().nth(index).unwrap();
            styles.computed_value(node, property)
        };

        assert_eq!(value(1, "display").as_deref(), Some("block"));
        assert_eq!(value(2, "display"), None);
        assert_eq!(value(3, "white-space").as_deref(), Some("pre"));
        assert_eq!(value(4, "display").as_deref(), Some("list-item"));
        assert_eq!(value(5, "display").as_deref(), Some("none"));
    }

    #[test]
    fn test_summary_is_block() {
        assert_eq!(default_display("summary"), Some("block"));
        assert_eq!(default_display("li"), Some("list-item"));
    }

    #[test]
    fn test_inline_style_and_overrides_win() {
        let root = Node::element_with_attrs("pre", vec![("style", "white-space: normal")])
            .with_child(Node::element_with_attrs("div", vec![("hidden", "")]));
        let document = Document::from_node(&root);
        let mut styles = CascadedStyles::for_document(&document);
        let pre = document.root();
        let div = pre.first_child().unwrap();

        assert_eq!(styles.computed_value(pre, "white-space").as_deref(), Some("normal"));
        assert_eq!(styles.computed_value(div, "display").as_deref(), Some("none"));

        styles.set_property(div.id(), "Display", "flex");
        assert_eq!(styles.computed_value(div, "display").as_deref(), Some("flex"));
        styles.remove_property(div.id(), "display");
        assert_eq!(styles.computed_value(div, "display"), None);
    }

    #[test]
    fn test_text_nodes_have_no_style() {
        let document = Document::from_node(&Node::element("p").with_text("x"));
        let styles = CascadedStyles::for_document(&document);
        let text = document.root().first_child().unwrap();
        assert_eq!(styles.computed_value(text, "display"), None);
    }
}
