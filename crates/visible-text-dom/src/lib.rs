//! Browser-style visible text for DOM trees
//!
//! Given a node tree plus resolved `display` and `white-space` values, this
//! crate produces the text a user would see rendered: hidden content is
//! skipped, whitespace is folded per CSS rules and block-level elements,
//! `<br>`, list items and table rows become line breaks.
//!
//! # Example
//!
//! ```
//! use visible_text_dom::{Document, Node, Page};
//!
//! let body = Node::element("body")
//!     .with_child(Node::element("p").with_text("  Hello   world "))
//!     .with_child(Node::element("script").with_text("track()"))
//!     .with_child(Node::element("p").with_text("Bye"));
//!
//! let page = Page::new(Document::from_node(&body));
//! assert_eq!(page.visible_text().unwrap(), "Hello world\nBye");
//! ```
//!
//! Hosts that already have computed styles and layout implement
//! [`StyleProvider`] and [`Host`] and drive a [`VisibleTextSerializer`]
//! directly.

mod document;
mod format;
mod host;
mod kind;
mod node;
mod options;
mod page;
mod service;
mod style;
mod table;
mod whitespace;

pub use document::{Document, NodeId, NodeRef};
pub use host::{Host, StaticHost};
pub use kind::NodeKind;
pub use node::{Node, NodeType};
pub use options::SerializerOptions;
pub use page::Page;
pub use service::VisibleTextSerializer;
pub use style::{
    parse_declarations, CascadedStyles, StyleProvider, BLOCK_ELEMENTS, HIDDEN_ELEMENTS,
    PREFORMATTED_ELEMENTS,
};
pub use visible_text_core::Mode;
pub use whitespace::WhitespaceResolver;

/// Error type for visible-text extraction
#[derive(Debug, thiserror::Error)]
pub enum VisibleTextError {
    #[error("Node tree too deep: nesting exceeds {limit} levels")]
    TreeTooDeep { limit: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for visible-text operations
pub type Result<T> = std::result::Result<T, VisibleTextError>;
