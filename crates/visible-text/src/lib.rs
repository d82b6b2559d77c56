//! # visible-text
//!
//! Extract the text a browser would render for a document or element,
//! in the spirit of `HTMLElement.innerText`.
//!
//! ## Design
//!
//! The serializer does not parse or style anything itself. It walks a
//! [`Document`] and asks a [`StyleProvider`] for resolved `display` and
//! `white-space` values and a [`Host`] for visibility. This allows:
//!
//! - **Engine integration**: a headless browser supplies its own computed
//!   styles and layout
//! - **Standalone use**: [`Page`] derives both from a user-agent sheet and
//!   inline `style` attributes
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use visible_text::{Document, Node, Page};
//!
//! let div = Node::element("div")
//!     .with_text("Hello")
//!     .with_child(Node::element("br"))
//!     .with_text("World");
//!
//! let page = Page::new(Document::from_node(&div));
//! assert_eq!(page.visible_text().unwrap(), "Hello\nWorld");
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! let text = visible_text::visible_text_html("<p>Hello</p><p>World</p>").unwrap();
//! assert_eq!(text, "Hello\nWorld");
//! ```

#[cfg(feature = "html")]
pub mod html;

#[cfg(feature = "html")]
pub use html::{page_from_html, page_from_html_with_options, parse_html, visible_text_html};
pub use visible_text_core::{State, TextBuilder};
pub use visible_text_dom::*;
