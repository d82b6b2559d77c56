//! visible-text-core - whitespace collapsing for browser-style visible text
//!
//! This crate provides the text accumulator used by `visible-text-dom`
//! when it serializes a node tree the way a browser exposes its rendered
//! text. It knows nothing about nodes or styles: callers feed it text
//! chunks together with a white-space [`Mode`] and structural commands
//! (block separators, breaks, blanks).
//!
//! # Example
//!
//! ```rust
//! use visible_text_core::{Mode, TextBuilder};
//!
//! let mut builder = TextBuilder::new();
//! builder.append("  Hello   ", Mode::Normal);
//! builder.append_break(Mode::Normal);
//! builder.append("World  ", Mode::Normal);
//! builder.append_block_separator();
//!
//! assert_eq!(builder.text(), "Hello\nWorld");
//! ```

mod builder;
mod mode;

pub use builder::{State, TextBuilder};
pub use mode::Mode;
