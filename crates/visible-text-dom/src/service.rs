//! VisibleTextSerializer - the entry point for visible-text extraction.

use tracing::debug;
use visible_text_core::Mode;

use crate::document::NodeRef;
use crate::format::Formatter;
use crate::host::Host;
use crate::kind::NodeKind;
use crate::options::SerializerOptions;
use crate::style::StyleProvider;
use crate::Result;

/// Serializes nodes to the text a browser would expose as their
/// rendered text.
///
/// The serializer holds no mutable state; every call builds its own
/// text buffer, so one instance can serve any number of calls.
pub struct VisibleTextSerializer<'a> {
    styles: &'a dyn StyleProvider,
    host: &'a dyn Host,
    options: SerializerOptions,
}

impl<'a> VisibleTextSerializer<'a> {
    /// Create a serializer with default options
    pub fn new(styles: &'a dyn StyleProvider, host: &'a dyn Host) -> Self {
        Self::with_options(styles, host, SerializerOptions::default())
    }

    /// Create a serializer with custom options
    pub fn with_options(
        styles: &'a dyn StyleProvider,
        host: &'a dyn Host,
        options: SerializerOptions,
    ) -> Self {
        Self {
            styles,
            host,
            options,
        }
    }

    /// Get the current options
    pub fn options(&self) -> &SerializerOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut SerializerOptions {
        &mut self.options
    }

    /// The visible text of `node` and its descendants.
    ///
    /// A lone `<br>` has no text of its own. Fails only when the tree is
    /// nested deeper than [`SerializerOptions::max_depth`].
    pub fn as_text(&self, node: NodeRef<'_>) -> Result<String> {
        if node.kind() == NodeKind::Break {
            return Ok(String::new());
        }

        let mut formatter = Formatter::new(self.styles, self.host, &self.options);
        let mode = formatter.whitespace().resolve_initial(node, Mode::Normal);
        debug!(node = %node.id(), kind = ?node.kind(), ?mode, "serializing visible text");

        formatter.append_node(node, mode)?;
        let text = formatter.into_text();
        debug!(node = %node.id(), len = text.len(), "visible text done");
        Ok(text)
    }
}
