//! A self-contained page: document, style snapshot and embedded frames.

use std::ptr;

use indexmap::IndexMap;
use tracing::warn;

use crate::document::{Document, NodeId, NodeRef};
use crate::host::Host;
use crate::options::SerializerOptions;
use crate::service::VisibleTextSerializer;
use crate::style::{CascadedStyles, StyleProvider};
use crate::{Result, VisibleTextError};

/// Owns everything needed to serialize a document without an engine.
///
/// Visibility is derived from the style snapshot: a node is displayed
/// unless it or an ancestor has `display: none`, or the nearest declared
/// `visibility` is `hidden` or `collapse`.
#[derive(Debug, Clone)]
pub struct Page {
    document: Document,
    styles: CascadedStyles,
    options: SerializerOptions,
    frames: IndexMap<NodeId, Page>,
}

impl Page {
    pub fn new(document: Document) -> Self {
        Self::with_options(document, SerializerOptions::default())
    }

    pub fn with_options(document: Document, options: SerializerOptions) -> Self {
        let styles = CascadedStyles::for_document(&document);
        Self {
            document,
            styles,
            options,
            frames: IndexMap::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn styles(&self) -> &CascadedStyles {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut CascadedStyles {
        &mut self.styles
    }

    pub fn options(&self) -> &SerializerOptions {
        &self.options
    }

    /// Attach the page loaded into the inline frame `frame`.
    pub fn set_frame_content(&mut self, frame: NodeId, content: Page) {
        self.frames.insert(frame, content);
    }

    pub fn frame_content(&self, frame: NodeId) -> Option<&Page> {
        self.frames.get(&frame)
    }

    /// Visible text of the node `id` of this page's document.
    pub fn as_text(&self, id: NodeId) -> Result<String> {
        let node = self
            .document
            .get(id)
            .ok_or_else(|| VisibleTextError::InvalidInput(format!("no node {id} in page")))?;
        VisibleTextSerializer::with_options(self, self, self.options.clone()).as_text(node)
    }

    /// Visible text of the whole document.
    pub fn visible_text(&self) -> Result<String> {
        self.as_text(self.document.root().id())
    }

    fn owns(&self, node: NodeRef<'_>) -> bool {
        ptr::eq(node.document(), &self.document)
    }

    fn declared(&self, node: NodeRef<'_>, property: &str) -> Option<&str> {
        self.styles.declared_value(node.id(), property)
    }
}

impl StyleProvider for Page {
    fn computed_value(&self, element: NodeRef<'_>, property: &str) -> Option<String> {
        if !self.owns(element) {
            return None;
        }
        self.styles.computed_value(element, property)
    }
}

impl Host for Page {
    fn is_displayed(&self, node: NodeRef<'_>) -> bool {
        if !self.owns(node) {
            return true;
        }
        let element = if node.is_element() {
            Some(node)
        } else {
            node.parent()
        };
        let Some(element) = element else {
            return true;
        };

        let chain = || std::iter::once(element).chain(element.ancestors());
        let display_none = chain().any(|node| {
            self.declared(node, "display")
                .is_some_and(|display| display.eq_ignore_ascii_case("none"))
        });
        if display_none {
            return false;
        }
        !chain()
            .find_map(|node| self.declared(node, "visibility"))
            .is_some_and(|visibility| {
                visibility.eq_ignore_ascii_case("hidden")
                    || visibility.eq_ignore_ascii_case("collapse")
            })
    }

    fn embedded_document_text(&self, frame: NodeRef<'_>) -> Option<String> {
        let content = self.frames.get(&frame.id()).filter(|_| self.owns(frame))?;
        match content.visible_text() {
            Ok(text) => Some(text),
            Err(err) => {
                warn!(frame = %frame.id(), error = %err, "skipping frame content");
                None
            }
        }
    }
}
