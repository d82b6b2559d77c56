//! White-space mode resolution.

use visible_text_core::Mode;

use crate::document::NodeRef;
use crate::style::StyleProvider;

const WHITE_SPACE: &str = "white-space";

/// Maps nodes to the [`Mode`] their text is folded with.
#[derive(Clone, Copy)]
pub struct WhitespaceResolver<'a> {
    styles: &'a dyn StyleProvider,
    css_enabled: bool,
}

impl<'a> WhitespaceResolver<'a> {
    pub fn new(styles: &'a dyn StyleProvider, css_enabled: bool) -> Self {
        Self { styles, css_enabled }
    }

    /// Walk up from `node` (inclusive) and return the mode of the first
    /// element that declares a known `white-space` value, else `fallback`.
    pub fn resolve_initial(&self, node: NodeRef<'_>, fallback: Mode) -> Mode {
        if !self.css_enabled {
            return fallback;
        }
        std::iter::once(node)
            .chain(node.ancestors())
            .find_map(|node| self.declared_mode(node))
            .unwrap_or(fallback)
    }

    /// Mode for the children of `node`: its own declared `white-space`,
    /// else `parent_mode`. Ancestors are not consulted.
    pub fn resolve_for_child(&self, node: NodeRef<'_>, parent_mode: Mode) -> Mode {
        if !self.css_enabled {
            return parent_mode;
        }
        self.declared_mode(node).unwrap_or(parent_mode)
    }

    fn declared_mode(&self, node: NodeRef<'_>) -> Option<Mode> {
        if !node.is_element() {
            return None;
        }
        let value = self.styles.computed_value(node, WHITE_SPACE)?;
        Mode::from_white_space(&value)
    }
}
