//! Host-side collaborators of the serializer.

use crate::document::NodeRef;

/// Visibility and frame lookups supplied by the hosting engine.
///
/// The defaults treat every node as displayed and every frame as empty,
/// which is enough for trees that carry no layout information.
pub trait Host {
    /// Whether `node` is rendered at all (`display: none`,
    /// `visibility: hidden` and structural rules already applied).
    fn is_displayed(&self, _node: NodeRef<'_>) -> bool {
        true
    }

    /// Visible text of the document embedded in an inline frame.
    fn embedded_document_text(&self, _frame: NodeRef<'_>) -> Option<String> {
        None
    }
}

/// A [`Host`] using the trait defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticHost;

impl Host for StaticHost {}
