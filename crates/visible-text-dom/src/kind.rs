//! Node kinds the visible-text rules distinguish.

use crate::node::NodeType;

/// Closed set of node kinds with generic fallbacks.
///
/// Unknown tags become [`NodeKind::Element`] and every other non-text node
/// becomes [`NodeKind::Other`]; both are formatted by the generic rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Text,
    Comment,
    Break,
    Script,
    Style,
    NoFrames,
    NoScript,
    TextArea,
    Title,
    Table,
    TableSection,
    TableRow,
    TableCell,
    Caption,
    Select,
    Option,
    HiddenInput,
    SubmitInput,
    ResetInput,
    CheckBoxInput,
    RadioInput,
    /// Any other `<input>` type
    Input,
    OrderedList,
    UnorderedList,
    Preformatted,
    InlineFrame,
    Menu,
    Details,
    Summary,
    Body,
    /// Any other element
    Element,
    /// Document, fragment or anything else that is not an element
    Other,
}

impl NodeKind {
    /// Classify a node from its type, lowercase tag name and, for
    /// `<input>`, its `type` attribute.
    pub fn classify(node_type: NodeType, tag_name: &str, input_type: Option<&str>) -> Self {
        match node_type {
            NodeType::Text => return NodeKind::Text,
            NodeType::Comment => return NodeKind::Comment,
            NodeType::Element => {}
            NodeType::Document | NodeType::DocumentFragment => return NodeKind::Other,
        }

        match tag_name {
            "br" => NodeKind::Break,
            "script" => NodeKind::Script,
            "style" => NodeKind::Style,
            "noframes" => NodeKind::NoFrames,
            "noscript" => NodeKind::NoScript,
            "textarea" => NodeKind::TextArea,
            "title" => NodeKind::Title,
            "table" => NodeKind::Table,
            "thead" | "tbody" | "tfoot" => NodeKind::TableSection,
            "tr" => NodeKind::TableRow,
            "td" | "th" => NodeKind::TableCell,
            "caption" => NodeKind::Caption,
            "select" => NodeKind::Select,
            "option" => NodeKind::Option,
            "input" => Self::classify_input(input_type),
            "ol" => NodeKind::OrderedList,
            "ul" => NodeKind::UnorderedList,
            "pre" => NodeKind::Preformatted,
            "iframe" => NodeKind::InlineFrame,
            "menu" => NodeKind::Menu,
            "details" => NodeKind::Details,
            "summary" => NodeKind::Summary,
            "body" => NodeKind::Body,
            _ => NodeKind::Element,
        }
    }

    fn classify_input(input_type: Option<&str>) -> Self {
        let input_type = input_type.map(str::trim).unwrap_or_default();
        if input_type.eq_ignore_ascii_case("hidden") {
            NodeKind::HiddenInput
        } else if input_type.eq_ignore_ascii_case("submit") {
            NodeKind::SubmitInput
        } else if input_type.eq_ignore_ascii_case("reset") {
            NodeKind::ResetInput
        } else if input_type.eq_ignore_ascii_case("checkbox") {
            NodeKind::CheckBoxInput
        } else if input_type.eq_ignore_ascii_case("radio") {
            NodeKind::RadioInput
        } else {
            NodeKind::Input
        }
    }
}
