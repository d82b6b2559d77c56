//! Read-only node arena with parent links.

use std::fmt;

use indexmap::IndexMap;

use crate::kind::NodeKind;
use crate::node::{Node, NodeType};

/// Index of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    node_type: NodeType,
    /// Lowercase tag name for elements, `#text` etc. otherwise
    name: String,
    value: Option<String>,
    /// Attribute names are lowercased
    attributes: IndexMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// A frozen node tree.
///
/// Nodes are stored in document order, so the root is always `NodeId(0)`
/// and a node's id is smaller than the ids of all of its descendants.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Document {
    /// Freeze a [`Node`] tree into an arena.
    pub fn from_node(root: &Node) -> Self {
        let mut document = Self { nodes: Vec::new() };
        let mut stack: Vec<(&Node, Option<NodeId>)> = vec![(root, None)];

        while let Some((node, parent)) = stack.pop() {
            let id = document.push(node, parent);
            if let Some(parent) = parent {
                document.nodes[parent.0].children.push(id);
            }
            let children: Vec<&Node> = node.children().collect();
            stack.extend(children.into_iter().rev().map(|child| (child, Some(id))));
        }
        document
    }

    fn push(&mut self, node: &Node, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let name = match node.node_type {
            NodeType::Element => node.tag_name(),
            _ => node.node_name.clone(),
        };
        let attributes: IndexMap<String, String> = node
            .attr_pairs()
            .map(|(name, value)| (name.to_ascii_lowercase(), value.to_string()))
            .collect();
        let input_type = attributes.get("type").map(String::as_str);
        let kind = NodeKind::classify(node.node_type, &name, input_type);

        self.nodes.push(NodeData {
            node_type: node.node_type,
            name,
            value: node.node_value.clone(),
            attributes,
            parent,
            children: Vec::new(),
            kind,
        });
        id
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            document: self,
            id: NodeId(0),
        }
    }

    /// Look a node up by id; `None` if it belongs to another document.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { document: self, id })
    }

    /// First element (in document order) whose `id` attribute matches.
    pub fn element_by_id(&self, element_id: &str) -> Option<NodeRef<'_>> {
        self.nodes
            .iter()
            .position(|data| {
                data.node_type == NodeType::Element
                    && data.attributes.get("id").map(String::as_str) == Some(element_id)
            })
            .map(|index| NodeRef {
                document: self,
                id: NodeId(index),
            })
    }

    /// All nodes in document order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef<'_>> {
        (0..self.nodes.len()).map(move |index| NodeRef {
            document: self,
            id: NodeId(index),
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

/// A node handle carrying its document, so it can navigate up the tree.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    document: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &'a Document {
        self.document
    }

    fn data(&self) -> &'a NodeData {
        self.document.data(self.id)
    }

    pub fn node_type(&self) -> NodeType {
        self.data().node_type
    }

    pub fn kind(&self) -> NodeKind {
        self.data().kind
    }

    pub fn is_element(&self) -> bool {
        self.node_type() == NodeType::Element
    }

    /// Lowercase tag name for elements, the `#name` for everything else
    pub fn tag_name(&self) -> &'a str {
        &self.data().name
    }

    /// Character data of text and comment nodes
    pub fn data_text(&self) -> Option<&'a str> {
        self.data().value.as_deref()
    }

    /// Attribute lookup, case-insensitive on the name
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        let attributes = &self.data().attributes;
        match attributes.get(name) {
            Some(value) => Some(value.as_str()),
            None => attributes
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str()),
        }
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.data().parent.map(|id| NodeRef {
            document: self.document,
            id,
        })
    }

    /// Ancestors, nearest first, not including this node.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'a>> {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    pub fn children(&self) -> impl DoubleEndedIterator<Item = NodeRef<'a>> + 'a {
        let document = self.document;
        self.data()
            .children
            .iter()
            .map(move |&id| NodeRef { document, id })
    }

    pub fn element_children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.children().filter(|child| child.is_element())
    }

    pub fn first_child(&self) -> Option<NodeRef<'a>> {
        self.children().next()
    }

    /// Concatenated character data of all descendant text nodes
    pub fn text_content(&self) -> String {
        let mut content = String::new();
        let mut stack = vec![*self];
        while let Some(node) = stack.pop() {
            match node.node_type() {
                NodeType::Text => content.push_str(node.data_text().unwrap_or_default()),
                NodeType::Comment => {}
                _ => stack.extend(node.children().rev()),
            }
        }
        content
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.document, other.document) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("name", &self.tag_name())
            .field("kind", &self.kind())
            .finish()
    }
}
