//! Immutable parsed-markup tree.
//!
//! Nodes live in one arena owned by the [`Document`]; everything downstream
//! refers to them by [`NodeId`]. Sections and senses are index slices over
//! this arena, so extracting a fragment never mutates or copies the tree.

mod parse;

pub use parse::parse_html;

/// Elements that never carry children and render without a close tag.
pub const VOID_TAGS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(usize);

#[derive(Debug)]
pub enum NodeData {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Default)]
pub struct Document {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Document {
    pub(crate) fn push(&mut self, data: NodeData, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Top-level nodes in document order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    /// Tag name of an element node, `None` for text nodes.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Element { tag, .. } => Some(tag),
            NodeData::Text(_) => None,
        }
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|(attr, _)| attr == name)
                .map(|(_, value)| value.as_str()),
            NodeData::Text(_) => None,
        }
    }

    pub fn id_attr(&self, id: NodeId) -> Option<&str> {
        self.attr(id, "id")
    }

    /// Substring match on the class attribute, the way the markup is queried
    /// upstream (`form-of-definition-link` may sit among other classes).
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attr(id, "class")
            .map(|value| value.contains(class))
            .unwrap_or(false)
    }

    pub fn text_value(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Text(text) => Some(text),
            NodeData::Element { .. } => None,
        }
    }

    /// Concatenated text content of a node and its descendants.
    pub fn text(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.text_value(id) {
            out.push_str(text);
        }
        for descendant in self.descendants(id) {
            if let Some(text) = self.text_value(descendant) {
                out.push_str(text);
            }
        }
        out
    }

    /// Pre-order traversal of a node's descendants, the node itself excluded.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// First node in document order whose id attribute equals `value`.
    pub fn find_by_id(&self, value: &str) -> Option<NodeId> {
        // Arena order is creation order, which the parser keeps pre-order.
        (0..self.nodes.len())
            .map(NodeId)
            .find(|&id| self.id_attr(id) == Some(value))
    }
}

pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        for &child in self.doc.children(id).iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}
