//! The interface between the tree constructor and node storage.
//!
//! [§ 13.2.6.1 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#creating-and-inserting-nodes)
//!
//! The tree constructor never owns nodes. It asks a [`TreeSink`] to create
//! them and to link them together, and keeps only the handles it gets back.

use std::fmt::Debug;

use wombat_dom::{AttributesMap, DocumentTypeData, DomTree, ElementData, NodeId, NodeType, QuirksMode};

use crate::error::ParseIssue;
use crate::tokenizer::Attribute;

/// Node storage driven by the tree constructor.
///
/// Every element is in the HTML namespace, so an element is fully described
/// by its local name and attributes.
pub trait TreeSink {
    /// A cheap reference to a node owned by the sink.
    type Handle: Copy + Eq + Debug;

    /// The Document node. It exists before parsing starts.
    fn document(&self) -> Self::Handle;

    /// [§ 13.2.6.1 Create an element for a token](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    ///
    /// Create a detached element.
    fn create_element(&mut self, name: &str, attributes: &[Attribute]) -> Self::Handle;

    /// Create a detached Comment node.
    fn create_comment(&mut self, data: &str) -> Self::Handle;

    /// Create a detached Text node.
    fn create_text_node(&mut self, data: &str) -> Self::Handle;

    /// Create a detached DocumentType node. Missing identifiers are passed as
    /// the empty string.
    fn create_document_type(
        &mut self,
        name: &str,
        public_id: &str,
        system_id: &str,
    ) -> Self::Handle;

    /// Append `child` as the last child of `parent`, removing it from any
    /// previous parent.
    fn append_child(&mut self, parent: Self::Handle, child: Self::Handle);

    /// Insert `child` into `parent` immediately before `reference`.
    fn insert_before(&mut self, parent: Self::Handle, child: Self::Handle, reference: Self::Handle);

    /// Remove `child` from `parent`.
    fn remove_child(&mut self, parent: Self::Handle, child: Self::Handle);

    /// The local name of an element, `None` for other node types.
    fn local_name(&self, node: Self::Handle) -> Option<&str>;

    /// The parent of `node`, if attached.
    fn parent(&self, node: Self::Handle) -> Option<Self::Handle>;

    /// The first child of `node`.
    fn first_child(&self, node: Self::Handle) -> Option<Self::Handle>;

    /// The last child of `node`.
    fn last_child(&self, node: Self::Handle) -> Option<Self::Handle>;

    /// The sibling after `node`.
    fn next_sibling(&self, node: Self::Handle) -> Option<Self::Handle>;

    /// The sibling before `node`.
    fn previous_sibling(&self, node: Self::Handle) -> Option<Self::Handle>;

    /// Append `data` to `node` if it is a Text node. Returns `false` for any
    /// other node, in which case nothing changes.
    fn append_text(&mut self, node: Self::Handle, data: &str) -> bool;

    /// Add each attribute not already present on `element`.
    ///
    /// Used for stray `<html>` and `<body>` start tags.
    fn add_attributes_if_missing(&mut self, element: Self::Handle, attributes: &[Attribute]);

    /// Move all children of `from` to the end of `to`, keeping their order.
    fn reparent_children(&mut self, from: Self::Handle, to: Self::Handle);

    /// [§ 13.2.6.4.1](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    ///
    /// Record the document's mode.
    fn set_quirks_mode(&mut self, mode: QuirksMode);

    /// Called once for every parse error, lexical or structural, in the order
    /// they occur.
    fn parse_error(&mut self, _issue: &ParseIssue) {}
}

impl TreeSink for DomTree {
    type Handle = NodeId;

    fn document(&self) -> NodeId {
        self.root()
    }

    fn create_element(&mut self, name: &str, attributes: &[Attribute]) -> NodeId {
        let attrs: AttributesMap = attributes
            .iter()
            .map(|attr| (attr.name.as_str(), attr.value.as_str()))
            .collect();
        self.alloc(NodeType::Element(ElementData {
            tag_name: name.to_string(),
            attrs,
        }))
    }

    fn create_comment(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::Comment(data.to_string()))
    }

    fn create_text_node(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::Text(data.to_string()))
    }

    fn create_document_type(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId {
        self.alloc(NodeType::DocumentType(DocumentTypeData {
            name: name.to_string(),
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        }))
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        Self::append_child(self, parent, child);
    }

    fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        Self::insert_before(self, parent, child, reference);
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        Self::remove_child(self, parent, child);
    }

    fn local_name(&self, node: NodeId) -> Option<&str> {
        self.as_element(node).map(|data| data.tag_name.as_str())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        Self::parent(self, node)
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        Self::first_child(self, node)
    }

    fn last_child(&self, node: NodeId) -> Option<NodeId> {
        Self::last_child(self, node)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        Self::next_sibling(self, node)
    }

    fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.prev_sibling(node)
    }

    fn append_text(&mut self, node: NodeId, data: &str) -> bool {
        Self::append_text(self, node, data)
    }

    fn add_attributes_if_missing(&mut self, element: NodeId, attributes: &[Attribute]) {
        if let Some(data) = self.as_element_mut(element) {
            for attr in attributes {
                let _ = data.attrs.insert_if_missing(&attr.name, &attr.value);
            }
        }
    }

    fn reparent_children(&mut self, from: NodeId, to: NodeId) {
        self.move_children(from, to);
    }

    fn set_quirks_mode(&mut self, mode: QuirksMode) {
        Self::set_quirks_mode(self, mode);
    }
}
