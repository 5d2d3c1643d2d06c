//! Tests for DOM tree mutation: append, insert_before, remove_child, move_children.

use wombat_dom::{
    AttributesMap, DocumentTypeData, DomTree, ElementData, NodeId, NodeType, QuirksMode,
};

/// Helper to create a detached element node and return its NodeId.
fn element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.alloc(NodeType::Element(ElementData {
        tag_name: tag.to_string(),
        attrs: AttributesMap::new(),
    }))
}

/// Helper to build `<div>` under the document with the given children.
fn div_with(tree: &mut DomTree, tags: &[&str]) -> (NodeId, Vec<NodeId>) {
    let parent = element(tree, "div");
    tree.append_child(NodeId::ROOT, parent);
    let kids = tags
        .iter()
        .map(|tag| {
            let id = element(tree, tag);
            tree.append_child(parent, id);
            id
        })
        .collect();
    (parent, kids)
}

/// Assert that the sibling links of `parent`'s children agree with its child list.
fn assert_links_consistent(tree: &DomTree, parent: NodeId) {
    let children = tree.children(parent);
    for (i, &child) in children.iter().enumerate() {
        assert_eq!(tree.parent(child), Some(parent));
        let prev = i.checked_sub(1).map(|p| children[p]);
        let next = children.get(i + 1).copied();
        assert_eq!(tree.prev_sibling(child), prev, "prev of child {i}");
        assert_eq!(tree.next_sibling(child), next, "next of child {i}");
    }
}

// ========== remove_child ==========

#[test]
fn test_remove_only_child_detaches_it() {
    let mut tree = DomTree::new();
    let (parent, kids) = div_with(&mut tree, &["p"]);

    tree.remove_child(parent, kids[0]);

    assert!(tree.children(parent).is_empty());
    assert_eq!(tree.parent(kids[0]), None);
    assert_eq!(tree.prev_sibling(kids[0]), None);
    assert_eq!(tree.next_sibling(kids[0]), None);
}

#[test]
fn test_remove_each_position_of_three() {
    for victim in 0..3 {
        let mut tree = DomTree::new();
        let (parent, kids) = div_with(&mut tree, &["a", "b", "c"]);

        tree.remove_child(parent, kids[victim]);

        let expected: Vec<NodeId> = kids
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != victim)
            .map(|(_, &id)| id)
            .collect();
        assert_eq!(tree.children(parent), expected.as_slice());
        assert_links_consistent(&tree, parent);
    }
}

#[test]
fn test_remove_child_of_wrong_parent_is_ignored() {
    let mut tree = DomTree::new();
    let (parent, kids) = div_with(&mut tree, &["a"]);
    let stranger = element(&mut tree, "section");

    tree.remove_child(stranger, kids[0]);

    assert_eq!(tree.children(parent), &[kids[0]]);
}

// ========== append_child / insert_before ==========

#[test]
fn test_append_moves_node_from_previous_parent() {
    let mut tree = DomTree::new();
    let (first, kids) = div_with(&mut tree, &["a", "b"]);
    let (second, _) = div_with(&mut tree, &[]);

    tree.append_child(second, kids[0]);

    assert_eq!(tree.children(first), &[kids[1]]);
    assert_eq!(tree.children(second), &[kids[0]]);
    assert_links_consistent(&tree, first);
    assert_links_consistent(&tree, second);
}

#[test]
fn test_insert_before_first_and_middle() {
    let mut tree = DomTree::new();
    let (parent, kids) = div_with(&mut tree, &["b", "d"]);

    let a = element(&mut tree, "a");
    tree.insert_before(parent, a, kids[0]);
    let c = element(&mut tree, "c");
    tree.insert_before(parent, c, kids[1]);

    assert_eq!(tree.children(parent), &[a, kids[0], c, kids[1]]);
    assert_links_consistent(&tree, parent);
}

#[test]
fn test_insert_before_unknown_reference_appends() {
    let mut tree = DomTree::new();
    let (parent, kids) = div_with(&mut tree, &["a"]);
    let detached = element(&mut tree, "x");
    let new_child = element(&mut tree, "b");

    tree.insert_before(parent, new_child, detached);

    assert_eq!(tree.children(parent), &[kids[0], new_child]);
    assert_links_consistent(&tree, parent);
}

// ========== move_children ==========

#[test]
fn test_move_children_appends_after_existing() {
    let mut tree = DomTree::new();
    let (from, moved) = div_with(&mut tree, &["y", "z"]);
    let (to, existing) = div_with(&mut tree, &["x"]);

    tree.move_children(from, to);

    assert!(tree.children(from).is_empty());
    assert_eq!(tree.children(to), &[existing[0], moved[0], moved[1]]);
    assert_links_consistent(&tree, to);
}

#[test]
fn test_move_children_from_empty_is_noop() {
    let mut tree = DomTree::new();
    let (from, _) = div_with(&mut tree, &[]);
    let (to, _) = div_with(&mut tree, &[]);

    tree.move_children(from, to);

    assert!(tree.children(to).is_empty());
}

// ========== node data ==========

#[test]
fn test_append_text_only_touches_text_nodes() {
    let mut tree = DomTree::new();
    let text = tree.alloc(NodeType::Text("Hello".to_string()));
    let comment = tree.alloc(NodeType::Comment("c".to_string()));

    assert!(tree.append_text(text, ", world"));
    assert!(!tree.append_text(comment, "nope"));
    assert_eq!(tree.as_text(text), Some("Hello, world"));
}

#[test]
fn test_attributes_keep_source_order_and_first_value() {
    let attrs: AttributesMap = [("b", "1"), ("a", "2"), ("b", "3")].into_iter().collect();

    let names: Vec<&str> = attrs.iter().map(|(n, _)| n).collect();
    assert_eq!(names, ["b", "a"]);
    assert_eq!(attrs.get("b"), Some("1"));
}

#[test]
fn test_document_accessors() {
    let mut tree = DomTree::new();
    assert_eq!(tree.quirks_mode(), QuirksMode::NoQuirks);

    let doctype = tree.alloc(NodeType::DocumentType(DocumentTypeData {
        name: "html".to_string(),
        public_id: String::new(),
        system_id: String::new(),
    }));
    tree.append_child(NodeId::ROOT, doctype);
    let html = element(&mut tree, "html");
    tree.append_child(NodeId::ROOT, html);
    let head = element(&mut tree, "head");
    tree.append_child(html, head);
    let body = element(&mut tree, "body");
    tree.append_child(html, body);
    tree.set_quirks_mode(QuirksMode::LimitedQuirks);

    assert_eq!(tree.doctype().map(|d| d.name.as_str()), Some("html"));
    assert_eq!(tree.document_element(), Some(html));
    assert_eq!(tree.head(), Some(head));
    assert_eq!(tree.body(), Some(body));
    assert!(tree.is_descendant_of(body, NodeId::ROOT));
    assert_eq!(tree.quirks_mode().to_string(), "limited-quirks");
}

#[test]
fn test_mutations_with_unknown_ids_are_ignored() {
    let mut tree = DomTree::new();
    let (parent, kids) = div_with(&mut tree, &["p"]);
    let stranger = NodeId(tree.len() + 10);

    tree.append_child(parent, stranger);
    tree.append_child(stranger, kids[0]);
    tree.insert_before(stranger, kids[0], parent);
    tree.insert_before(parent, stranger, kids[0]);
    tree.remove_child(parent, stranger);
    tree.move_children(parent, stranger);
    tree.move_children(stranger, parent);

    assert_eq!(tree.children(parent), kids.as_slice());
    assert_eq!(tree.parent(kids[0]), Some(parent));
    assert_links_consistent(&tree, parent);
    assert!(!tree.is_empty());
}
