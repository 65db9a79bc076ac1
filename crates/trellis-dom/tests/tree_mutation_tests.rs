//! Tests for element tree mutation methods: link_child, unlink_child, connection, queueing.

use trellis_dom::{ElementKind, ElementTree, NodeId, PendingMutation, TreeError};

/// Helper to allocate an element and link it under `parent`.
fn child_of(tree: &mut ElementTree, parent: NodeId, tag: &str) -> NodeId {
    let id = tree.alloc(tag);
    tree.link_child(parent, id, None).expect("link should succeed");
    id
}

// ========== link_child ==========

#[test]
fn test_link_child_appends_in_order() {
    let mut tree = ElementTree::new("html");
    let a = child_of(&mut tree, NodeId::ROOT, "a");
    let b = child_of(&mut tree, NodeId::ROOT, "b");

    assert_eq!(tree.children(NodeId::ROOT), &[a, b]);
    assert_eq!(tree.parent(a), Some(NodeId::ROOT));
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.prev_sibling(a), None);
}

#[test]
fn test_link_child_before_reference() {
    let mut tree = ElementTree::new("html");
    let a = child_of(&mut tree, NodeId::ROOT, "a");
    let c = child_of(&mut tree, NodeId::ROOT, "c");

    let b = tree.alloc("b");
    tree.link_child(NodeId::ROOT, b, Some(c)).unwrap();

    assert_eq!(tree.children(NodeId::ROOT), &[a, b, c]);
    assert_eq!(tree.preceding_siblings(c).collect::<Vec<_>>(), vec![b, a]);
}

#[test]
fn test_link_child_rejects_cycle() {
    let mut tree = ElementTree::new("html");
    let outer = child_of(&mut tree, NodeId::ROOT, "div");
    let inner = child_of(&mut tree, outer, "div");
    tree.unlink_child(NodeId::ROOT, outer).unwrap();

    assert_eq!(
        tree.link_child(inner, outer, None),
        Err(TreeError::Cycle {
            parent: inner,
            child: outer
        })
    );
}

#[test]
fn test_link_child_rejects_replaced_parent() {
    let mut tree = ElementTree::new("html");
    let image = child_of(&mut tree, NodeId::ROOT, "img");
    let div = tree.alloc("div");

    assert_eq!(tree.get(image).map(|n| n.kind), Some(ElementKind::Replaced));
    assert_eq!(tree.link_child(image, div, None), Err(TreeError::NotAContainer(image)));
    assert!(tree.children(image).is_empty());
    assert_eq!(tree.parent(div), None);
}

#[test]
fn test_link_child_rejects_second_parent() {
    let mut tree = ElementTree::new("html");
    let a = child_of(&mut tree, NodeId::ROOT, "div");
    let b = child_of(&mut tree, NodeId::ROOT, "div");

    assert_eq!(
        tree.link_child(b, a, None),
        Err(TreeError::AlreadyParented {
            child: a,
            parent: NodeId::ROOT
        })
    );
}

#[test]
fn test_link_child_rejects_foreign_reference() {
    let mut tree = ElementTree::new("html");
    let a = child_of(&mut tree, NodeId::ROOT, "div");
    let stray = tree.alloc("div");
    let new = tree.alloc("div");

    assert_eq!(
        tree.link_child(a, new, Some(stray)),
        Err(TreeError::NotAChild {
            parent: a,
            child: stray
        })
    );
}

// ========== unlink_child ==========

#[test]
fn test_unlink_middle_child() {
    let mut tree = ElementTree::new("html");
    let a = child_of(&mut tree, NodeId::ROOT, "a");
    let b = child_of(&mut tree, NodeId::ROOT, "b");
    let c = child_of(&mut tree, NodeId::ROOT, "c");

    tree.unlink_child(NodeId::ROOT, b).unwrap();

    assert_eq!(tree.children(NodeId::ROOT), &[a, c]);
    assert_eq!(tree.parent(b), None);
    assert_eq!(tree.next_sibling(a), Some(c));
}

#[test]
fn test_unlink_non_child_fails() {
    let mut tree = ElementTree::new("html");
    let stray = tree.alloc("div");
    assert!(matches!(
        tree.unlink_child(NodeId::ROOT, stray),
        Err(TreeError::NotAChild { .. })
    ));
}

// ========== connection and queueing ==========

#[test]
fn test_set_connected_marks_subtree() {
    let mut tree = ElementTree::new("html");
    let outer = tree.alloc("div");
    let inner = child_of(&mut tree, outer, "span");
    assert!(!tree.is_connected(outer));

    tree.link_child(NodeId::ROOT, outer, None).unwrap();
    let changed = tree.set_connected(outer, true);

    assert_eq!(changed, vec![outer, inner]);
    assert!(tree.is_connected(inner));
}

#[test]
fn test_pending_mutations_keep_call_order() {
    let mut tree = ElementTree::new("html");
    let host = tree.alloc("div");
    let a = tree.alloc("a");
    let b = tree.alloc("b");

    tree.enqueue(host, PendingMutation::Append(a)).unwrap();
    tree.enqueue(host, PendingMutation::Append(b)).unwrap();
    tree.enqueue(host, PendingMutation::Remove(a)).unwrap();

    let pending: Vec<_> = tree.take_pending(host).into_iter().collect();
    assert_eq!(
        pending,
        vec![
            PendingMutation::Append(a),
            PendingMutation::Append(b),
            PendingMutation::Remove(a)
        ]
    );
    assert!(tree.take_pending(host).is_empty());
}

#[test]
fn test_free_disposes_slot_without_reuse() {
    let mut tree = ElementTree::new("html");
    let a = tree.alloc("div");
    let _ = tree.free(a).unwrap();
    let b = tree.alloc("div");

    assert!(!tree.contains(a));
    assert_ne!(a, b);
    assert_eq!(tree.free(NodeId::ROOT).unwrap_err(), TreeError::RootImmovable);
}

#[test]
fn test_descendants_pre_order() {
    let mut tree = ElementTree::new("html");
    let a = child_of(&mut tree, NodeId::ROOT, "a");
    let a1 = child_of(&mut tree, a, "a1");
    let b = child_of(&mut tree, NodeId::ROOT, "b");

    assert_eq!(tree.descendants(NodeId::ROOT), vec![a, a1, b]);
}

#[test]
fn test_element_kind_classification() {
    assert_eq!(ElementKind::from_tag_name("IMG"), ElementKind::Replaced);
    assert_eq!(ElementKind::from_tag_name("div"), ElementKind::Container);
}
