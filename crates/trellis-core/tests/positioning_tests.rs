//! Tests for attach/detach, containing blocks, out-of-flow relocation and
//! queued structural edits.

use trellis_core::{Document, DocumentError};
use trellis_dom::{NodeId, TreeError};
use trellis_layout::{BoxId, BoxKind, RenderBox};
use trellis_style::PositionType;

fn document() -> Document {
    let _ = env_logger::builder().is_test(true).try_init();
    Document::default()
}

/// Helper: create a disconnected element with inline style pairs.
fn element(doc: &mut Document, tag: &str, styles: &[(&str, &str)]) -> NodeId {
    let id = doc.create_element(tag);
    for (name, value) in styles {
        doc.set_style(id, name, value).unwrap();
    }
    id
}

/// Helper: create an element and append it under `parent`.
fn child(doc: &mut Document, parent: NodeId, styles: &[(&str, &str)]) -> NodeId {
    let id = element(doc, "div", styles);
    doc.append_child(parent, id).unwrap();
    id
}

fn box_id(doc: &Document, element: NodeId) -> BoxId {
    doc.box_of(element).unwrap()
}

fn render_box(doc: &Document, element: NodeId) -> &RenderBox {
    doc.boxes().get(box_id(doc, element)).unwrap()
}

fn box_parent(doc: &Document, element: NodeId) -> Option<BoxId> {
    doc.boxes().parent(box_id(doc, element))
}

/// Every attached element's box sits where its position says it should.
fn assert_isomorphic(doc: &Document) {
    let root = doc.root();
    for element in doc.elements().descendants(root) {
        if !doc.is_attached(element) {
            continue;
        }
        let parent = doc.elements().parent(element).unwrap();
        let parent_box = box_id(doc, parent);
        let position = doc.position_of(element).unwrap();
        if position.is_out_of_flow() {
            let placeholder = doc.placeholder_of(element).unwrap();
            assert_eq!(doc.boxes().parent(placeholder), Some(parent_box));
            let containing_block = doc.find_containing_block(element);
            assert_eq!(box_parent(doc, element), Some(box_id(doc, containing_block)));
            assert!(render_box(doc, element).out_of_flow);
        } else {
            assert_eq!(doc.placeholder_of(element), None);
            assert_eq!(box_parent(doc, element), Some(parent_box));
            assert!(!render_box(doc, element).out_of_flow);
        }
    }
}

// ========== attach / detach ==========

#[test]
fn test_append_houses_boxes_in_order() {
    let mut doc = document();
    let root = doc.root();
    let a = child(&mut doc, root, &[]);
    let b = child(&mut doc, root, &[]);
    let c = element(&mut doc, "div", &[]);
    doc.insert_before(root, c, b).unwrap();

    let root_box = doc.root_box();
    assert_eq!(
        doc.boxes().children(root_box),
        &[box_id(&doc, a), box_id(&doc, c), box_id(&doc, b)]
    );
    assert_isomorphic(&doc);
}

#[test]
fn test_remove_child_detaches_subtree() {
    let mut doc = document();
    let root = doc.root();
    let a = child(&mut doc, root, &[]);
    let b = child(&mut doc, a, &[]);

    doc.remove_child(root, a).unwrap();

    assert!(!doc.is_attached(a));
    assert!(!doc.is_attached(b));
    assert!(!doc.elements().is_connected(b));
    assert_eq!(box_parent(&doc, a), None);
    // The subtree keeps its structure and its boxes.
    assert_eq!(doc.elements().children(a), &[b]);
    assert_eq!(box_parent(&doc, b), None);
    assert!(doc.boxes().children(doc.root_box()).is_empty());
}

#[test]
fn test_remove_child_rejects_stranger() {
    let mut doc = document();
    let root = doc.root();
    let a = child(&mut doc, root, &[]);
    let b = child(&mut doc, root, &[]);

    assert!(doc.remove_child(a, b).is_err());
    assert!(doc.is_attached(b));
}

#[test]
fn test_append_rejects_cycle() {
    let mut doc = document();
    let root = doc.root();
    let a = child(&mut doc, root, &[]);
    let b = child(&mut doc, a, &[]);

    assert!(doc.append_child(b, a).is_err());
    assert_eq!(doc.elements().parent(a), Some(root));
}

#[test]
fn test_insert_before_self_outside_parent_rejected() {
    let mut doc = document();
    let root = doc.root();
    let a = child(&mut doc, root, &[]);
    let b = child(&mut doc, root, &[]);

    assert!(matches!(
        doc.insert_before(a, b, b),
        Err(DocumentError::Tree(TreeError::NotAChild { parent, child })) if parent == a && child == b
    ));
    assert_eq!(doc.elements().parent(b), Some(root));
    assert!(doc.is_attached(b));
}

#[test]
fn test_insert_before_self_in_place_is_noop() {
    let mut doc = document();
    let root = doc.root();
    let a = child(&mut doc, root, &[]);
    let b = child(&mut doc, root, &[]);

    doc.insert_before(root, b, b).unwrap();

    assert_eq!(doc.elements().children(root), &[a, b]);
    assert_isomorphic(&doc);
}

#[test]
fn test_append_under_replaced_element_rejected() {
    let mut doc = document();
    let root = doc.root();
    let image = element(&mut doc, "img", &[]);
    doc.append_child(root, image).unwrap();
    let div = element(&mut doc, "div", &[]);

    assert!(matches!(
        doc.append_child(image, div),
        Err(DocumentError::Tree(TreeError::NotAContainer(parent))) if parent == image
    ));
    // Neither tree changed.
    assert_eq!(doc.elements().parent(div), None);
    assert!(!doc.elements().is_connected(div));
    assert!(!doc.is_attached(div));
    assert!(doc.boxes().children(box_id(&doc, image)).is_empty());
    assert_isomorphic(&doc);

    // The rejected element is still usable elsewhere.
    doc.append_child(root, div).unwrap();
    assert_eq!(box_parent(&doc, div), Some(doc.root_box()));
}

#[test]
fn test_insert_before_under_replaced_element_rejected() {
    let mut doc = document();
    let root = doc.root();
    let video = element(&mut doc, "video", &[]);
    let div = element(&mut doc, "div", &[]);

    // Rejected even while the parent is disconnected, so nothing is queued.
    assert!(matches!(
        doc.append_child(video, div),
        Err(DocumentError::Tree(TreeError::NotAContainer(_)))
    ));
    doc.append_child(root, video).unwrap();

    assert!(doc.elements().children(video).is_empty());
    assert!(!doc.is_attached(div));
    assert!(doc.insert_before(video, div, root).is_err());
    assert_isomorphic(&doc);
}

#[test]
fn test_absolute_child_of_positioned_replaced_element_rejected() {
    let mut doc = document();
    let root = doc.root();
    let wrapper = child(&mut doc, root, &[("position", "relative")]);
    let image = element(&mut doc, "img", &[("position", "relative")]);
    doc.append_child(wrapper, image).unwrap();
    let overlay = element(&mut doc, "div", &[("position", "absolute")]);

    assert!(doc.append_child(image, overlay).is_err());
    assert!(!doc.is_attached(overlay));

    // As a sibling it is housed by the nearest positioned container.
    doc.append_child(wrapper, overlay).unwrap();
    assert_eq!(doc.find_containing_block(overlay), wrapper);
    assert_eq!(box_parent(&doc, overlay), Some(box_id(&doc, wrapper)));
    assert_isomorphic(&doc);
}

#[test]
fn test_moving_child_between_parents() {
    let mut doc = document();
    let root = doc.root();
    let a = child(&mut doc, root, &[]);
    let b = child(&mut doc, root, &[]);
    let moved = child(&mut doc, a, &[]);

    doc.append_child(b, moved).unwrap();

    assert_eq!(doc.elements().children(a), &[] as &[NodeId]);
    assert_eq!(box_parent(&doc, moved), Some(box_id(&doc, b)));
    assert_isomorphic(&doc);
}

#[test]
#[should_panic(expected = "already attached")]
fn test_attach_twice_panics() {
    let mut doc = document();
    let root = doc.root();
    let a = child(&mut doc, root, &[]);
    doc.attach(a, root, None);
}

#[test]
fn test_detach_twice_is_noop() {
    let mut doc = document();
    let root = doc.root();
    let a = child(&mut doc, root, &[]);

    doc.detach(a);
    doc.detach(a);

    assert!(!doc.is_attached(a));
    assert_eq!(box_parent(&doc, a), None);
    // The binding survives for a later attach.
    doc.attach(a, root, None);
    assert_eq!(box_parent(&doc, a), Some(doc.root_box()));
}

#[test]
#[should_panic(expected = "root element cannot be detached")]
fn test_detach_root_panics() {
    let mut doc = document();
    let root = doc.root();
    doc.detach(root);
}

#[test]
fn test_dispose_frees_subtree() {
    let mut doc = document();
    let root = doc.root();
    let a = child(&mut doc, root, &[]);
    let b = child(&mut doc, a, &[("position", "absolute")]);
    let boxes_before = doc.boxes().len();

    doc.dispose(a).unwrap();

    assert!(!doc.elements().contains(a));
    assert!(!doc.elements().contains(b));
    assert_eq!(doc.box_of(b), None);
    // a's box, b's box and b's placeholder are gone.
    assert_eq!(doc.boxes().len(), boxes_before - 3);
    assert!(doc.dispose(a).is_err());
    assert!(doc.dispose(root).is_err());
}

// ========== containing blocks ==========

#[test]
fn test_containing_block_is_nearest_positioned_ancestor() {
    let mut doc = document();
    let root = doc.root();
    let a = child(&mut doc, root, &[]);
    let b = child(&mut doc, a, &[("position", "relative")]);
    let c = child(&mut doc, b, &[("position", "absolute")]);

    assert_eq!(doc.find_containing_block(c), b);
    assert_eq!(box_parent(&doc, c), Some(box_id(&doc, b)));
    assert_isomorphic(&doc);
}

#[test]
fn test_containing_block_falls_back_to_root() {
    let mut doc = document();
    let root = doc.root();
    let a = child(&mut doc, root, &[]);
    let c = child(&mut doc, a, &[("position", "absolute")]);

    assert_eq!(doc.find_containing_block(c), root);
    assert_eq!(box_parent(&doc, c), Some(doc.root_box()));
}

#[test]
fn test_fixed_ignores_positioned_ancestors() {
    let mut doc = document();
    let root = doc.root();
    let a = child(&mut doc, root, &[("position", "relative")]);
    let f = child(&mut doc, a, &[("position", "fixed")]);

    assert_eq!(doc.find_containing_block(f), root);
    assert_eq!(box_parent(&doc, f), Some(doc.root_box()));
}

#[test]
fn test_transformed_ancestor_is_containing_block() {
    let mut doc = document();
    let root = doc.root();
    let a = child(&mut doc, root, &[("transform", "rotate(10deg)")]);
    let c = child(&mut doc, a, &[("position", "absolute")]);

    assert_eq!(doc.find_containing_block(c), a);
    assert_eq!(box_parent(&doc, c), Some(box_id(&doc, a)));
}

// ========== out-of-flow relocation ==========

#[test]
fn test_placeholder_keeps_flow_slot() {
    let mut doc = document();
    let root = doc.root();
    let holder = child(&mut doc, root, &[("position", "relative")]);
    let abs = child(&mut doc, holder, &[("position", "absolute"), ("width", "40px"), ("height", "20px")]);
    let after = child(&mut doc, holder, &[]);

    let placeholder = doc.placeholder_of(abs).unwrap();
    assert_eq!(
        doc.boxes().children(box_id(&doc, holder)),
        &[placeholder, box_id(&doc, after), box_id(&doc, abs)]
    );
    let shadow = doc.boxes().get(placeholder).unwrap();
    assert_eq!(shadow.kind, BoxKind::Placeholder { shadow: abs });
    assert!((shadow.preferred.width - 40.0).abs() < f32::EPSILON);
    assert!((shadow.preferred.height - 20.0).abs() < f32::EPSILON);
    assert_isomorphic(&doc);
}

#[test]
fn test_inline_placeholder_has_no_size() {
    let mut doc = document();
    let root = doc.root();
    let abs = element(&mut doc, "span", &[("position", "absolute"), ("width", "40px")]);
    doc.append_child(root, abs).unwrap();

    let placeholder = doc.boxes().get(doc.placeholder_of(abs).unwrap()).unwrap();
    assert!(placeholder.preferred.width.abs() < f32::EPSILON);
}

#[test]
fn test_static_to_absolute_and_back_restores_slot() {
    let mut doc = document();
    let root = doc.root();
    let a = child(&mut doc, root, &[]);
    let b = child(&mut doc, root, &[("position", "relative")]);
    let c = child(&mut doc, root, &[]);
    let inner = child(&mut doc, b, &[("position", "absolute")]);

    doc.set_style(b, "position", "absolute").unwrap();
    assert_eq!(doc.position_of(b), Some(PositionType::Absolute));
    let placeholder = doc.placeholder_of(b).unwrap();
    assert_eq!(doc.boxes().children(doc.root_box())[1], placeholder);
    // The absolute child still resolves to b.
    assert_eq!(box_parent(&doc, inner), Some(box_id(&doc, b)));
    assert_isomorphic(&doc);

    doc.set_style(b, "position", "static").unwrap();
    assert_eq!(doc.placeholder_of(b), None);
    assert!(!doc.boxes().contains(placeholder));
    assert_eq!(
        doc.boxes().children(doc.root_box())[..3],
        [box_id(&doc, a), box_id(&doc, b), box_id(&doc, c)]
    );
    // b no longer positions anything: its absolute child moves to the root.
    assert_eq!(box_parent(&doc, inner), Some(doc.root_box()));
    assert_isomorphic(&doc);
}

#[test]
fn test_becoming_positioned_adopts_absolute_descendants() {
    let mut doc = document();
    let root = doc.root();
    let a = child(&mut doc, root, &[]);
    let b = child(&mut doc, a, &[]);
    let abs = child(&mut doc, b, &[("position", "absolute")]);
    assert_eq!(box_parent(&doc, abs), Some(doc.root_box()));

    doc.set_style(a, "position", "relative").unwrap();

    assert_eq!(box_parent(&doc, abs), Some(box_id(&doc, a)));
    assert_isomorphic(&doc);
}

#[test]
fn test_gaining_transform_adopts_absolute_descendants() {
    let mut doc = document();
    let root = doc.root();
    let a = child(&mut doc, root, &[]);
    let abs = child(&mut doc, a, &[("position", "absolute")]);

    doc.set_style(a, "transform", "scale(2)").unwrap();
    assert_eq!(box_parent(&doc, abs), Some(box_id(&doc, a)));

    doc.set_style(a, "transform", "none").unwrap();
    assert_eq!(box_parent(&doc, abs), Some(doc.root_box()));
}

#[test]
fn test_absolute_sibling_anchor_uses_placeholder() {
    let mut doc = document();
    let root = doc.root();
    let abs = child(&mut doc, root, &[("position", "absolute")]);
    let next = child(&mut doc, root, &[]);

    let children = doc.boxes().children(doc.root_box());
    let placeholder = doc.placeholder_of(abs).unwrap();
    let placeholder_index = children.iter().position(|&b| b == placeholder).unwrap();
    let next_index = children.iter().position(|&b| b == box_id(&doc, next)).unwrap();
    assert_eq!(next_index, placeholder_index + 1);
}

// ========== queued edits ==========

#[test]
fn test_queued_appends_replay_in_call_order() {
    let mut doc = document();
    let root = doc.root();
    let list = element(&mut doc, "div", &[]);
    let x = element(&mut doc, "div", &[]);
    let y = element(&mut doc, "div", &[]);
    let z = element(&mut doc, "div", &[]);

    doc.append_child(list, x).unwrap();
    doc.append_child(list, y).unwrap();
    doc.append_child(list, z).unwrap();
    assert!(doc.elements().children(list).is_empty());

    doc.append_child(root, list).unwrap();

    assert_eq!(doc.elements().children(list), &[x, y, z]);
    assert_eq!(
        doc.boxes().children(box_id(&doc, list)),
        &[box_id(&doc, x), box_id(&doc, y), box_id(&doc, z)]
    );
    assert!(doc.is_attached(z));
    assert_isomorphic(&doc);
}

#[test]
fn test_queued_insert_and_remove_replay() {
    let mut doc = document();
    let root = doc.root();
    let list = element(&mut doc, "div", &[]);
    let x = element(&mut doc, "div", &[]);
    let y = element(&mut doc, "div", &[]);

    doc.append_child(list, x).unwrap();
    doc.insert_before(list, y, x).unwrap();
    doc.remove_child(list, x).unwrap();
    doc.append_child(root, list).unwrap();

    assert_eq!(doc.elements().children(list), &[y]);
    assert!(!doc.is_attached(x));
}

#[test]
fn test_disposed_queued_child_is_skipped() {
    let mut doc = document();
    let root = doc.root();
    let list = element(&mut doc, "div", &[]);
    let gone = element(&mut doc, "div", &[]);
    let kept = element(&mut doc, "div", &[]);

    doc.append_child(list, gone).unwrap();
    doc.append_child(list, kept).unwrap();
    doc.dispose(gone).unwrap();
    doc.append_child(root, list).unwrap();

    assert_eq!(doc.elements().children(list), &[kept]);
    assert!(doc.is_attached(kept));
}

#[test]
fn test_nested_queues_replay_on_connection() {
    let mut doc = document();
    let root = doc.root();
    let outer = element(&mut doc, "div", &[]);
    let inner = element(&mut doc, "div", &[]);
    let leaf = element(&mut doc, "div", &[]);

    doc.append_child(inner, leaf).unwrap();
    doc.append_child(outer, inner).unwrap();
    doc.append_child(root, outer).unwrap();

    assert_eq!(doc.elements().children(inner), &[leaf]);
    assert_eq!(box_parent(&doc, leaf), Some(box_id(&doc, inner)));
    assert_isomorphic(&doc);
}
