//! Tests for the render-box arena and the reference layout flush.

use trellis_common::{Point, Size};
use trellis_dom::{NodeId, StyleDeclaration};
use trellis_style::DisplayValue;
use trellis_layout::{
    BoxFactory, BoxId, BoxKind, BoxSpec, DefaultBoxFactory, LayoutFlush, LayoutVariant, RenderBox,
    RenderTree, RepaintMode, StackLayout,
};

const VIEWPORT: Size = Size {
    width: 800.0,
    height: 600.0,
};

/// Helper: build a flow box for `owner` from style pairs.
fn make_box(tree: &mut RenderTree, owner: usize, pairs: &[(&str, &str)]) -> BoxId {
    make_box_with(tree, owner, BoxKind::Layout(LayoutVariant::Flow), pairs)
}

fn make_box_with(tree: &mut RenderTree, owner: usize, kind: BoxKind, pairs: &[(&str, &str)]) -> BoxId {
    let mut style = StyleDeclaration::new();
    for (name, value) in pairs {
        let _ = style.set(name, value);
    }
    let mut render_box = DefaultBoxFactory.create(&BoxSpec {
        owner: NodeId(owner),
        kind,
        repaint: RepaintMode::ParentRepaint,
        style: &style,
    });
    // Display is resolved by the synchronizer, not the factory.
    if let Some(display) = style.get("display") {
        render_box.style.display = DisplayValue::parse(display).unwrap();
    }
    tree.alloc(render_box)
}

fn offset(tree: &RenderTree, id: BoxId) -> Point {
    tree.get(id).unwrap().offset
}

fn size(tree: &RenderTree, id: BoxId) -> Size {
    tree.get(id).unwrap().size
}

// ========== structure ==========

#[test]
fn test_insert_after_and_remove_keep_sibling_order() {
    let mut tree = RenderTree::new();
    let parent = make_box(&mut tree, 0, &[]);
    let a = make_box(&mut tree, 1, &[]);
    let b = make_box(&mut tree, 2, &[]);
    let c = make_box(&mut tree, 3, &[]);

    tree.insert_after(parent, a, None);
    tree.insert_after(parent, c, Some(a));
    tree.insert_after(parent, b, Some(a));
    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.index_in_parent(c), Some(2));

    assert_eq!(tree.remove(b), parent);
    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.parent(b), None);
}

#[test]
#[should_panic(expected = "has no parent box")]
fn test_removing_an_unhoused_box_panics() {
    let mut tree = RenderTree::new();
    let orphan = make_box(&mut tree, 1, &[]);
    let _ = tree.remove(orphan);
}

#[test]
#[should_panic(expected = "cannot host child boxes")]
fn test_intrinsic_boxes_cannot_host_children() {
    let mut tree = RenderTree::new();
    let image = make_box_with(&mut tree, 1, BoxKind::Intrinsic, &[]);
    let child = make_box(&mut tree, 2, &[]);
    tree.append(image, child);
}

#[test]
#[should_panic(expected = "already housed")]
fn test_box_cannot_have_two_parents() {
    let mut tree = RenderTree::new();
    let first = make_box(&mut tree, 0, &[]);
    let second = make_box(&mut tree, 1, &[]);
    let child = make_box(&mut tree, 2, &[]);
    tree.append(first, child);
    tree.append(second, child);
}

#[test]
fn test_replace_keeps_slot_and_out_of_flow_flag() {
    let mut tree = RenderTree::new();
    let parent = make_box(&mut tree, 0, &[]);
    let a = make_box(&mut tree, 1, &[]);
    let b = make_box(&mut tree, 2, &[]);
    tree.append(parent, a);
    tree.append(parent, b);
    tree.get_mut(a).unwrap().out_of_flow = true;

    let placeholder = tree.alloc(RenderBox::placeholder(NodeId(1), Size::ZERO));
    tree.replace(a, placeholder);

    assert_eq!(tree.children(parent), &[placeholder, b]);
    assert!(tree.get(placeholder).unwrap().out_of_flow);
    assert!(!tree.get(a).unwrap().out_of_flow);
}

#[test]
fn test_paint_invalidation_stops_at_repaint_boundary() {
    let mut tree = RenderTree::new();
    let root = make_box(&mut tree, 0, &[]);
    let boundary = tree.alloc(RenderBox::new(
        BoxKind::Layout(LayoutVariant::Flow),
        RepaintMode::SelfRepaint,
        Some(NodeId(1)),
    ));
    let leaf = make_box(&mut tree, 2, &[]);
    tree.append(root, boundary);
    tree.append(boundary, leaf);
    for id in [root, boundary, leaf] {
        let render_box = tree.get_mut(id).unwrap();
        render_box.needs_paint = false;
        render_box.needs_layout = false;
    }

    tree.mark_needs_paint(leaf);
    assert!(tree.get(leaf).unwrap().needs_paint);
    assert!(tree.get(boundary).unwrap().needs_paint);
    assert!(!tree.get(root).unwrap().needs_paint);
    assert!(!tree.get(leaf).unwrap().needs_layout);

    tree.mark_needs_layout(leaf);
    assert!(tree.get(root).unwrap().needs_layout);
}

// ========== geometry ==========

#[test]
fn test_global_position_subtracts_ancestor_scroll() {
    let mut tree = RenderTree::new();
    let root = make_box(&mut tree, 0, &[]);
    let scroller = make_box(&mut tree, 1, &[]);
    let item = make_box(&mut tree, 2, &[]);
    tree.append(root, scroller);
    tree.append(scroller, item);
    tree.get_mut(scroller).unwrap().offset = Point::new(10.0, 20.0);
    tree.get_mut(item).unwrap().offset = Point::new(0.0, 100.0);
    tree.get_mut(scroller).unwrap().scroll = Point::new(0.0, 30.0);

    assert_eq!(tree.global_position(item), Point::new(10.0, 90.0));
    // A box's own scroll never moves the box itself.
    assert_eq!(tree.global_position(scroller), Point::new(10.0, 20.0));

    tree.get_mut(item).unwrap().sticky_offset = Some(Point::new(0.0, 130.0));
    assert_eq!(tree.global_position(item), Point::new(10.0, 120.0));
}

// ========== reference layout ==========

#[test]
fn test_stack_layout_stacks_flow_children() {
    let mut tree = RenderTree::new();
    let root = make_box(&mut tree, 0, &[("padding", "10px")]);
    let first = make_box(&mut tree, 1, &[("height", "30px")]);
    let second = make_box(&mut tree, 2, &[("height", "20px"), ("margin-top", "5px")]);
    tree.append(root, first);
    tree.append(root, second);

    let mut layout = StackLayout::new();
    layout.flush(&mut tree, root, VIEWPORT);

    assert_eq!(offset(&tree, first), Point::new(10.0, 10.0));
    assert_eq!(size(&tree, first), Size::new(780.0, 30.0));
    assert_eq!(offset(&tree, second), Point::new(10.0, 45.0));
    assert_eq!(size(&tree, root), Size::new(800.0, 600.0));
    assert!(tree.get(second).unwrap().laid_out);
    assert_eq!(layout.passes(), 1);

    // Nothing pending: the second flush does no work.
    layout.flush(&mut tree, root, VIEWPORT);
    assert_eq!(layout.passes(), 1);
}

#[test]
fn test_stack_layout_splits_flex_rows() {
    let mut tree = RenderTree::new();
    let root = make_box(&mut tree, 0, &[]);
    let row = make_box_with(
        &mut tree,
        1,
        BoxKind::Layout(LayoutVariant::Flex),
        &[("width", "300px"), ("display", "flex")],
    );
    tree.append(root, row);
    let items: Vec<_> = (2..5)
        .map(|owner| {
            let id = make_box(&mut tree, owner, &[("height", "10px")]);
            tree.append(row, id);
            id
        })
        .collect();

    StackLayout::new().flush(&mut tree, root, VIEWPORT);

    let xs: Vec<f32> = items.iter().map(|&id| offset(&tree, id).x).collect();
    assert_eq!(xs, vec![0.0, 100.0, 200.0]);
    assert_eq!(size(&tree, row), Size::new(300.0, 10.0));
}

#[test]
fn test_stack_layout_places_out_of_flow_against_padding_box() {
    let mut tree = RenderTree::new();
    let root = make_box(&mut tree, 0, &[]);
    let container = make_box(&mut tree, 1, &[("width", "200px"), ("height", "100px")]);
    let floating = make_box(
        &mut tree,
        2,
        &[("right", "10px"), ("top", "5px"), ("width", "20px"), ("height", "20px")],
    );
    tree.append(root, container);
    tree.append(container, floating);
    tree.get_mut(floating).unwrap().out_of_flow = true;

    StackLayout::new().flush(&mut tree, root, VIEWPORT);

    assert_eq!(offset(&tree, floating), Point::new(170.0, 5.0));
    // Out-of-flow boxes do not contribute to the container's content height.
    assert_eq!(size(&tree, container).height, 100.0);
}

#[test]
fn test_display_none_collapses_subtree() {
    let mut tree = RenderTree::new();
    let root = make_box(&mut tree, 0, &[]);
    let hidden = make_box(&mut tree, 1, &[("display", "none"), ("height", "50px")]);
    let inner = make_box(&mut tree, 2, &[("height", "10px")]);
    let after = make_box(&mut tree, 3, &[("height", "10px")]);
    tree.append(root, hidden);
    tree.append(hidden, inner);
    tree.append(root, after);

    StackLayout::new().flush(&mut tree, root, VIEWPORT);

    assert_eq!(size(&tree, hidden), Size::ZERO);
    assert_eq!(size(&tree, inner), Size::ZERO);
    assert_eq!(offset(&tree, after), Point::ZERO);
}

#[test]
fn test_snapshot_serializes_subtree() {
    let mut tree = RenderTree::new();
    let root = make_box(&mut tree, 0, &[]);
    let child = make_box(&mut tree, 1, &[("height", "10px")]);
    tree.append(root, child);
    StackLayout::new().flush(&mut tree, root, VIEWPORT);

    let json = serde_json::to_value(tree.snapshot(root).unwrap()).unwrap();
    assert_eq!(json["kind"]["Layout"], "Flow");
    assert_eq!(json["children"].as_array().unwrap().len(), 1);
    assert_eq!(json["children"][0]["owner"], 1);
    assert_eq!(json["children"][0]["rect"]["height"], 10.0);
}
