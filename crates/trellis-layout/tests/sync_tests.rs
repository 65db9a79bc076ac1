//! Tests for the box-variant synchronizer and the capabilities it applies.

use trellis_common::Axis;
use trellis_dom::{ElementKind, NodeId, StyleDeclaration};
use trellis_layout::capability::{self, Capability};
use trellis_layout::{
    BoxId, BoxKind, BoxRequest, DefaultBoxFactory, Invalidation, LayoutVariant, RenderBox, RenderTree,
    RepaintMode, VariantState, resolve_kind, sync_box,
};
use trellis_style::{DisplayValue, PropertyCategory};

fn style(pairs: &[(&str, &str)]) -> StyleDeclaration {
    let mut style = StyleDeclaration::new();
    for (name, value) in pairs {
        let _ = style.set(name, value);
    }
    style
}

fn request(owner: usize, style: &StyleDeclaration, repaint: RepaintMode) -> BoxRequest<'_> {
    BoxRequest {
        owner: NodeId(owner),
        element: ElementKind::Container,
        tag_name: "div",
        repaint,
        style,
        placement: None,
    }
}

/// Helper: a parent box holding one child box, which itself holds two
/// grandchildren. Returns (tree, parent, child, grandchildren).
fn nested_tree(child_style: &StyleDeclaration) -> (RenderTree, BoxId, BoxId, Vec<BoxId>) {
    let mut tree = RenderTree::new();
    let empty = StyleDeclaration::new();
    let factory = DefaultBoxFactory;

    let parent = sync_box(&mut tree, &factory, &request(0, &empty, RepaintMode::SelfRepaint), None);
    let child = sync_box(&mut tree, &factory, &request(1, child_style, RepaintMode::ParentRepaint), None);
    tree.append(parent, child);

    let grandchildren: Vec<_> = (2..4)
        .map(|owner| {
            let id = sync_box(&mut tree, &factory, &request(owner, &empty, RepaintMode::ParentRepaint), None);
            tree.append(child, id);
            id
        })
        .collect();
    (tree, parent, child, grandchildren)
}

// ========== resolution ==========

#[test]
fn test_resolve_kind_table() {
    assert_eq!(
        resolve_kind(ElementKind::Container, DisplayValue::Inline, None),
        BoxKind::Layout(LayoutVariant::Flow)
    );
    assert_eq!(
        resolve_kind(ElementKind::Container, DisplayValue::InlineFlex, None),
        BoxKind::Layout(LayoutVariant::Flex)
    );
    assert_eq!(
        resolve_kind(ElementKind::Container, DisplayValue::List, None),
        BoxKind::Layout(LayoutVariant::Recycler)
    );
    assert_eq!(
        resolve_kind(ElementKind::Replaced, DisplayValue::Flex, None),
        BoxKind::Intrinsic
    );
}

#[test]
fn test_leaving_recycler_lands_in_flow() {
    let recycler = Some(BoxKind::Layout(LayoutVariant::Recycler));
    assert_eq!(
        resolve_kind(ElementKind::Container, DisplayValue::Flex, recycler),
        BoxKind::Layout(LayoutVariant::Flow)
    );
    assert_eq!(
        resolve_kind(ElementKind::Container, DisplayValue::Block, recycler),
        BoxKind::Layout(LayoutVariant::Flow)
    );
}

// ========== reuse and conversion ==========

#[test]
fn test_block_flex_block_creates_new_boxes_and_keeps_children() {
    let mut child_style = style(&[("padding", "4px")]);
    let (mut tree, parent, block, grandchildren) = nested_tree(&child_style);
    let factory = DefaultBoxFactory;

    // Same variant and mode: no churn.
    let same = sync_box(&mut tree, &factory, &request(1, &child_style, RepaintMode::ParentRepaint), Some(block));
    assert_eq!(same, block);

    let _ = child_style.set("display", "flex");
    let flex = sync_box(&mut tree, &factory, &request(1, &child_style, RepaintMode::ParentRepaint), Some(block));
    assert_ne!(flex, block);
    assert!(!tree.contains(block));
    assert_eq!(tree.children(parent), &[flex]);
    assert_eq!(tree.children(flex), grandchildren.as_slice());
    assert_eq!(tree.get(flex).unwrap().kind, BoxKind::Layout(LayoutVariant::Flex));
    assert_eq!(tree.get(flex).unwrap().style.padding.top, 4.0);
    for &grandchild in &grandchildren {
        assert_eq!(tree.parent(grandchild), Some(flex));
    }

    let _ = child_style.set("display", "block");
    let back = sync_box(&mut tree, &factory, &request(1, &child_style, RepaintMode::ParentRepaint), Some(flex));
    assert_ne!(back, flex);
    assert!(!tree.contains(flex));
    assert_eq!(tree.children(parent), &[back]);
    assert_eq!(tree.children(back), grandchildren.as_slice());
}

#[test]
fn test_repaint_mode_change_converts_same_variant() {
    let child_style = style(&[("margin", "2px"), ("background-color", "red")]);
    let (mut tree, parent, child, grandchildren) = nested_tree(&child_style);

    let converted = sync_box(
        &mut tree,
        &DefaultBoxFactory,
        &request(1, &child_style, RepaintMode::SelfRepaint),
        Some(child),
    );
    assert_ne!(converted, child);
    let converted_box = tree.get(converted).unwrap();
    assert_eq!(converted_box.kind, BoxKind::Layout(LayoutVariant::Flow));
    assert_eq!(converted_box.repaint, RepaintMode::SelfRepaint);
    assert_eq!(converted_box.style.margin.left, 2.0);
    assert_eq!(
        converted_box.style.paint.get("background-color").map(String::as_str),
        Some("red")
    );
    assert_eq!(tree.children(parent), &[converted]);
    assert_eq!(tree.children(converted), grandchildren.as_slice());
}

#[test]
fn test_conversion_rebuilds_variant_state_from_style() {
    let mut child_style = style(&[("flex-direction", "column")]);
    let (mut tree, _, child, _) = nested_tree(&child_style);
    assert_eq!(tree.get(child).unwrap().variant, VariantState::Flow);

    let _ = child_style.set("display", "flex");
    let flex = sync_box(
        &mut tree,
        &DefaultBoxFactory,
        &request(1, &child_style, RepaintMode::ParentRepaint),
        Some(child),
    );
    match &tree.get(flex).unwrap().variant {
        VariantState::Flex(state) => assert_eq!(state.main_axis, Axis::Vertical),
        other => panic!("expected flex state, got {other:?}"),
    }
}

#[test]
fn test_replacement_takes_the_requested_slot() {
    let mut tree = RenderTree::new();
    let empty = StyleDeclaration::new();
    let factory = DefaultBoxFactory;
    let parent = sync_box(&mut tree, &factory, &request(0, &empty, RepaintMode::SelfRepaint), None);
    let ids: Vec<_> = (1..4)
        .map(|owner| {
            let id = sync_box(&mut tree, &factory, &request(owner, &empty, RepaintMode::ParentRepaint), None);
            tree.append(parent, id);
            id
        })
        .collect();

    let flex_style = style(&[("display", "flex")]);
    let mut middle = request(2, &flex_style, RepaintMode::ParentRepaint);
    middle.placement = Some(ids[0]);
    let replaced = sync_box(&mut tree, &factory, &middle, Some(ids[1]));

    assert_eq!(tree.children(parent), &[ids[0], replaced, ids[2]]);
}

#[test]
#[should_panic(expected = "cannot build a box")]
fn test_unknown_display_is_fatal() {
    let mut tree = RenderTree::new();
    let grid = style(&[("display", "grid")]);
    let _ = sync_box(&mut tree, &DefaultBoxFactory, &request(1, &grid, RepaintMode::ParentRepaint), None);
}

// ========== capabilities ==========

#[test]
fn test_paint_capabilities_report_paint_only() {
    let declared = style(&[("opacity", "0.5"), ("transform", "rotate(5deg)"), ("color", "blue")]);
    let mut target = RenderBox::new(
        BoxKind::Layout(LayoutVariant::Flow),
        RepaintMode::ParentRepaint,
        Some(NodeId(1)),
    );

    for (name, value) in [("opacity", "0.5"), ("transform", "rotate(5deg)"), ("color", "blue")] {
        let category = PropertyCategory::classify(name).unwrap();
        let capability = capability::for_category(category).unwrap();
        assert_eq!(capability.apply(&mut target, &declared, name, value), Invalidation::Paint);
    }
    assert_eq!(target.style.opacity, 0.5);
    assert_eq!(target.style.transform.as_deref(), Some("rotate(5deg)"));
}

#[test]
fn test_geometry_capabilities_report_layout() {
    let declared = style(&[("width", "120px"), ("border-top-width", "3px")]);
    let mut target = RenderBox::new(BoxKind::Intrinsic, RepaintMode::ParentRepaint, Some(NodeId(1)));

    let sizing = capability::for_category(PropertyCategory::Size).unwrap();
    assert_eq!(sizing.apply(&mut target, &declared, "width", "120px"), Invalidation::Layout);
    assert_eq!(target.preferred.width, 120.0);

    let decoration = capability::for_category(PropertyCategory::Paint).unwrap();
    assert_eq!(
        decoration.apply(&mut target, &declared, "border-top-width", "3px"),
        Invalidation::Layout
    );
    assert_eq!(target.style.border.top, 3.0);
}

#[test]
fn test_display_has_no_capability() {
    assert!(capability::for_category(PropertyCategory::Display).is_none());
}

#[test]
fn test_transition_capability_commits_current_value() {
    let declared = style(&[("transition", "opacity 1s")]);
    let mut target = RenderBox::new(
        BoxKind::Layout(LayoutVariant::Flow),
        RepaintMode::ParentRepaint,
        Some(NodeId(1)),
    );
    let transition = capability::Transition;
    assert_eq!(transition.apply(&mut target, &declared, "transition", ""), Invalidation::Paint);
    assert_eq!(target.style.transition.as_deref(), Some("opacity 1s"));
    // Committing the same value again is a no-op.
    assert_eq!(transition.apply(&mut target, &declared, "transition", ""), Invalidation::None);
}
