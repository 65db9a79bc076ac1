//! Box-variant synchronizer.
//!
//! Chooses the box an element should own for its current display and repaint
//! mode, and converts the existing box in place when either changes. A box is
//! only ever replaced, never rebuilt: children move to the replacement and the
//! replacement takes the old box's slot in its parent.

use trellis_dom::{ElementKind, NodeId, StyleDeclaration};
use trellis_style::{DisplayValue, computed_display};

use crate::factory::{BoxFactory, BoxSpec};
use crate::render_box::{BoxId, BoxKind, LayoutVariant, RepaintMode};
use crate::tree::RenderTree;

/// Everything the synchronizer needs to know about an element.
#[derive(Debug, Clone, Copy)]
pub struct BoxRequest<'a> {
    /// The element.
    pub owner: NodeId,
    /// Its tag classification.
    pub element: ElementKind,
    /// Its tag name, for the default display.
    pub tag_name: &'a str,
    /// The requested repaint mode.
    pub repaint: RepaintMode,
    /// Its live style.
    pub style: &'a StyleDeclaration,
    /// Where a replacement goes in the old box's parent: right after this
    /// box, or first when `None`.
    pub placement: Option<BoxId>,
}

/// Resolve the box shape for an element.
///
/// Replaced elements are always intrinsic. Leaving a recycler list always
/// lands in flow: a recycler never turns into a flex container directly.
#[must_use]
pub fn resolve_kind(
    element: ElementKind,
    display: DisplayValue,
    previous: Option<BoxKind>,
) -> BoxKind {
    if element == ElementKind::Replaced {
        return BoxKind::Intrinsic;
    }
    let variant = LayoutVariant::from(display.layout_model());
    let leaving_recycler = previous.and_then(BoxKind::variant) == Some(LayoutVariant::Recycler);
    if leaving_recycler && variant == LayoutVariant::Flex {
        return BoxKind::Layout(LayoutVariant::Flow);
    }
    BoxKind::Layout(variant)
}

/// Return the box `request.owner` should own, reusing `previous` when its
/// variant and repaint mode already match.
///
/// When `previous` is housed, the replacement is inserted into the same
/// parent at `request.placement` before `previous` is destroyed, so the
/// element never owns two boxes.
///
/// # Panics
///
/// Panics if the element's display cannot be resolved, or if `previous` is
/// not a live box.
pub fn sync_box(
    tree: &mut RenderTree,
    factory: &dyn BoxFactory,
    request: &BoxRequest<'_>,
    previous: Option<BoxId>,
) -> BoxId {
    let display = match computed_display(request.style, request.tag_name) {
        Ok(display) => display,
        Err(err) => panic!("cannot build a box for element {}: {err}", request.owner),
    };

    let Some(previous) = previous else {
        let kind = resolve_kind(request.element, display, None);
        let mut render_box = factory.create(&BoxSpec {
            owner: request.owner,
            kind,
            repaint: request.repaint,
            style: request.style,
        });
        render_box.style.display = display;
        let id = tree.alloc(render_box);
        log::trace!("created {kind:?} box {id:?} for {}", request.owner);
        return id;
    };

    let Some(old) = tree.get(previous) else {
        panic!("{previous:?} is not a live box");
    };
    let kind = resolve_kind(request.element, display, Some(old.kind));
    if old.kind == kind && old.repaint == request.repaint {
        if old.style.display != display {
            if let Some(old) = tree.get_mut(previous) {
                old.style.display = display;
            }
            tree.mark_needs_layout(previous);
        }
        return previous;
    }

    let mut replacement = factory.convert(
        old,
        &BoxSpec {
            owner: request.owner,
            kind,
            repaint: request.repaint,
            style: request.style,
        },
    );
    replacement.style.display = display;
    let out_of_flow = old.out_of_flow;
    let housed = old.parent.is_some();
    let replacement_id = tree.alloc(replacement);
    log::debug!(
        "converting {previous:?} to {kind:?}/{} as {replacement_id:?} for {}",
        request.repaint,
        request.owner
    );

    tree.migrate_children(previous, replacement_id);
    if housed {
        let parent = tree.remove(previous);
        tree.insert_after(parent, replacement_id, request.placement);
        if let Some(replacement) = tree.get_mut(replacement_id) {
            replacement.out_of_flow = out_of_flow;
        }
    }
    tree.destroy(previous);
    tree.mark_needs_layout(replacement_id);
    replacement_id
}
