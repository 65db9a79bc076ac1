//! Box factories: construct a fresh box, or a converted copy of a previous one.

use trellis_dom::{NodeId, StyleDeclaration};

use crate::capability;
use crate::render_box::{BoxKind, RenderBox, RepaintMode, VariantState};

/// What the synchronizer asks a factory to build.
#[derive(Debug, Clone, Copy)]
pub struct BoxSpec<'a> {
    /// The generating element.
    pub owner: NodeId,
    /// The resolved shape.
    pub kind: BoxKind,
    /// The requested repaint mode.
    pub repaint: RepaintMode,
    /// The element's live style.
    pub style: &'a StyleDeclaration,
}

/// Constructs render boxes for every variant.
pub trait BoxFactory {
    /// Build a new box for `blueprint` with every style capability applied.
    fn create(&self, blueprint: &BoxSpec<'_>) -> RenderBox;

    /// Build a box for `blueprint` that takes over the shared state of `previous`.
    ///
    /// Children are not part of the returned box; the synchronizer migrates
    /// them afterwards.
    fn convert(&self, previous: &RenderBox, blueprint: &BoxSpec<'_>) -> RenderBox;
}

/// The factory used when a document is created without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBoxFactory;

impl BoxFactory for DefaultBoxFactory {
    fn create(&self, blueprint: &BoxSpec<'_>) -> RenderBox {
        let mut render_box = RenderBox::new(blueprint.kind, blueprint.repaint, Some(blueprint.owner));
        let _ = capability::apply_all(&mut render_box, blueprint.style);
        render_box
    }

    fn convert(&self, previous: &RenderBox, blueprint: &BoxSpec<'_>) -> RenderBox {
        let mut render_box = RenderBox::new(blueprint.kind, blueprint.repaint, Some(blueprint.owner));
        render_box.style = previous.style.clone();
        render_box.preferred = previous.preferred;
        render_box.offset = previous.offset;
        render_box.size = previous.size;
        render_box.scroll = previous.scroll;
        render_box.sticky_offset = previous.sticky_offset;
        render_box.variant = VariantState::for_kind(blueprint.kind);
        capability::apply_variant(&mut render_box, blueprint.style);
        render_box
    }
}
