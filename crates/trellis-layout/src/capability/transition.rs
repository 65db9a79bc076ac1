//! `transition` and its longhands.
//!
//! The document defers calls to this capability to the next frame so every
//! write made during the frame is visible when the value is committed.

use trellis_dom::StyleDeclaration;

use super::Capability;
use crate::render_box::{Invalidation, RenderBox};

/// Transition capability.
#[derive(Debug, Clone, Copy)]
pub struct Transition;

impl Capability for Transition {
    fn apply(
        &self,
        target: &mut RenderBox,
        style: &StyleDeclaration,
        _property: &str,
        _value: &str,
    ) -> Invalidation {
        let committed = committed_transition(style);
        if committed == target.style.transition {
            return Invalidation::None;
        }
        log::debug!("committing transition {committed:?}");
        target.style.transition = committed;
        Invalidation::Paint
    }
}

/// The shorthand when present, else the longhands joined in declaration
/// order of the shorthand's grammar.
fn committed_transition(style: &StyleDeclaration) -> Option<String> {
    if let Some(shorthand) = style.get("transition") {
        return Some(shorthand.to_string());
    }
    let longhands: Vec<&str> = [
        "transition-property",
        "transition-duration",
        "transition-timing-function",
        "transition-delay",
    ]
    .iter()
    .filter_map(|name| style.get(name))
    .collect();
    (!longhands.is_empty()).then(|| longhands.join(" "))
}
