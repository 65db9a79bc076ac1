//! `filter`.

use trellis_dom::StyleDeclaration;

use super::{Capability, optional};
use crate::render_box::{Invalidation, RenderBox};

/// Filter capability.
#[derive(Debug, Clone, Copy)]
pub struct Filter;

impl Capability for Filter {
    fn apply(
        &self,
        target: &mut RenderBox,
        _style: &StyleDeclaration,
        _property: &str,
        value: &str,
    ) -> Invalidation {
        let filter = optional(value).filter(|v| !v.eq_ignore_ascii_case("none"));
        if filter == target.style.filter {
            return Invalidation::None;
        }
        target.style.filter = filter;
        Invalidation::Paint
    }
}
