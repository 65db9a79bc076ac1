//! Containing-block resolution.
//!
//! [§ 10.1 Definition of "containing block"](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)

use trellis_dom::{ElementKind, NodeId};
use trellis_style::{PositionType, has_transform};

use crate::Document;

impl Document {
    /// The element whose box houses `element` when it is taken out of flow.
    ///
    /// "If the element has 'position: fixed', the containing block is
    /// established by the viewport."
    ///
    /// "If the element has 'position: absolute', the containing block is
    /// established by the nearest ancestor with a 'position' of 'absolute',
    /// 'relative' or 'fixed'."
    ///
    /// [CSS Transforms 1 § 6](https://www.w3.org/TR/css-transforms-1/#transform-rendering)
    /// extends this to transformed ancestors, and sticky ancestors are
    /// positioned too. Replaced elements never host boxes, so they are
    /// passed over. The walk starts at the parent and always ends at the
    /// root.
    #[must_use]
    pub fn find_containing_block(&self, element: NodeId) -> NodeId {
        let root = self.root();
        let is_fixed = self
            .elements
            .get(element)
            .is_some_and(|node| PositionType::of(&node.style) == PositionType::Fixed);
        if is_fixed {
            return root;
        }

        self.elements
            .ancestors(element)
            .find(|&ancestor| {
                ancestor == root
                    || self.elements.get(ancestor).is_some_and(|node| {
                        node.kind == ElementKind::Container
                            && (PositionType::of(&node.style).is_positioned()
                                || has_transform(&node.style))
                    })
            })
            .unwrap_or(root)
    }
}
