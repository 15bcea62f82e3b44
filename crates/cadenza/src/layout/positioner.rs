//! Positioners: the measured extent of one floating element on one staff.

use cadenza_core::geometry::Extent;

use crate::document::NodeId;

/// Bounding extent of one rendered instance of a floating element.
///
/// A floating element spanning several staves is rendered once per staff, with
/// possibly different staff sizes, so it owns one positioner per staff. Both
/// references are identities only; the positioner owns neither node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Positioner {
    staff: NodeId,
    element: NodeId,
    content: Extent,
}

impl Positioner {
    pub fn new(staff: NodeId, element: NodeId, content: Extent) -> Self {
        Self {
            staff,
            element,
            content,
        }
    }

    /// Staff this instance is drawn on.
    pub fn staff(&self) -> NodeId {
        self.staff
    }

    /// Floating element this instance renders.
    pub fn element(&self) -> NodeId {
        self.element
    }

    /// Horizontal content extent, in layout units.
    pub fn content(&self) -> Extent {
        self.content
    }

    pub fn content_left(&self) -> f32 {
        self.content.left()
    }

    pub fn content_right(&self) -> f32 {
        self.content.right()
    }
}
