//! Floating objects and their drawing position.

use cadenza_core::{data::RenderMode, geometry::Point};

use crate::document::{Document, NodeId};

/// Drawing coordinates cached for one layout cycle.
///
/// Both coordinates start unset, are filled in by the placement stage, and go
/// back to unset when the drawing state is reset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FloatingObject {
    drawing_x: Option<f32>,
    drawing_y: Option<f32>,
}

impl FloatingObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computed layout x, if placement ran in this cycle.
    pub fn drawing_x(&self) -> Option<f32> {
        self.drawing_x
    }

    /// Computed layout y, if placement ran in this cycle.
    pub fn drawing_y(&self) -> Option<f32> {
        self.drawing_y
    }

    pub fn set_drawing_x(&mut self, x: f32) {
        self.drawing_x = Some(x);
    }

    pub fn set_drawing_y(&mut self, y: f32) {
        self.drawing_y = Some(y);
    }

    /// Set both coordinates at once.
    pub fn set_drawing_position(&mut self, position: Point) {
        self.drawing_x = Some(position.x());
        self.drawing_y = Some(position.y());
    }

    /// Returns `true` if no coordinate is cached.
    pub fn is_reset(&self) -> bool {
        self.drawing_x.is_none() && self.drawing_y.is_none()
    }

    /// Forget the cached coordinates.
    pub fn reset_drawing(&mut self) {
        self.drawing_x = None;
        self.drawing_y = None;
    }
}

impl Document {
    /// Drawing x of a floating node.
    ///
    /// When the document renders in [`RenderMode::Facsimile`] and the node has a
    /// facsimile zone, the zone's upper-left x is returned. Otherwise the
    /// computed layout x is returned, which is `None` before placement and
    /// after a reset. The mode is checked on every call.
    pub fn drawing_x(&self, node: NodeId) -> Option<f32> {
        self.drawing_position(node, Point::x, FloatingObject::drawing_x)
    }

    /// Drawing y of a floating node; see [`Document::drawing_x`].
    pub fn drawing_y(&self, node: NodeId) -> Option<f32> {
        self.drawing_position(node, Point::y, FloatingObject::drawing_y)
    }

    fn drawing_position(
        &self,
        node: NodeId,
        from_zone: fn(Point) -> f32,
        from_layout: fn(&FloatingObject) -> Option<f32>,
    ) -> Option<f32> {
        let node = self.node(node);

        if self.render_mode() == RenderMode::Facsimile {
            if let Some(zone) = node.facsimile().and_then(|facsimile| facsimile.zone()) {
                return Some(from_zone(zone.upper_left()));
            }
        }

        node.floating().and_then(from_layout)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use cadenza_core::geometry::Zone;

    use super::*;
    use crate::element::{ControlElement, ControlKind, Element};

    fn dynam_with_zone(doc: &mut Document, zone: Option<Zone>) -> NodeId {
        let system = doc.add_child(doc.root(), Element::system(900.0)).unwrap();
        let measure = doc.add_child(system, Element::measure()).unwrap();
        let mut element = Element::control(ControlElement::new(ControlKind::Dynam));
        if let Some(zone) = zone {
            element = element.with_zone(zone);
        }
        doc.add_child(measure, element).unwrap()
    }

    #[test]
    fn test_floating_object_starts_reset() {
        let floating = FloatingObject::new();

        assert!(floating.is_reset());
        assert_eq!(floating.drawing_x(), None);
        assert_eq!(floating.drawing_y(), None);
    }

    #[test]
    fn test_floating_object_reset_clears_both() {
        let mut floating = FloatingObject::new();
        floating.set_drawing_position(Point::new(10.0, 20.0));
        assert!(!floating.is_reset());

        floating.reset_drawing();
        assert!(floating.is_reset());
    }

    #[test]
    fn test_layout_mode_uses_computed_position() {
        let mut doc = Document::new();
        let dynam = dynam_with_zone(&mut doc, Some(Zone::new(500.0, 600.0, 520.0, 640.0)));
        doc.node_mut(dynam)
            .floating_mut()
            .unwrap()
            .set_drawing_position(Point::new(42.0, 84.0));

        assert_approx_eq!(f32, doc.drawing_x(dynam).unwrap(), 42.0);
        assert_approx_eq!(f32, doc.drawing_y(dynam).unwrap(), 84.0);
    }

    #[test]
    fn test_facsimile_mode_uses_zone() {
        let mut doc = Document::new().with_render_mode(RenderMode::Facsimile);
        let dynam = dynam_with_zone(&mut doc, Some(Zone::new(500.0, 600.0, 520.0, 640.0)));
        doc.node_mut(dynam)
            .floating_mut()
            .unwrap()
            .set_drawing_position(Point::new(42.0, 84.0));

        assert_approx_eq!(f32, doc.drawing_x(dynam).unwrap(), 500.0);
        assert_approx_eq!(f32, doc.drawing_y(dynam).unwrap(), 600.0);
    }

    #[test]
    fn test_facsimile_mode_without_zone_falls_back() {
        let mut doc = Document::new().with_render_mode(RenderMode::Facsimile);
        let dynam = dynam_with_zone(&mut doc, None);
        doc.node_mut(dynam)
            .floating_mut()
            .unwrap()
            .set_drawing_x(7.0);

        assert_approx_eq!(f32, doc.drawing_x(dynam).unwrap(), 7.0);
        assert_eq!(doc.drawing_y(dynam), None);
    }

    #[test]
    fn test_mode_switch_is_seen_without_rebuild() {
        let mut doc = Document::new();
        let dynam = dynam_with_zone(&mut doc, Some(Zone::new(300.0, 310.0, 330.0, 350.0)));
        doc.node_mut(dynam)
            .floating_mut()
            .unwrap()
            .set_drawing_position(Point::new(1.0, 2.0));

        assert_approx_eq!(f32, doc.drawing_x(dynam).unwrap(), 1.0);
        doc.set_render_mode(RenderMode::Facsimile);
        assert_approx_eq!(f32, doc.drawing_x(dynam).unwrap(), 300.0);
        doc.set_render_mode(RenderMode::Layout);
        assert_approx_eq!(f32, doc.drawing_x(dynam).unwrap(), 1.0);
    }

    #[test]
    fn test_non_floating_node_has_no_position() {
        let doc = Document::new();
        assert_eq!(doc.drawing_x(doc.root()), None);
    }
}
