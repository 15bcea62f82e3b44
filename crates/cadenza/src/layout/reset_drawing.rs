//! Drawing reset: clears every cycle-scoped cache before a new layout cycle.

use log::trace;

use crate::{
    document::{Document, NodeId},
    element::{ElementKind, LinkReset},
    functor::{FunctorMut, Visit},
};

/// Clears cached drawing state.
///
/// On every node the pass forgets computed coordinates and, on systems, every
/// positioner of the previous cycle. Nodes with links drop their resolutions
/// and run the reset of each equivalence target, whose own code then decides
/// how the walk continues. Whenever the walk is told to skip a subtree, that
/// subtree has already been reset. Facsimile zones are source data and are
/// left untouched.
///
/// Running the pass twice leaves the document as running it once.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResetDrawing;

/// Context of one [`ResetDrawing`] walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetDrawingParams {
    reset: usize,
    mirrored: usize,
    /// Elements whose propagation is running, guarding link cycles.
    in_progress: Vec<NodeId>,
}

impl ResetDrawingParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Floating nodes reset, counting repeated resets of the same node.
    pub fn reset_count(&self) -> usize {
        self.reset
    }

    /// Resets propagated onto equivalence targets.
    pub fn mirrored_count(&self) -> usize {
        self.mirrored
    }
}

impl FunctorMut for ResetDrawing {
    type Params = ResetDrawingParams;

    fn visit(&self, doc: &mut Document, node: NodeId, params: &mut Self::Params) -> Visit {
        self.reset_element(doc, node, params)
    }
}

impl ResetDrawing {
    /// Reset `node` and its equivalents, returning the code the walk continues with.
    ///
    /// The first equivalence target's code wins over the element's own one.
    fn reset_element(
        &self,
        doc: &mut Document,
        node: NodeId,
        params: &mut ResetDrawingParams,
    ) -> Visit {
        let current = doc.node_mut(node);

        if let Some(floating) = current.floating_mut() {
            floating.reset_drawing();
            params.reset += 1;
        }

        if let ElementKind::System(system) = current.kind_mut() {
            system.aligner_mut().clear();
        }

        let Some(linking) = current.linking_mut() else {
            return Visit::Continue;
        };

        let LinkReset { mirror, visit } = linking.reset_drawing(node);

        params.in_progress.push(node);

        let mut propagated = None;
        for target in mirror {
            if params.in_progress.contains(&target) {
                continue;
            }
            trace!(node:% = node, target:% = target; "Propagating drawing reset");
            params.mirrored += 1;
            let code = self.reset_element(doc, target, params);
            propagated.get_or_insert(code);
        }

        let visit = propagated.unwrap_or(visit);
        if visit == Visit::SkipToSiblings {
            self.reset_subtree(doc, node, params);
        }

        params.in_progress.pop();
        visit
    }

    /// Reset every descendant of `node`, which the walk will not descend into.
    fn reset_subtree(&self, doc: &mut Document, node: NodeId, params: &mut ResetDrawingParams) {
        let child_count = doc.children(node).len();
        for idx in 0..child_count {
            let child = doc.children(node)[idx];
            doc.process_mut(child, self, params);
        }
    }
}

impl Document {
    /// Run [`ResetDrawing`] over the whole document.
    pub fn reset_drawing(&mut self) -> ResetDrawingParams {
        let mut params = ResetDrawingParams::new();
        let root = self.root();
        self.process_mut(root, &ResetDrawing, &mut params);
        params
    }
}

#[cfg(test)]
mod tests {
    use cadenza_core::geometry::{Extent, Point, Zone};

    use super::*;
    use crate::{
        diagnostic::DiagnosticCollector,
        element::{ControlElement, ControlKind, Element, LinkRelation},
    };

    struct Fixture {
        doc: Document,
        system: NodeId,
        measure: NodeId,
        staff: NodeId,
    }

    fn fixture() -> Fixture {
        let mut doc = Document::new();
        let system = doc.add_child(doc.root(), Element::system(400.0)).unwrap();
        let measure = doc.add_child(system, Element::measure()).unwrap();
        let staff = doc.add_child(measure, Element::staff(1)).unwrap();

        Fixture {
            doc,
            system,
            measure,
            staff,
        }
    }

    fn dynam() -> Element {
        Element::control(ControlElement::new(ControlKind::Dynam))
    }

    fn place(doc: &mut Document, node: NodeId) {
        doc.node_mut(node)
            .floating_mut()
            .unwrap()
            .set_drawing_position(Point::new(10.0, 20.0));
    }

    fn is_reset(doc: &Document, node: NodeId) -> bool {
        doc.node(node).floating().unwrap().is_reset()
    }

    #[test]
    fn test_reset_clears_coordinates_and_aligner() {
        let mut f = fixture();
        let dynam = f.doc.add_child(f.measure, dynam()).unwrap();
        place(&mut f.doc, dynam);
        f.doc
            .system_mut(f.system)
            .unwrap()
            .aligner_mut()
            .add_positioner(f.staff, dynam, Extent::new(0.0, 30.0));

        let params = f.doc.reset_drawing();

        assert!(is_reset(&f.doc, dynam));
        assert!(f.doc.system(f.system).unwrap().aligner().is_empty());
        assert_eq!(params.reset_count(), 1);
        assert_eq!(params.mirrored_count(), 0);
    }

    #[test]
    fn test_reset_keeps_facsimile_zone() {
        let mut f = fixture();
        let zone = Zone::new(1.0, 2.0, 3.0, 4.0);
        let dynam = f.doc.add_child(f.measure, dynam().with_zone(zone)).unwrap();

        f.doc.reset_drawing();

        assert_eq!(f.doc.node(dynam).facsimile().unwrap().zone(), Some(zone));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut f = fixture();
        let first = f.doc.add_child(f.measure, dynam().with_id("d1")).unwrap();
        let second = f
            .doc
            .add_child(f.measure, dynam().with_link(LinkRelation::Equivalence, "d1"))
            .unwrap();
        f.doc.prepare_linking(&mut DiagnosticCollector::new());
        place(&mut f.doc, first);
        place(&mut f.doc, second);

        f.doc.reset_drawing();
        let once: Vec<_> = [first, second]
            .iter()
            .map(|&n| (f.doc.drawing_x(n), f.doc.drawing_y(n)))
            .collect();
        let params = f.doc.reset_drawing();
        let twice: Vec<_> = [first, second]
            .iter()
            .map(|&n| (f.doc.drawing_x(n), f.doc.drawing_y(n)))
            .collect();

        assert_eq!(once, twice);
        assert_eq!(once, vec![(None, None), (None, None)]);
        assert_eq!(params.mirrored_count(), 0);
    }

    #[test]
    fn test_equivalence_runs_target_reset() {
        let mut f = fixture();
        let second = f
            .doc
            .add_child(f.measure, dynam().with_link(LinkRelation::Equivalence, "d-target"))
            .unwrap();
        let target = f.doc.add_child(f.measure, dynam().with_id("d-target")).unwrap();
        f.doc.prepare_linking(&mut DiagnosticCollector::new());
        place(&mut f.doc, target);

        let mut params = ResetDrawingParams::new();
        let visit = ResetDrawing.visit(&mut f.doc, second, &mut params);

        assert_eq!(visit, Visit::Continue);
        assert!(is_reset(&f.doc, target));
        assert_eq!(params.mirrored_count(), 1);
        assert!(f.doc.node(second).linking().unwrap().links()[0].resolved().is_none());
    }

    #[test]
    fn test_equivalence_returns_target_code() {
        let mut f = fixture();
        f.doc.add_child(f.measure, dynam().with_id("original")).unwrap();
        let copy = f
            .doc
            .add_child(
                f.measure,
                dynam().with_id("copy").with_link(LinkRelation::Copy, "original"),
            )
            .unwrap();
        let same = f
            .doc
            .add_child(f.measure, dynam().with_link(LinkRelation::Equivalence, "copy"))
            .unwrap();
        let inside_same = f.doc.add_child(same, dynam()).unwrap();
        f.doc.prepare_linking(&mut DiagnosticCollector::new());
        for node in [copy, same, inside_same] {
            place(&mut f.doc, node);
        }

        let mut params = ResetDrawingParams::new();
        let visit = ResetDrawing.visit(&mut f.doc, same, &mut params);

        assert_eq!(visit, Visit::SkipToSiblings);
        assert!(is_reset(&f.doc, copy));
        assert_eq!(
            f.doc.node(copy).linking().unwrap().resolved_target(LinkRelation::Copy),
            None
        );
        // The walk skips the subtree, so it was reset on the spot.
        assert!(is_reset(&f.doc, inside_same));
        assert_eq!(params.mirrored_count(), 1);
    }

    #[test]
    fn test_equivalence_cycle_terminates() {
        let mut f = fixture();
        let first = f
            .doc
            .add_child(
                f.measure,
                dynam().with_id("a").with_link(LinkRelation::Equivalence, "b"),
            )
            .unwrap();
        let second = f
            .doc
            .add_child(
                f.measure,
                dynam().with_id("b").with_link(LinkRelation::Equivalence, "a"),
            )
            .unwrap();
        f.doc.prepare_linking(&mut DiagnosticCollector::new());
        place(&mut f.doc, second);

        let mut params = ResetDrawingParams::new();
        let visit = ResetDrawing.visit(&mut f.doc, first, &mut params);

        assert_eq!(visit, Visit::Continue);
        assert!(is_reset(&f.doc, second));
        assert_eq!(params.mirrored_count(), 1);
        assert!(f.doc.node(second).linking().unwrap().links()[0].resolved().is_none());
    }

    #[test]
    fn test_copy_content_is_reset() {
        let mut f = fixture();
        f.doc.add_child(f.measure, dynam().with_id("original")).unwrap();
        let copy = f
            .doc
            .add_child(f.measure, dynam().with_link(LinkRelation::Copy, "original"))
            .unwrap();
        let inner = f.doc.add_child(copy, Element::rend(None)).unwrap();
        let nested = f.doc.add_child(copy, dynam()).unwrap();
        let deeper = f.doc.add_child(nested, dynam()).unwrap();
        place(&mut f.doc, nested);
        place(&mut f.doc, deeper);

        let visit = ResetDrawing.visit(&mut f.doc, copy, &mut ResetDrawingParams::new());

        assert_eq!(visit, Visit::SkipToSiblings);
        assert!(f.doc.node(inner).floating().is_none());
        assert!(is_reset(&f.doc, nested));
        assert!(is_reset(&f.doc, deeper));

        place(&mut f.doc, nested);
        f.doc.reset_drawing();
        f.doc.reset_drawing();
        assert_eq!(f.doc.drawing_x(nested), None);
    }
}
