//! Link preparation: resolve declared link targets to document nodes.

use log::debug;

use crate::{
    diagnostic::{Diagnostic, DiagnosticCode, DiagnosticCollector},
    document::{Document, NodeId},
    element::LinkRelation,
    functor::{FunctorMut, Visit},
};

/// Resolves every declared link through the document's identity index.
///
/// Targets that do not exist are reported and stay unresolved; the rest of
/// the walk is unaffected. `sameas` and `copyof` targets must carry drawing
/// state themselves, since resets propagate onto them: a target without it is
/// an error and the link stays unresolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrepareLinking;

/// Context of one [`PrepareLinking`] walk.
#[derive(Debug, Default)]
pub struct PrepareLinkingParams {
    resolved: usize,
    diagnostics: DiagnosticCollector,
}

impl PrepareLinkingParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Links resolved so far.
    pub fn resolved_count(&self) -> usize {
        self.resolved
    }

    pub fn diagnostics(&self) -> &DiagnosticCollector {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> DiagnosticCollector {
        self.diagnostics
    }
}

impl FunctorMut for PrepareLinking {
    type Params = PrepareLinkingParams;

    fn visit(&self, doc: &mut Document, node: NodeId, params: &mut Self::Params) -> Visit {
        let current = doc.node(node);
        let Some(linking) = current.linking() else {
            return Visit::Continue;
        };

        let mut resolutions = Vec::with_capacity(linking.links().len());
        for (index, link) in linking.links().iter().enumerate() {
            match doc.find_by_id(link.target()) {
                Some(target)
                    if link.relation() != LinkRelation::Correspondence
                        && doc.node(target).linking().is_none() =>
                {
                    let target_class = doc.node(target).class_name();
                    debug!(
                        class = current.class_name(),
                        id:% = current.id(),
                        relation:% = link.relation(),
                        target:% = link.target(),
                        target_class;
                        "Link target cannot carry drawing state"
                    );
                    params.diagnostics.emit(
                        Diagnostic::error(format!(
                            "{} target '{}' is a '{target_class}', which has no drawing state",
                            link.relation(),
                            link.target()
                        ))
                        .with_code(DiagnosticCode::E200)
                        .with_element(current.class_name(), current.id()),
                    );
                }
                Some(target) => resolutions.push((index, target)),
                None => {
                    debug!(
                        class = current.class_name(),
                        id:% = current.id(),
                        relation:% = link.relation(),
                        target:% = link.target();
                        "Unresolved link target"
                    );
                    params.diagnostics.emit(
                        Diagnostic::warning(format!(
                            "{} target '{}' does not exist",
                            link.relation(),
                            link.target()
                        ))
                        .with_code(DiagnosticCode::W200)
                        .with_element(current.class_name(), current.id()),
                    );
                }
            }
        }

        if let Some(linking) = doc.node_mut(node).linking_mut() {
            for (index, target) in resolutions {
                linking.resolve(index, target);
                params.resolved += 1;
            }
        }

        Visit::Continue
    }
}

impl Document {
    /// Run [`PrepareLinking`] over the whole document.
    ///
    /// Returns the number of links resolved; diagnostics are appended to
    /// `diagnostics`.
    pub fn prepare_linking(&mut self, diagnostics: &mut DiagnosticCollector) -> usize {
        let mut params = PrepareLinkingParams::new();
        let root = self.root();
        self.process_mut(root, &PrepareLinking, &mut params);

        let resolved = params.resolved_count();
        diagnostics.merge(params.into_diagnostics());
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ControlElement, ControlKind, Element, LinkRelation};

    fn with_measure() -> (Document, NodeId) {
        let mut doc = Document::new();
        let system = doc.add_child(doc.root(), Element::system(400.0)).unwrap();
        let measure = doc.add_child(system, Element::measure()).unwrap();
        (doc, measure)
    }

    fn dir() -> Element {
        Element::control(ControlElement::new(ControlKind::Dir))
    }

    #[test]
    fn test_links_resolve_through_identity_index() {
        let (mut doc, measure) = with_measure();
        let linked = doc
            .add_child(
                measure,
                dir()
                    .with_link(LinkRelation::Equivalence, "dir-b")
                    .with_link(LinkRelation::Correspondence, "dir-a"),
            )
            .unwrap();
        let target = doc.add_child(measure, dir().with_id("dir-b")).unwrap();
        let original = doc.add_child(measure, dir().with_id("dir-a")).unwrap();
        let mut diagnostics = DiagnosticCollector::new();

        let resolved = doc.prepare_linking(&mut diagnostics);

        assert_eq!(resolved, 2);
        assert!(diagnostics.is_empty());
        let linking = doc.node(linked).linking().unwrap();
        assert_eq!(linking.resolved_target(LinkRelation::Equivalence), Some(target));
        assert_eq!(linking.resolved_target(LinkRelation::Correspondence), Some(original));
    }

    #[test]
    fn test_unresolved_target_is_reported() {
        let (mut doc, measure) = with_measure();
        let linked = doc
            .add_child(measure, dir().with_id("dir-1").with_link(LinkRelation::Copy, "ghost"))
            .unwrap();
        let mut diagnostics = DiagnosticCollector::new();

        let resolved = doc.prepare_linking(&mut diagnostics);

        assert_eq!(resolved, 0);
        assert_eq!(diagnostics.len(), 1);
        let diag = &diagnostics.diagnostics()[0];
        assert_eq!(diag.code(), Some(DiagnosticCode::W200));
        assert_eq!(diag.message(), "copyof target 'ghost' does not exist");
        assert_eq!(diag.element().map(|e| e.class()), Some("dir"));
        assert_eq!(
            doc.node(linked).linking().unwrap().resolved_target(LinkRelation::Copy),
            None
        );
    }

    #[test]
    fn test_equivalence_to_structural_element_is_an_error() {
        let mut doc = Document::new();
        let system = doc.add_child(doc.root(), Element::system(400.0)).unwrap();
        let measure = doc
            .add_child(system, Element::measure().with_id("m-1"))
            .unwrap();
        let same = doc
            .add_child(measure, dir().with_link(LinkRelation::Equivalence, "m-1"))
            .unwrap();
        let corresp = doc
            .add_child(measure, dir().with_link(LinkRelation::Correspondence, "m-1"))
            .unwrap();
        let mut diagnostics = DiagnosticCollector::new();

        let resolved = doc.prepare_linking(&mut diagnostics);

        // Correspondence only points at its target; it is free to be any element.
        assert_eq!(resolved, 1);
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.len(), 1);
        let diag = &diagnostics.diagnostics()[0];
        assert_eq!(diag.code(), Some(DiagnosticCode::E200));
        assert_eq!(
            diag.message(),
            "sameas target 'm-1' is a 'measure', which has no drawing state"
        );
        assert_eq!(
            doc.node(same).linking().unwrap().resolved_target(LinkRelation::Equivalence),
            None
        );
        assert_eq!(
            doc.node(corresp).linking().unwrap().resolved_target(LinkRelation::Correspondence),
            Some(measure)
        );
    }

    #[test]
    fn test_resolution_is_repeatable_after_reset() {
        let (mut doc, measure) = with_measure();
        let linked = doc
            .add_child(measure, dir().with_link(LinkRelation::Equivalence, "dir-b"))
            .unwrap();
        let target = doc.add_child(measure, dir().with_id("dir-b")).unwrap();
        let mut diagnostics = DiagnosticCollector::new();

        doc.prepare_linking(&mut diagnostics);
        doc.reset_drawing();
        assert_eq!(
            doc.node(linked).linking().unwrap().resolved_target(LinkRelation::Equivalence),
            None
        );

        doc.prepare_linking(&mut diagnostics);
        assert_eq!(
            doc.node(linked).linking().unwrap().resolved_target(LinkRelation::Equivalence),
            Some(target)
        );
    }
}
