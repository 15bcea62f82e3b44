//! Overflow detection: the control element reaching furthest right.

use log::{debug, trace};

use cadenza_core::data::HorizontalAlignment;

use crate::{
    diagnostic::{Diagnostic, DiagnosticCode, DiagnosticCollector},
    document::{Document, NodeId},
    element::{ControlElement, ElementKind},
    functor::{Functor, Visit},
    layout::Positioner,
};

/// Finds, per system, the positioner of a direction, dynamic or tempo mark
/// with the greatest right content edge.
///
/// Any system node met during the walk becomes the current system and starts
/// a fresh search, so the pass may start at a system or above it. The result
/// is read from [`AdjustXOverflowParams::current_widest`] after the walk.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdjustXOverflow;

/// Context of one [`AdjustXOverflow`] walk.
#[derive(Debug, Default)]
pub struct AdjustXOverflowParams {
    current_system: Option<NodeId>,
    current_widest: Option<Positioner>,
    diagnostics: DiagnosticCollector,
}

impl AdjustXOverflowParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// System whose aligner is being queried.
    pub fn current_system(&self) -> Option<NodeId> {
        self.current_system
    }

    /// Widest positioner found so far in the current system.
    pub fn current_widest(&self) -> Option<&Positioner> {
        self.current_widest.as_ref()
    }

    /// Diagnostics emitted so far.
    pub fn diagnostics(&self) -> &DiagnosticCollector {
        &self.diagnostics
    }

    /// Consume the context, returning the widest positioner and the diagnostics.
    pub fn into_parts(self) -> (Option<Positioner>, DiagnosticCollector) {
        (self.current_widest, self.diagnostics)
    }

    fn offer(&mut self, positioner: &Positioner) {
        let wider = self
            .current_widest
            .is_none_or(|widest| positioner.content_right() > widest.content_right());
        if wider {
            self.current_widest = Some(*positioner);
        }
    }
}

impl Functor for AdjustXOverflow {
    type Params = AdjustXOverflowParams;

    fn visit(&self, doc: &Document, node: NodeId, params: &mut Self::Params) -> Visit {
        match doc.node(node).kind() {
            ElementKind::System(_) => {
                params.current_system = Some(node);
                params.current_widest = None;
                Visit::Continue
            }
            ElementKind::Control(control) => self.visit_control(doc, node, control, params),
            _ => Visit::Continue,
        }
    }
}

impl AdjustXOverflow {
    fn visit_control(
        &self,
        doc: &Document,
        node: NodeId,
        control: &ControlElement,
        params: &mut AdjustXOverflowParams,
    ) -> Visit {
        if !control.kind().is_overflow_candidate() {
            return Visit::SkipToSiblings;
        }

        // Right-aligned text cannot reach any further right.
        if doc.child_rend_alignment(node) == Some(HorizontalAlignment::Right) {
            return Visit::SkipToSiblings;
        }

        let Some(system) = params.current_system else {
            panic!("Control element {node} visited outside of a system");
        };
        let aligner = doc
            .system(system)
            .unwrap_or_else(|| panic!("Current system {system} is not a system node"))
            .aligner();

        let mut found = false;
        for positioner in aligner.find_all_positioners_pointing_to(node) {
            found = true;
            params.offer(positioner);
        }

        if !found {
            let element = doc.node(node);
            debug!(class = element.class_name(), id:% = element.id(); "No positioner found");
            params.diagnostics.emit(
                Diagnostic::warning("no positioner found")
                    .with_code(DiagnosticCode::W100)
                    .with_element(element.class_name(), element.id())
                    .with_help("check that the element references an existing staff"),
            );
            return Visit::SkipToSiblings;
        }

        trace!(
            node:% = node,
            widest:? = params.current_widest.map(|w| w.content_right());
            "Measured control element"
        );

        Visit::Continue
    }
}

/// Overflow of one system, as handed to line justification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemOverflow {
    system: NodeId,
    widest: Option<Positioner>,
    overflow: f32,
}

impl SystemOverflow {
    /// Measure how far `widest` runs past a system of width `width`.
    ///
    /// Overflow is the distance between the widest right content edge and
    /// `width + tolerance`, never negative.
    pub fn new(system: NodeId, widest: Option<Positioner>, width: f32, tolerance: f32) -> Self {
        let overflow = widest
            .map(|positioner| positioner.content_right() - (width + tolerance))
            .map_or(0.0, |overflow| overflow.max(0.0));

        Self {
            system,
            widest,
            overflow,
        }
    }

    pub fn system(&self) -> NodeId {
        self.system
    }

    /// Widest positioner of the system, if any candidate was measured.
    pub fn widest(&self) -> Option<&Positioner> {
        self.widest.as_ref()
    }

    /// Distance past the system's right edge, in layout units.
    pub fn overflow(&self) -> f32 {
        self.overflow
    }

    pub fn is_overflowing(&self) -> bool {
        self.overflow > 0.0
    }
}

impl Document {
    /// Run [`AdjustXOverflow`] over one system and measure its overflow.
    ///
    /// Diagnostics emitted by the pass are appended to `diagnostics`.
    ///
    /// # Panics
    /// Panics if `system` is not a system node of this document.
    pub fn adjust_x_overflow(
        &self,
        system: NodeId,
        tolerance: f32,
        diagnostics: &mut DiagnosticCollector,
    ) -> SystemOverflow {
        let width = self
            .system(system)
            .unwrap_or_else(|| panic!("Node {system} is not a system"))
            .width();

        let mut params = AdjustXOverflowParams::new();
        self.process(system, &AdjustXOverflow, &mut params);

        let (widest, pass_diagnostics) = params.into_parts();
        diagnostics.merge(pass_diagnostics);

        SystemOverflow::new(system, widest, width, tolerance)
    }
}
