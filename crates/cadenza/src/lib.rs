//! Cadenza - layout core of a music engraving engine.
//!
//! Positions floating notational elements (directions, dynamics, tempo marks
//! and their siblings) against justified systems of staves and detects the ones
//! running past a system's right edge. Source import, the placement of glyphs
//! and final rendering live outside this crate.
//!
//! A document tree is walked by layout passes written as functors; see
//! [`functor`] for the traversal protocol and [`layout`] for the passes.

pub mod config;
pub mod diagnostic;
pub mod document;
pub mod element;
pub mod functor;
pub mod layout;

mod error;

pub use cadenza_core::{data, geometry, identifier};

pub use error::CadenzaError;

use log::{debug, info};

use config::AppConfig;
use diagnostic::{Diagnostic, DiagnosticCollector};
use document::Document;
use layout::{ResetDrawingParams, SystemOverflow};

/// Entry point running the layout passes with one configuration.
///
/// # Examples
///
/// ```rust
/// use cadenza::Engraver;
/// use cadenza::element::{ControlElement, ControlKind, Element};
/// use cadenza::geometry::Extent;
///
/// let engraver = Engraver::default();
/// let mut doc = engraver.new_document();
///
/// let system = doc.add_child(doc.root(), Element::system(100.0)).unwrap();
/// let measure = doc.add_child(system, Element::measure()).unwrap();
/// let staff = doc.add_child(measure, Element::staff(1)).unwrap();
/// let tempo = doc
///     .add_child(measure, Element::control(ControlElement::new(ControlKind::Tempo)))
///     .unwrap();
///
/// // Filled in by the placement stage.
/// doc.system_mut(system)
///     .unwrap()
///     .aligner_mut()
///     .add_positioner(staff, tempo, Extent::new(40.0, 130.0));
///
/// let report = engraver.adjust_x_overflow(&doc);
/// assert_eq!(report.overflows().len(), 1);
/// assert!(report.overflows()[0].is_overflowing());
/// ```
#[derive(Debug, Default)]
pub struct Engraver {
    config: AppConfig,
}

impl Engraver {
    /// Create an engraver with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Create an empty document in the configured render mode.
    pub fn new_document(&self) -> Document {
        Document::new().with_render_mode(self.config.layout().render_mode())
    }

    /// Resolve every declared link of `doc`.
    ///
    /// Returns the diagnostics for link targets that do not exist or cannot be
    /// linked to.
    pub fn prepare_linking(&self, doc: &mut Document) -> Vec<Diagnostic> {
        info!(nodes = doc.node_count(); "Preparing links");

        let mut diagnostics = DiagnosticCollector::new();
        let resolved = doc.prepare_linking(&mut diagnostics);

        debug!(
            resolved,
            unresolved = diagnostics.len(),
            errors = diagnostics.has_errors();
            "Links prepared"
        );
        diagnostics.into_diagnostics()
    }

    /// Clear the drawing state left by the previous layout cycle.
    pub fn reset_drawing(&self, doc: &mut Document) -> ResetDrawingParams {
        info!(nodes = doc.node_count(); "Resetting drawing state");

        let params = doc.reset_drawing();

        debug!(
            reset = params.reset_count(),
            mirrored = params.mirrored_count();
            "Drawing state reset"
        );
        params
    }

    /// Measure the overflow of every system of `doc`, in document order.
    pub fn adjust_x_overflow(&self, doc: &Document) -> LayoutReport {
        let tolerance = self.config.layout().overflow_tolerance();
        info!(tolerance; "Adjusting horizontal overflow");

        let mut diagnostics = DiagnosticCollector::new();
        let overflows: Vec<_> = doc
            .systems()
            .map(|system| doc.adjust_x_overflow(system, tolerance, &mut diagnostics))
            .collect();

        info!(
            systems = overflows.len(),
            overflowing = overflows.iter().filter(|o| o.is_overflowing()).count(),
            diagnostics = diagnostics.len();
            "Overflow adjusted"
        );

        LayoutReport {
            overflows,
            diagnostics: diagnostics.into_diagnostics(),
        }
    }
}

/// Result of [`Engraver::adjust_x_overflow`].
#[derive(Debug, Clone)]
pub struct LayoutReport {
    overflows: Vec<SystemOverflow>,
    diagnostics: Vec<Diagnostic>,
}

impl LayoutReport {
    /// One entry per system, in document order.
    pub fn overflows(&self) -> &[SystemOverflow] {
        &self.overflows
    }

    /// Systems whose content runs past their width.
    pub fn overflowing(&self) -> impl Iterator<Item = &SystemOverflow> {
        self.overflows.iter().filter(|o| o.is_overflowing())
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
