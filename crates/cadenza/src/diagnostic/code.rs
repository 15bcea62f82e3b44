//! Diagnostic codes.
//!
//! Codes are grouped by the pass that emits them:
//! - `W1xx` - Overflow adjustment
//! - `W2xx`, `E2xx` - Link preparation

use std::fmt;

/// Codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    // =========================================================================
    // Overflow adjustment (W1xx)
    // =========================================================================
    /// Missing positioner.
    ///
    /// A direction, dynamic or tempo mark has no positioner in the system
    /// aligner, usually because its staff reference is missing in the source.
    /// The element is left out of overflow detection.
    W100,

    // =========================================================================
    // Link preparation (W2xx, E2xx)
    // =========================================================================
    /// Unresolved link target.
    ///
    /// A `sameas`, `copyof` or `corresp` link names an identity that does not
    /// exist in the document.
    W200,

    /// Link target without drawing state.
    ///
    /// A `sameas` or `copyof` link names a structural element (a measure, a
    /// staff, ...). Drawing resets propagate along these links, so the target
    /// must be a floating element; the link is left unresolved.
    E200,
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
