//! Collector for accumulating diagnostics during a pass.

use crate::diagnostic::Diagnostic;

/// Accumulates diagnostics while a pass runs.
///
/// # Example
///
/// ```
/// # use cadenza::diagnostic::{Diagnostic, DiagnosticCollector};
/// let mut collector = DiagnosticCollector::new();
/// collector.emit(Diagnostic::warning("first"));
/// collector.emit(Diagnostic::warning("second"));
///
/// assert_eq!(collector.len(), 2);
/// assert!(!collector.has_errors());
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Move every diagnostic of `other` into this collector.
    pub fn merge(&mut self, other: DiagnosticCollector) {
        self.has_errors |= other.has_errors;
        self.diagnostics.extend(other.diagnostics);
    }

    /// Returns `true` if an error-severity diagnostic was emitted.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Number of diagnostics collected so far.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns `true` if nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Borrow the collected diagnostics in emission order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the collector, returning the diagnostics in emission order.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_collector_is_empty() {
        let collector = DiagnosticCollector::new();

        assert!(collector.is_empty());
        assert!(!collector.has_errors());
        assert!(collector.into_diagnostics().is_empty());
    }

    #[test]
    fn test_errors_are_flagged() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("harmless"));
        assert!(!collector.has_errors());

        collector.emit(Diagnostic::error("serious"));
        assert!(collector.has_errors());
    }

    #[test]
    fn test_merge_keeps_order_and_error_flag() {
        let mut first = DiagnosticCollector::new();
        first.emit(Diagnostic::warning("a"));

        let mut second = DiagnosticCollector::new();
        second.emit(Diagnostic::error("b"));
        second.emit(Diagnostic::warning("c"));

        first.merge(second);

        let messages: Vec<_> = first.diagnostics().iter().map(|d| d.message()).collect();
        assert_eq!(messages, ["a", "b", "c"]);
        assert!(first.has_errors());
    }
}
