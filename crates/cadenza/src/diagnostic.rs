//! Non-fatal diagnostics reported by layout passes.
//!
//! Layout passes do not abort on malformed input. When a pass meets an element
//! it cannot measure or resolve, it records a [`Diagnostic`] naming the
//! element's class and identity and carries on. Callers decide what to do with
//! the collected diagnostics (typically forward them to a log).
//!
//! # Example
//!
//! ```
//! # use cadenza::diagnostic::{Diagnostic, DiagnosticCode};
//! # use cadenza::identifier::Id;
//! let diag = Diagnostic::warning("no positioner found")
//!     .with_code(DiagnosticCode::W100)
//!     .with_element("dynam", Id::new("dynam-12"))
//!     .with_help("check that the element references an existing staff");
//!
//! assert_eq!(diag.to_string(), "warning[W100]: no positioner found (dynam 'dynam-12')");
//! ```

mod code;
mod collector;
mod severity;

pub use code::DiagnosticCode;
pub use collector::DiagnosticCollector;
pub use severity::Severity;

use std::fmt;

use cadenza_core::identifier::Id;

/// The element a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementRef {
    class: &'static str,
    id: Id,
}

impl ElementRef {
    /// Create a reference from an element class name and identity.
    pub fn new(class: &'static str, id: Id) -> Self {
        Self { class, id }
    }

    /// Encoding class name of the element (`"dir"`, `"tempo"`, ...).
    pub fn class(&self) -> &'static str {
        self.class
    }

    /// Identity of the element.
    pub fn id(&self) -> Id {
        self.id
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.class, self.id)
    }
}

/// A single diagnostic message.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<DiagnosticCode>,
    message: String,
    element: Option<ElementRef>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the diagnostic code, if any.
    pub fn code(&self) -> Option<DiagnosticCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the element this diagnostic is about, if any.
    pub fn element(&self) -> Option<ElementRef> {
        self.element
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the diagnostic code.
    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Attach the element the diagnostic is about.
    pub fn with_element(mut self, class: &'static str, id: Id) -> Self {
        self.element = Some(ElementRef::new(class, id));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            element: None,
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(element) = self.element {
            write!(f, " ({element})")?;
        }
        Ok(())
    }
}
