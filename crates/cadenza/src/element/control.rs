//! Control elements: performance annotations attached to a measure.

use std::fmt;

use cadenza_core::data::HorizontalAlignment;

use crate::{
    document::{Document, NodeId},
    element::ElementKind,
};

/// The closed set of control element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// Textual direction (`<dir>`).
    Dir,
    /// Dynamic mark (`<dynam>`).
    Dynam,
    /// Tempo indication (`<tempo>`).
    Tempo,
    Hairpin,
    Slur,
    Tie,
    Fermata,
}

impl ControlKind {
    /// Encoding class name.
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Dir => "dir",
            Self::Dynam => "dynam",
            Self::Tempo => "tempo",
            Self::Hairpin => "hairpin",
            Self::Slur => "slur",
            Self::Tie => "tie",
            Self::Fermata => "fermata",
        }
    }

    /// Returns `true` for the kinds whose text can run past the right edge of
    /// a system: directions, dynamics and tempo marks.
    pub fn is_overflow_candidate(&self) -> bool {
        matches!(self, Self::Dir | Self::Dynam | Self::Tempo)
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Descriptive data of a control element (`@label`, `@type`).
///
/// Layout state lives in the capabilities attached to the owning node, not
/// here; this struct only holds what the source encoding said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlElement {
    kind: ControlKind,
    label: Option<String>,
    type_: Option<String>,
}

impl ControlElement {
    pub fn new(kind: ControlKind) -> Self {
        Self {
            kind,
            label: None,
            type_: None,
        }
    }

    /// Set `@label`.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set `@type`, a free-form classification.
    pub fn with_type(mut self, type_: impl Into<String>) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn type_(&self) -> Option<&str> {
        self.type_.as_deref()
    }
}

impl Document {
    /// Alignment declared by the first styled text run below `node`.
    ///
    /// Descendants are searched depth-first in document order and only the
    /// first `rend` found is consulted, even if later runs declare something
    /// else. Returns `None` when there is no `rend` or it has no `@halign`.
    pub fn child_rend_alignment(&self, node: NodeId) -> Option<HorizontalAlignment> {
        let rend = self.find_descendant(node, |n| matches!(n.kind(), ElementKind::Rend(_)))?;
        match self.node(rend).kind() {
            ElementKind::Rend(rend) => rend.halign(),
            _ => None,
        }
    }
}
