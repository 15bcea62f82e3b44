//! Element kinds and the capabilities they carry.
//!
//! A document node holds an [`ElementKind`] describing what it is, and zero or
//! more capabilities describing what it can do:
//!
//! - [`FloatingObject`]: cached drawing coordinates computed by layout
//! - [`Facsimile`]: an optional source-image zone overriding those coordinates
//! - [`Linking`]: typed references to other elements (`sameas`, `copyof`, `corresp`)
//!
//! Capabilities are attached by composition and queried by presence (see
//! [`Node::floating`](crate::document::Node::floating) and siblings), so a pass
//! asks "can this node do X" rather than "is this node a Y".
//!
//! Unattached elements are described with the [`Element`] builder and handed to
//! [`Document::add_child`](crate::document::Document::add_child).

mod control;
mod facsimile;
mod floating;
mod linking;
mod system;
mod text;

pub use control::{ControlElement, ControlKind};
pub use facsimile::Facsimile;
pub use floating::FloatingObject;
pub use linking::{Link, LinkRelation, LinkReset, Linking};
pub use system::{Staff, System};
pub use text::Rend;

use cadenza_core::{data::HorizontalAlignment, geometry::Zone, identifier::Id};

/// What a document node is.
#[derive(Debug, Clone)]
pub enum ElementKind {
    /// The document root; there is exactly one per document.
    Root,
    /// One justified line of staves, owning its system aligner.
    System(System),
    Measure,
    Staff(Staff),
    /// A performance annotation floating above or below the staves.
    Control(ControlElement),
    /// A styled text run.
    Rend(Rend),
    /// Plain text content.
    Text(String),
    /// A forced line break inside text.
    LineBreak,
}

impl ElementKind {
    /// Encoding class name used in diagnostics and logs.
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Root => "doc",
            Self::System(_) => "system",
            Self::Measure => "measure",
            Self::Staff(_) => "staff",
            Self::Control(control) => control.kind().class_name(),
            Self::Rend(_) => "rend",
            Self::Text(_) => "text",
            Self::LineBreak => "lb",
        }
    }

    /// Returns `true` for kinds that carry the floating, facsimile and linking
    /// capabilities.
    pub fn is_floating(&self) -> bool {
        matches!(self, Self::Control(_))
    }

    /// Returns `true` if `child` may be appended under an element of this kind.
    pub fn accepts(&self, child: &ElementKind) -> bool {
        use ElementKind as K;

        match self {
            K::Root => matches!(child, K::System(_)),
            K::System(_) => matches!(child, K::Measure),
            K::Measure => matches!(child, K::Staff(_) | K::Control(_)),
            K::Control(_) => matches!(
                child,
                K::Rend(_) | K::Text(_) | K::LineBreak | K::Control(_)
            ),
            K::Rend(_) => matches!(child, K::Rend(_) | K::Text(_) | K::LineBreak),
            K::Staff(_) | K::Text(_) | K::LineBreak => false,
        }
    }
}

/// An element not yet attached to a document.
///
/// # Examples
///
/// ```
/// use cadenza::element::{ControlElement, ControlKind, Element, LinkRelation};
/// use cadenza::geometry::Zone;
///
/// let tempo = Element::control(ControlElement::new(ControlKind::Tempo).with_label("Allegro"))
///     .with_id("tempo-1")
///     .with_zone(Zone::new(120.0, 40.0, 360.0, 90.0))
///     .with_link(LinkRelation::Correspondence, "tempo-part-2");
/// ```
#[derive(Debug, Clone)]
pub struct Element {
    id: Option<Id>,
    kind: ElementKind,
    zone: Option<Zone>,
    links: Vec<(LinkRelation, Id)>,
}

impl Element {
    /// Creates an element of the given kind without identity or capabilities data.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: None,
            kind,
            zone: None,
            links: Vec::new(),
        }
    }

    /// A system whose justified content ends at `width`.
    pub fn system(width: f32) -> Self {
        Self::new(ElementKind::System(System::new(width)))
    }

    pub fn measure() -> Self {
        Self::new(ElementKind::Measure)
    }

    /// A staff with the given `@n`.
    pub fn staff(n: u32) -> Self {
        Self::new(ElementKind::Staff(Staff::new(n)))
    }

    pub fn control(control: ControlElement) -> Self {
        Self::new(ElementKind::Control(control))
    }

    /// A styled text run with an optional `@halign`.
    pub fn rend(halign: Option<HorizontalAlignment>) -> Self {
        Self::new(ElementKind::Rend(Rend::new(halign)))
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(ElementKind::Text(content.into()))
    }

    /// Set the element identity.
    pub fn with_id(mut self, id: impl Into<Id>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the facsimile zone. Only floating kinds accept one.
    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zone = Some(zone);
        self
    }

    /// Declare a link to another element. Only floating kinds accept links.
    pub fn with_link(mut self, relation: LinkRelation, target: impl Into<Id>) -> Self {
        self.links.push((relation, target.into()));
        self
    }

    pub fn id(&self) -> Option<Id> {
        self.id
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub(crate) fn into_parts(self) -> (Option<Id>, ElementKind, Option<Zone>, Vec<(LinkRelation, Id)>) {
        (self.id, self.kind, self.zone, self.links)
    }
}
