//! Linking capability: typed references between elements.
//!
//! Links are declared in the source by identity (`@sameas`, `@copyof`,
//! `@corresp`) and resolved to arena nodes once per layout cycle by the
//! [`PrepareLinking`](crate::layout::PrepareLinking) pass. Resolutions are
//! weak: they never own the target and are dropped by every drawing reset.

use std::fmt;

use cadenza_core::identifier::Id;

use crate::{document::NodeId, functor::Visit};

/// Relation a link expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkRelation {
    /// `@sameas`: the element is the same logical entity as the target,
    /// typically the same mark repeated on another staff.
    Equivalence,
    /// `@copyof`: the element is a copy of the target and has no content of
    /// its own.
    Copy,
    /// `@corresp`: a looser correspondence, e.g. with another source.
    Correspondence,
}

impl LinkRelation {
    /// Attribute name in the encoding.
    pub fn attribute_name(&self) -> &'static str {
        match self {
            Self::Equivalence => "sameas",
            Self::Copy => "copyof",
            Self::Correspondence => "corresp",
        }
    }
}

impl fmt::Display for LinkRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute_name())
    }
}

/// One declared link and its resolution for the current cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    relation: LinkRelation,
    target: Id,
    resolved: Option<NodeId>,
}

impl Link {
    pub fn new(relation: LinkRelation, target: Id) -> Self {
        Self {
            relation,
            target,
            resolved: None,
        }
    }

    pub fn relation(&self) -> LinkRelation {
        self.relation
    }

    /// Declared target identity.
    pub fn target(&self) -> Id {
        self.target
    }

    /// Target node, once resolved in this cycle.
    pub fn resolved(&self) -> Option<NodeId> {
        self.resolved
    }
}

/// Outcome of a linking reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReset {
    /// Equivalent nodes whose own reset must run along with this one.
    pub mirror: Vec<NodeId>,
    /// How the traversal continues past the element.
    pub visit: Visit,
}

/// The links an element declares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Linking {
    links: Vec<Link>,
}

impl Linking {
    pub fn new(links: impl IntoIterator<Item = (LinkRelation, Id)>) -> Self {
        Self {
            links: links
                .into_iter()
                .map(|(relation, target)| Link::new(relation, target))
                .collect(),
        }
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Returns `true` if a link with `relation` is declared.
    pub fn declares(&self, relation: LinkRelation) -> bool {
        self.links.iter().any(|link| link.relation == relation)
    }

    /// First resolved target for `relation`.
    pub fn resolved_target(&self, relation: LinkRelation) -> Option<NodeId> {
        self.links
            .iter()
            .filter(|link| link.relation == relation)
            .find_map(|link| link.resolved)
    }

    /// Record the resolution of the link at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn resolve(&mut self, index: usize, target: NodeId) {
        self.links[index].resolved = Some(target);
    }

    /// Drop every resolution and report how the reset propagates.
    ///
    /// Resolved equivalence targets other than `owner` are listed in
    /// [`LinkReset::mirror`], in declaration order, so the caller runs their
    /// own reset too. An element declaring a `copyof` link is reset as a unit
    /// with its content: the caller clears the whole subtree at once and the
    /// traversal moves on to the next sibling. Any other element lets the
    /// traversal continue.
    pub fn reset_drawing(&mut self, owner: NodeId) -> LinkReset {
        let mut mirror = Vec::new();
        for link in &mut self.links {
            if let Some(target) = link.resolved.take() {
                if link.relation == LinkRelation::Equivalence
                    && target != owner
                    && !mirror.contains(&target)
                {
                    mirror.push(target);
                }
            }
        }

        let visit = if self.declares(LinkRelation::Copy) {
            Visit::SkipToSiblings
        } else {
            Visit::Continue
        };

        LinkReset { mirror, visit }
    }
}
