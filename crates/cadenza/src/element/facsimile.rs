//! Facsimile capability.

use cadenza_core::geometry::Zone;

/// Link from an element to a zone on a facsimile surface.
///
/// The zone comes from the source encoding. It is never cleared by a drawing
/// reset, and only takes effect when the document renders in facsimile mode.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Facsimile {
    zone: Option<Zone>,
}

impl Facsimile {
    pub fn new(zone: Option<Zone>) -> Self {
        Self { zone }
    }

    /// Returns `true` if the element references a zone.
    pub fn has_zone(&self) -> bool {
        self.zone.is_some()
    }

    pub fn zone(&self) -> Option<Zone> {
        self.zone
    }
}
