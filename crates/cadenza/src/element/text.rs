//! Text content elements.

use cadenza_core::data::HorizontalAlignment;

/// A styled text run (`<rend>`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rend {
    halign: Option<HorizontalAlignment>,
}

impl Rend {
    pub fn new(halign: Option<HorizontalAlignment>) -> Self {
        Self { halign }
    }

    /// Declared `@halign`, if any.
    pub fn halign(&self) -> Option<HorizontalAlignment> {
        self.halign
    }
}
