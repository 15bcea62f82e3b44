//! Systems and staves.

use crate::layout::SystemAligner;

/// One line of justified staves.
///
/// A system owns the [`SystemAligner`] holding every positioner placed on it
/// during the current layout cycle.
#[derive(Debug, Clone, Default)]
pub struct System {
    width: f32,
    aligner: SystemAligner,
}

impl System {
    /// Creates a system whose justified content ends at `width`.
    pub fn new(width: f32) -> Self {
        Self {
            width,
            aligner: SystemAligner::new(),
        }
    }

    /// Right edge of the justified content, in layout units.
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn aligner(&self) -> &SystemAligner {
        &self.aligner
    }

    pub fn aligner_mut(&mut self) -> &mut SystemAligner {
        &mut self.aligner
    }
}

/// A staff within a measure, identified by its `@n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Staff {
    n: u32,
}

impl Staff {
    pub fn new(n: u32) -> Self {
        Self { n }
    }

    pub fn n(&self) -> u32 {
        self.n
    }
}
