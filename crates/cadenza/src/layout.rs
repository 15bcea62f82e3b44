//! Floating element layout: the system aligner and the passes run over it.
//!
//! A layout cycle, as far as this crate is concerned, goes:
//!
//! 1. [`ResetDrawing`] clears every cache left by the previous cycle.
//! 2. [`PrepareLinking`] resolves declared links to document nodes.
//! 3. An external placement stage positions floating elements and fills each
//!    system's [`SystemAligner`] with [`Positioner`]s.
//! 4. [`AdjustXOverflow`] finds, per system, the positioner reaching furthest
//!    right; the resulting [`SystemOverflow`] feeds line justification.

mod adjust_x_overflow;
mod aligner;
mod positioner;
mod prepare_linking;
mod reset_drawing;

pub use adjust_x_overflow::{AdjustXOverflow, AdjustXOverflowParams, SystemOverflow};
pub use aligner::SystemAligner;
pub use positioner::Positioner;
pub use prepare_linking::{PrepareLinking, PrepareLinkingParams};
pub use reset_drawing::{ResetDrawing, ResetDrawingParams};
