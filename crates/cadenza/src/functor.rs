//! Generic tree traversal driven by continuation codes.
//!
//! Every layout pass is a *functor*: a per-node behaviour applied by a generic
//! walker. The walker visits a node first (pre-order), then decides from the
//! returned [`Visit`] whether to descend into its children, move on to its next
//! sibling, or abort the walk altogether. Passes prune irrelevant subtrees this
//! way without the walker knowing anything about them.
//!
//! Pass-scoped state travels in an explicit `Params` value owned by the caller,
//! one per traversal. The associated type ties each functor to its own
//! parameter type, so a pass can never be handed another pass's context.
//!
//! # Example
//!
//! ```
//! use cadenza::document::{Document, NodeId};
//! use cadenza::element::{Element, ElementKind};
//! use cadenza::functor::{Functor, Visit};
//!
//! /// Counts measures, without looking inside them.
//! struct CountMeasures;
//!
//! impl Functor for CountMeasures {
//!     type Params = usize;
//!
//!     fn visit(&self, doc: &Document, node: NodeId, count: &mut usize) -> Visit {
//!         match doc.node(node).kind() {
//!             ElementKind::Measure => {
//!                 *count += 1;
//!                 Visit::SkipToSiblings
//!             }
//!             _ => Visit::Continue,
//!         }
//!     }
//! }
//!
//! let mut doc = Document::new();
//! let system = doc.add_child(doc.root(), Element::system(600.0)).unwrap();
//! doc.add_child(system, Element::measure()).unwrap();
//! doc.add_child(system, Element::measure()).unwrap();
//!
//! let mut count = 0;
//! doc.process(doc.root(), &CountMeasures, &mut count);
//! assert_eq!(count, 2);
//! ```

use log::trace;

use crate::document::{Document, NodeId};

/// Continuation code returned by a functor for each visited node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visit {
    /// Descend into the children, then proceed to the next sibling.
    Continue,
    /// Do not descend; proceed to the next sibling.
    SkipToSiblings,
    /// Abort the whole traversal. No further node is visited.
    Stop,
}

/// A pass reading the document.
pub trait Functor {
    /// Pass-scoped context threaded through the traversal.
    type Params;

    /// Apply the pass to `node`.
    fn visit(&self, doc: &Document, node: NodeId, params: &mut Self::Params) -> Visit;
}

/// A pass mutating the document.
///
/// The tree shape is fixed during a walk; a mutating pass may change node data
/// (caches, capabilities, system aligners) but never add nodes.
pub trait FunctorMut {
    /// Pass-scoped context threaded through the traversal.
    type Params;

    /// Apply the pass to `node`.
    fn visit(&self, doc: &mut Document, node: NodeId, params: &mut Self::Params) -> Visit;
}

impl Document {
    /// Walk the subtree rooted at `node` with a read-only functor.
    ///
    /// Returns [`Visit::Stop`] if the functor aborted the walk and
    /// [`Visit::Continue`] otherwise.
    pub fn process<F: Functor>(&self, node: NodeId, functor: &F, params: &mut F::Params) -> Visit {
        let visit = functor.visit(self, node, params);
        trace!(node:% = node, class = self.node(node).class_name(), visit:?; "Visited node");

        match visit {
            Visit::Stop => return Visit::Stop,
            Visit::SkipToSiblings => return Visit::Continue,
            Visit::Continue => {}
        }

        for &child in self.children(node) {
            if self.process(child, functor, params) == Visit::Stop {
                return Visit::Stop;
            }
        }

        Visit::Continue
    }

    /// Walk the subtree rooted at `node` with a mutating functor.
    ///
    /// Same traversal order and return value as [`Document::process`].
    pub fn process_mut<F: FunctorMut>(
        &mut self,
        node: NodeId,
        functor: &F,
        params: &mut F::Params,
    ) -> Visit {
        let visit = functor.visit(self, node, params);
        trace!(node:% = node, class = self.node(node).class_name(), visit:?; "Visited node");

        match visit {
            Visit::Stop => return Visit::Stop,
            Visit::SkipToSiblings => return Visit::Continue,
            Visit::Continue => {}
        }

        let child_count = self.children(node).len();
        for idx in 0..child_count {
            let child = self.children(node)[idx];
            if self.process_mut(child, functor, params) == Visit::Stop {
                return Visit::Stop;
            }
        }

        Visit::Continue
    }
}
