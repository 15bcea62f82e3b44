//! The system aligner: per-system store of positioners.
//!
//! Positioners are kept in insertion order, which is the order the placement
//! stage produced them. A secondary index from element to positioner slots
//! answers "every positioner of element E" without scanning the whole system.

use std::collections::HashMap;

use cadenza_core::geometry::Extent;

use crate::{document::NodeId, layout::Positioner};

/// Owner of every [`Positioner`] placed on one system during a layout cycle.
#[derive(Debug, Clone, Default)]
pub struct SystemAligner {
    positioners: Vec<Positioner>,
    by_element: HashMap<NodeId, Vec<usize>>,
}

impl SystemAligner {
    /// Creates an empty aligner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the extent of `element` on `staff`.
    ///
    /// There is at most one positioner per (element, staff) pair: adding the
    /// same pair again replaces the extent in place, keeping its original
    /// position in insertion order.
    pub fn add_positioner(&mut self, staff: NodeId, element: NodeId, content: Extent) {
        let positioner = Positioner::new(staff, element, content);

        if let Some(&slot) = self
            .by_element
            .get(&element)
            .into_iter()
            .flatten()
            .find(|&&slot| self.positioners[slot].staff() == staff)
        {
            self.positioners[slot] = positioner;
            return;
        }

        self.positioners.push(positioner);
        self.by_element
            .entry(element)
            .or_default()
            .push(self.positioners.len() - 1);
    }

    /// Every positioner whose back-reference is `element`, in insertion order.
    ///
    /// Returns an empty iterator if the element was never placed.
    pub fn find_all_positioners_pointing_to(
        &self,
        element: NodeId,
    ) -> impl Iterator<Item = &Positioner> {
        self.by_element
            .get(&element)
            .into_iter()
            .flatten()
            .map(|&slot| &self.positioners[slot])
    }

    /// The positioner of `element` on `staff`, if any.
    pub fn find_positioner(&self, element: NodeId, staff: NodeId) -> Option<&Positioner> {
        self.find_all_positioners_pointing_to(element)
            .find(|positioner| positioner.staff() == staff)
    }

    /// All positioners in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Positioner> {
        self.positioners.iter()
    }

    pub fn len(&self) -> usize {
        self.positioners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positioners.is_empty()
    }

    /// Drop every positioner, ready for the next layout cycle.
    pub fn clear(&mut self) {
        self.positioners.clear();
        self.by_element.clear();
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn node(idx: u32) -> NodeId {
        NodeId::from_raw(idx)
    }

    #[test]
    fn test_new_aligner_is_empty() {
        let aligner = SystemAligner::new();

        assert!(aligner.is_empty());
        assert_eq!(aligner.len(), 0);
        assert_eq!(aligner.find_all_positioners_pointing_to(node(1)).count(), 0);
    }

    #[test]
    fn test_find_all_returns_every_staff_in_order() {
        let mut aligner = SystemAligner::new();
        let (staff_1, staff_2) = (node(10), node(11));
        let (tempo, dynam) = (node(20), node(21));

        aligner.add_positioner(staff_1, tempo, Extent::new(40.0, 120.0));
        aligner.add_positioner(staff_1, dynam, Extent::new(60.0, 80.0));
        aligner.add_positioner(staff_2, tempo, Extent::new(40.0, 150.0));

        let found: Vec<_> = aligner.find_all_positioners_pointing_to(tempo).collect();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].staff(), staff_1);
        assert_eq!(found[1].staff(), staff_2);
        assert!(found.iter().all(|p| p.element() == tempo));
        assert_eq!(aligner.len(), 3);
    }

    #[test]
    fn test_same_pair_replaces_extent() {
        let mut aligner = SystemAligner::new();
        let (staff, dir) = (node(1), node(2));

        aligner.add_positioner(staff, dir, Extent::new(0.0, 10.0));
        aligner.add_positioner(staff, dir, Extent::new(0.0, 30.0));

        assert_eq!(aligner.len(), 1);
        let positioner = aligner.find_positioner(dir, staff).unwrap();
        assert_approx_eq!(f32, positioner.content_right(), 30.0);
    }

    #[test]
    fn test_find_positioner_by_staff() {
        let mut aligner = SystemAligner::new();
        let (staff_1, staff_2, dir) = (node(1), node(2), node(3));

        aligner.add_positioner(staff_2, dir, Extent::new(5.0, 25.0));

        assert!(aligner.find_positioner(dir, staff_1).is_none());
        let positioner = aligner.find_positioner(dir, staff_2).unwrap();
        assert_approx_eq!(f32, positioner.content_left(), 5.0);
    }

    #[test]
    fn test_clear_drops_index_too() {
        let mut aligner = SystemAligner::new();
        aligner.add_positioner(node(1), node(2), Extent::new(0.0, 1.0));

        aligner.clear();

        assert!(aligner.is_empty());
        assert_eq!(aligner.find_all_positioners_pointing_to(node(2)).count(), 0);
    }
}
