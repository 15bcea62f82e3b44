//! The document tree.
//!
//! A [`Document`] owns every node of a score in a flat arena. Nodes refer to
//! each other through [`NodeId`] handles: parent and child links are structural,
//! while link targets and positioner back-references are weak identities that
//! are looked up, never owned.
//!
//! The tree is built top-down with [`Document::add_child`]. Nodes are never
//! re-parented or removed, so the tree is acyclic by construction and a
//! `NodeId` stays valid for the lifetime of its document.

use std::fmt;

use indexmap::IndexMap;
use log::trace;

use cadenza_core::{data::RenderMode, identifier::Id};

use crate::{
    element::{Element, ElementKind, Facsimile, FloatingObject, Linking, System},
    error::CadenzaError,
};

/// Handle to a node in a [`Document`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) const fn from_raw(idx: u32) -> Self {
        Self(idx)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A document node: an element kind plus the capabilities it carries.
#[derive(Debug, Clone)]
pub struct Node {
    id: Id,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: ElementKind,
    floating: Option<FloatingObject>,
    facsimile: Option<Facsimile>,
    linking: Option<Linking>,
}

impl Node {
    /// Build a node from an unattached element.
    ///
    /// Floating kinds receive all three capabilities. Any other kind carrying a
    /// zone or links is rejected.
    fn from_element(
        element: Element,
        slot: usize,
        parent: Option<NodeId>,
    ) -> Result<Self, CadenzaError> {
        let (id, kind, zone, links) = element.into_parts();
        let id = id.unwrap_or_else(|| Id::from_anonymous(slot));

        let (floating, facsimile, linking) = if kind.is_floating() {
            (
                Some(FloatingObject::new()),
                Some(Facsimile::new(zone)),
                Some(Linking::new(links)),
            )
        } else if zone.is_some() || !links.is_empty() {
            return Err(CadenzaError::Structure(format!(
                "'{}' elements cannot carry a facsimile zone or links (element '{id}')",
                kind.class_name()
            )));
        } else {
            (None, None, None)
        };

        Ok(Self {
            id,
            parent,
            children: Vec::new(),
            kind,
            floating,
            facsimile,
            linking,
        })
    }

    /// Element identity (generated when the source had none).
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut ElementKind {
        &mut self.kind
    }

    /// Encoding class name, e.g. `"tempo"`.
    pub fn class_name(&self) -> &'static str {
        self.kind.class_name()
    }

    pub fn floating(&self) -> Option<&FloatingObject> {
        self.floating.as_ref()
    }

    pub fn floating_mut(&mut self) -> Option<&mut FloatingObject> {
        self.floating.as_mut()
    }

    pub fn facsimile(&self) -> Option<&Facsimile> {
        self.facsimile.as_ref()
    }

    pub fn linking(&self) -> Option<&Linking> {
        self.linking.as_ref()
    }

    pub fn linking_mut(&mut self) -> Option<&mut Linking> {
        self.linking.as_mut()
    }
}

/// A score: the node arena, its identity index and the render mode.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    ids: IndexMap<Id, NodeId>,
    render_mode: RenderMode,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document holding only its root, in layout render mode.
    pub fn new() -> Self {
        let root = Node::from_element(Element::new(ElementKind::Root).with_id("__root"), 0, None)
            .expect("A root element carries no capabilities data");

        Self {
            nodes: vec![root],
            ids: IndexMap::new(),
            render_mode: RenderMode::default(),
        }
    }

    /// Set the render mode (builder style).
    pub fn with_render_mode(mut self, render_mode: RenderMode) -> Self {
        self.render_mode = render_mode;
        self
    }

    pub fn root(&self) -> NodeId {
        NodeId::from_raw(0)
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    /// Switch the render mode. Drawing positions follow on the next query.
    pub fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the node for `id`, or `None` if the handle belongs to another document.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.idx())
    }

    /// Returns the node for `id`.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this document.
    pub fn node(&self, id: NodeId) -> &Node {
        self.get(id)
            .unwrap_or_else(|| panic!("Node {id} does not belong to this document"))
    }

    /// Mutable access to the node for `id`.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this document.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes
            .get_mut(id.idx())
            .unwrap_or_else(|| panic!("Node {id} does not belong to this document"))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Look a node up by its declared identity.
    pub fn find_by_id(&self, id: Id) -> Option<NodeId> {
        self.ids.get(&id).copied()
    }

    /// Append `element` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`CadenzaError::Structure`] if `parent` does not belong to this
    /// document, if its kind does not accept the element's kind, if the
    /// element's identity is already used or generated-looking (`__` prefix),
    /// or if a non-floating element carries a zone or links.
    pub fn add_child(&mut self, parent: NodeId, element: Element) -> Result<NodeId, CadenzaError> {
        let parent_kind = self
            .get(parent)
            .ok_or_else(|| {
                CadenzaError::Structure(format!("Parent {parent} does not belong to this document"))
            })?
            .kind();

        if !parent_kind.accepts(element.kind()) {
            return Err(CadenzaError::Structure(format!(
                "Adding '{}' to a '{}' is not supported",
                element.kind().class_name(),
                parent_kind.class_name()
            )));
        }

        if let Some(id) = element.id() {
            if id.is_anonymous() {
                return Err(CadenzaError::Structure(format!(
                    "Identity '{id}' uses the reserved '__' prefix"
                )));
            }
            if self.ids.contains_key(&id) {
                return Err(CadenzaError::Structure(format!(
                    "Identity '{id}' is already used"
                )));
            }
        }

        let slot = self.nodes.len();
        let explicit_id = element.id();
        let node = Node::from_element(element, slot, Some(parent))?;
        let node_id = NodeId::from_raw(
            u32::try_from(slot)
                .map_err(|_| CadenzaError::Structure("Document node limit reached".to_string()))?,
        );

        trace!(parent:% = parent, node:% = node_id, class = node.class_name(); "Adding node");

        if let Some(id) = explicit_id {
            self.ids.insert(id, node_id);
        }
        self.nodes.push(node);
        self.node_mut(parent).children.push(node_id);

        Ok(node_id)
    }

    /// First descendant of `node` (excluding `node` itself) matching
    /// `predicate`, searching depth-first in document order.
    pub fn find_descendant(
        &self,
        node: NodeId,
        predicate: impl Fn(&Node) -> bool,
    ) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();

        while let Some(current) = stack.pop() {
            let current_node = self.node(current);
            if predicate(current_node) {
                return Some(current);
            }
            stack.extend(current_node.children.iter().rev().copied());
        }

        None
    }

    /// Closest ancestor of `node` (excluding `node` itself) matching `predicate`.
    pub fn first_ancestor(
        &self,
        node: NodeId,
        predicate: impl Fn(&Node) -> bool,
    ) -> Option<NodeId> {
        let mut current = self.parent(node);

        while let Some(ancestor) = current {
            let ancestor_node = self.node(ancestor);
            if predicate(ancestor_node) {
                return Some(ancestor);
            }
            current = ancestor_node.parent;
        }

        None
    }

    /// System nodes in document order.
    pub fn systems(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children(self.root())
            .iter()
            .copied()
            .filter(|&child| matches!(self.node(child).kind, ElementKind::System(_)))
    }

    /// The system data of `node`, if it is a system.
    pub fn system(&self, node: NodeId) -> Option<&System> {
        match &self.node(node).kind {
            ElementKind::System(system) => Some(system),
            _ => None,
        }
    }

    /// Mutable system data of `node`, if it is a system.
    pub fn system_mut(&mut self, node: NodeId) -> Option<&mut System> {
        match &mut self.node_mut(node).kind {
            ElementKind::System(system) => Some(system),
            _ => None,
        }
    }
}
