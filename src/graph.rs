//! The owning graph container.
//!
//! A [`Graph`] owns an arena of nodes, the two canonical terminal leaves, and
//! a unique table hash-consed on the decision variable. Callers add nodes,
//! wire edges, and then run [`init`][Graph::init] once; only a graph that
//! passed validation may be handed to the
//! [`Comparator`][crate::comparator::Comparator].
//!
//! Consing is keyed solely on the variable: within one graph, at most one
//! node exists per variable value, so a variable can occupy only a single
//! position anywhere in the diagram. This is narrower than the classical
//! (variable, low, high) consing and is kept that way on purpose.

use std::fmt::Debug;

use fxhash::{FxHashMap, FxHashSet};
use log::debug;

use crate::edge::Edge;
use crate::error::{ObddError, Result};
use crate::node::{BranchLabel, NodeData, ParentRef, VAR_ONE, VAR_ZERO};
use crate::reference::NodeId;
use crate::traverse::{Direction, Traversal};

pub struct Graph {
    nodes: Vec<NodeData>,
    /// Unique table: variable -> canonical node. Terminals live outside it.
    unique: FxHashMap<i32, NodeId>,
    one: NodeId,
    zero: NodeId,
    root: Option<NodeId>,
    initialized: bool,
}

impl Graph {
    /// Create a graph pre-populated with the two terminal singletons at
    /// reserved variable slots.
    pub fn new() -> Self {
        let mut nodes = Vec::new();

        let one = NodeId::new(0);
        nodes.push(NodeData::new_terminal(one, VAR_ONE, true));
        let zero = NodeId::new(1);
        nodes.push(NodeData::new_terminal(zero, VAR_ZERO, false));

        debug!(
            "graph created with terminals {} (var {}) and {} (var {})",
            one, VAR_ONE, zero, VAR_ZERO
        );

        Self {
            nodes,
            unique: FxHashMap::default(),
            one,
            zero,
            root: None,
            initialized: false,
        }
    }

    /// The canonical `true` leaf.
    pub fn one(&self) -> NodeId {
        self.one
    }

    /// The canonical `false` leaf.
    pub fn zero(&self) -> NodeId {
        self.zero
    }

    /// Number of decision nodes in the unique table.
    pub fn node_count(&self) -> usize {
        self.unique.len()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The root fixed by successful validation.
    pub fn root(&self) -> Result<NodeId> {
        self.root.ok_or(ObddError::NotInitialized)
    }

    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.index()]
    }

    /// The canonical node for a variable, if one was added.
    pub fn lookup(&self, variable: i32) -> Option<NodeId> {
        self.unique.get(&variable).copied()
    }

    /// All decision nodes in the unique table, in no particular order.
    pub fn decision_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.unique.values().copied()
    }

    fn resolve(&self, variable: i32) -> Result<NodeId> {
        self.lookup(variable).ok_or(ObddError::NodeNotFound(variable))
    }

    /// Forward branch of a node; `None` for terminals and unset slots.
    pub fn branch(&self, id: NodeId, branch: bool) -> Option<NodeId> {
        self.node(id).branch(branch)
    }

    /// The fixed value of a terminal, `None` for decision nodes.
    pub fn terminal_value(&self, id: NodeId) -> Option<bool> {
        self.node(id).terminal_value()
    }

    /// Start a traversal cursor at `start`.
    pub fn traverse(&self, start: NodeId, direction: Direction) -> Traversal<'_> {
        Traversal::new(self, start, direction)
    }

    fn ensure_mutable(&self) -> Result<()> {
        if self.initialized {
            Err(ObddError::AlreadyInitialized)
        } else {
            Ok(())
        }
    }

    /// Add a decision node for `variable`, or return the existing one.
    ///
    /// A fresh node starts as a trivial pass-through decision: its true
    /// branch is the `true` terminal and its false branch the `false`
    /// terminal, until edges are rewired.
    pub fn add_node(&mut self, variable: i32) -> Result<NodeId> {
        let (one, zero) = (self.one, self.zero);
        self.add_node_with_branches(variable, one, zero)
    }

    /// Add a decision node for `variable` with explicit initial branches.
    ///
    /// Consing still applies: when the variable already has a canonical node,
    /// that node is returned unchanged and the supplied branches are ignored.
    pub fn add_node_with_branches(
        &mut self,
        variable: i32,
        true_branch: NodeId,
        false_branch: NodeId,
    ) -> Result<NodeId> {
        self.ensure_mutable()?;
        if variable < 0 {
            return Err(ObddError::InvalidConfiguration(format!(
                "variable {} is inside the reserved terminal space",
                variable
            )));
        }
        if let Some(existing) = self.lookup(variable) {
            debug!("add_node(v = {}) -> existing {}", variable, existing);
            return Ok(existing);
        }
        let id = NodeId::new(self.nodes.len() as u32);
        let node = NodeData::new_decision(id, variable, true_branch, false_branch)?;
        self.nodes.push(node);
        self.unique.insert(variable, id);
        debug!("add_node(v = {}) -> {}", variable, id);
        Ok(id)
    }

    /// Swap in a replacement node for `variable`.
    ///
    /// When no node exists for the variable nothing happens and `None` is
    /// returned. Otherwise a fresh node takes over the unique-table entry:
    /// with `overwrite_branches` it is wired to the supplied branches, without
    /// it the replaced node's wiring is carried over. The replaced node keeps
    /// its branches and parents; it is simply no longer canonical for the
    /// variable.
    pub fn change_node(
        &mut self,
        variable: i32,
        true_branch: NodeId,
        false_branch: NodeId,
        overwrite_branches: bool,
    ) -> Result<Option<NodeId>> {
        self.ensure_mutable()?;
        let old = match self.lookup(variable) {
            Some(old) => old,
            None => return Ok(None),
        };
        let (tb, fb) = if overwrite_branches {
            (true_branch, false_branch)
        } else {
            // The unique table never holds terminals, and decision nodes are
            // fully wired from construction on.
            match (self.branch(old, true), self.branch(old, false)) {
                (Some(t), Some(f)) => (t, f),
                _ => {
                    return Err(ObddError::InvalidConfiguration(format!(
                        "node {} has unwired branches",
                        old
                    )))
                }
            }
        };
        let id = NodeId::new(self.nodes.len() as u32);
        let node = NodeData::new_decision(id, variable, tb, fb)?;
        self.nodes.push(node);
        self.unique.insert(variable, id);
        debug!("change_node(v = {}): {} replaces {}", variable, id, old);
        Ok(Some(id))
    }

    /// Establish the edge `source -[branch]-> target`.
    ///
    /// The target is resolved through the unique table, so the edge always
    /// lands on the canonical instance for the target's variable even when
    /// the caller holds a stale handle. The graph's own back-reference to the
    /// target, if still present, is removed; then the forward branch and the
    /// reverse parent entry are recorded together.
    pub fn set_edge_reference(
        &mut self,
        source: NodeId,
        target: NodeId,
        branch: bool,
    ) -> Result<Edge> {
        self.ensure_mutable()?;
        let target = self
            .lookup(self.node(target).variable())
            .unwrap_or(target);
        if self.node(source).is_terminal() {
            return Err(ObddError::InvalidConfiguration(format!(
                "terminal {} cannot be the source of an edge",
                source
            )));
        }
        if self.node(target).has_parent(ParentRef::Graph) {
            self.node_mut(target).remove_parent(ParentRef::Graph);
        }
        self.node_mut(source).set_branch(branch, target)?;
        self.node_mut(target)
            .add_parent(ParentRef::Node(source), BranchLabel::from(branch))?;
        let edge = Edge {
            source,
            target,
            branch,
        };
        debug!("set_edge_reference: {}", edge);
        Ok(edge)
    }

    /// Variable-resolved form of [`set_edge_reference`][Self::set_edge_reference].
    pub fn set_edge_reference_by_var(
        &mut self,
        source: i32,
        target: i32,
        branch: bool,
    ) -> Result<Edge> {
        let source = self.resolve(source)?;
        let target = self.resolve(target)?;
        self.set_edge_reference(source, target, branch)
    }

    /// Whether the recorded branch label from `source` to `target` is true.
    ///
    /// Fails with [`EdgeNotFound`][ObddError::EdgeNotFound] when no reverse
    /// parent entry exists.
    pub fn get_edge_reference(&self, source: NodeId, target: NodeId) -> Result<bool> {
        self.node(target)
            .parent_label(ParentRef::Node(source))
            .map(|label| label == BranchLabel::True)
            .ok_or(ObddError::EdgeNotFound {
                from: source,
                to: target,
            })
    }

    /// Variable-resolved form of [`get_edge_reference`][Self::get_edge_reference].
    pub fn get_edge_reference_by_var(&self, source: i32, target: i32) -> Result<bool> {
        let source = self.resolve(source)?;
        let target = self.resolve(target)?;
        self.get_edge_reference(source, target)
    }

    /// Drop the reverse parent entry from `source` to `target`.
    ///
    /// The forward branch is intentionally left intact: the forward and
    /// reverse relations are independently mutable.
    pub fn remove_edge_reference(&mut self, source: NodeId, target: NodeId) -> Result<()> {
        self.ensure_mutable()?;
        self.node_mut(target).remove_parent(ParentRef::Node(source));
        debug!("remove_edge_reference: {} -> {}", source, target);
        Ok(())
    }

    /// Variable-resolved form of [`remove_edge_reference`][Self::remove_edge_reference].
    pub fn remove_edge_reference_by_var(&mut self, source: i32, target: i32) -> Result<()> {
        let source = self.resolve(source)?;
        let target = self.resolve(target)?;
        self.remove_edge_reference(source, target)
    }

    /// Validate the graph: resolve the unique root, check acyclicity, and
    /// freeze the structure.
    ///
    /// The root is the single decision node with no incoming edge from
    /// another node (the graph's own initial back-reference does not count).
    /// On success the graph is initialized and any further structural
    /// mutation fails fast.
    pub fn init(&mut self) -> Result<()> {
        self.ensure_mutable()?;

        let root = self.resolve_root()?;
        for step in self.traverse(root, Direction::Both) {
            step?;
        }

        self.root = Some(root);
        self.initialized = true;
        debug!(
            "init: root {} fixed, {} decision nodes validated",
            root,
            self.node_count()
        );
        Ok(())
    }

    fn resolve_root(&self) -> Result<NodeId> {
        let candidates: Vec<NodeId> = self
            .unique
            .values()
            .copied()
            .filter(|&id| !self.node(id).has_node_parent())
            .collect();
        match candidates[..] {
            [root] => Ok(root),
            _ => Err(ObddError::InvalidRoot(candidates.len())),
        }
    }

    /// Structural equality of two nodes: terminals compare by value,
    /// decision nodes by their branches, recursively. Ids never participate.
    pub fn structural_eq(&self, a: NodeId, b: NodeId) -> bool {
        let mut seen = FxHashSet::default();
        self.structural_eq_inner(a, b, &mut seen)
    }

    fn structural_eq_inner(
        &self,
        a: NodeId,
        b: NodeId,
        seen: &mut FxHashSet<(NodeId, NodeId)>,
    ) -> bool {
        if a == b {
            return true;
        }
        if !seen.insert((a, b)) {
            // Pair already under comparison; assume equal to cut recursion.
            return true;
        }
        match (self.terminal_value(a), self.terminal_value(b)) {
            (Some(va), Some(vb)) => va == vb,
            (None, None) => {
                self.branch_eq(self.node(a).branch(true), self.node(b).branch(true), seen)
                    && self.branch_eq(self.node(a).branch(false), self.node(b).branch(false), seen)
            }
            _ => false,
        }
    }

    fn branch_eq(
        &self,
        a: Option<NodeId>,
        b: Option<NodeId>,
        seen: &mut FxHashSet<(NodeId, NodeId)>,
    ) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => self.structural_eq_inner(a, b, seen),
            _ => false,
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Graph::new()
    }
}

impl Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.node_count())
            .field("initialized", &self.initialized)
            .field("root", &self.root)
            .finish()
    }
}
