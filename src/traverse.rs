//! The traversal cursor shared by validation and comparison.
//!
//! [`Traversal`] is a lazily-produced, pull-based sequence of nodes: each
//! `next()` call advances the cursor by one node and yields it, so a consumer
//! may stop as soon as it has seen what it needs (the comparison walk stops
//! at the first terminal). Cycle detection is built into the cursor itself:
//! membership in the on-path set is checked-and-inserted as one step, and the
//! first insertion that fails is reported as the cycle error.
//!
//! Visitation order is defined by the stack discipline and preserved in the
//! emission sequence; the bookkeeping sets only answer membership.

use fxhash::FxHashSet;

use crate::error::ObddError;
use crate::graph::Graph;
use crate::reference::NodeId;

/// Which successors the cursor follows at every decision node.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Direction {
    /// Always follow the same fixed branch; one deterministic path per walk.
    Branch(bool),
    /// Explore both branches depth-first (the validation walk).
    Both,
}

/// A cursor over a graph: current position, pending successors, and the
/// visited bookkeeping that distinguishes legitimate sharing (a node reached
/// by two different paths) from a cycle (a node revisited on the current
/// path).
pub struct Traversal<'a> {
    graph: &'a Graph,
    direction: Direction,
    /// Pending work; the `bool` marks the post-visit unwind of a node.
    stack: Vec<(NodeId, bool)>,
    /// Nodes whose subgraphs are fully explored.
    visited: FxHashSet<NodeId>,
    /// Nodes on the current root-to-cursor path.
    on_path: FxHashSet<NodeId>,
}

impl<'a> Traversal<'a> {
    pub fn new(graph: &'a Graph, start: NodeId, direction: Direction) -> Self {
        Self {
            graph,
            direction,
            stack: vec![(start, false)],
            visited: FxHashSet::default(),
            on_path: FxHashSet::default(),
        }
    }
}

impl Iterator for Traversal<'_> {
    type Item = Result<NodeId, ObddError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, unwinding)) = self.stack.pop() {
            if unwinding {
                self.on_path.remove(&node);
                self.visited.insert(node);
                continue;
            }
            if self.visited.contains(&node) {
                // Reached again over a different path: sharing, not a cycle.
                continue;
            }
            if !self.on_path.insert(node) {
                return Some(Err(ObddError::InvalidNodeReference(node)));
            }
            self.stack.push((node, true));
            match self.direction {
                Direction::Branch(branch) => {
                    if let Some(next) = self.graph.branch(node, branch) {
                        self.stack.push((next, false));
                    }
                }
                Direction::Both => {
                    // False pushed first so the true branch is walked first.
                    if let Some(next) = self.graph.branch(node, false) {
                        self.stack.push((next, false));
                    }
                    if let Some(next) = self.graph.branch(node, true) {
                        self.stack.push((next, false));
                    }
                }
            }
            return Some(Ok(node));
        }
        None
    }
}
