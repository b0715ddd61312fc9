use std::fmt::{Display, Formatter};

/// An opaque handle to a node stored in a [`Graph`][crate::graph::Graph] arena.
///
/// Handles are assigned at construction and are only meaningful for the graph
/// that produced them. They serve as a deterministic ordering tie-break and
/// never participate in structural equality.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Return the raw arena index of the handle.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Return the internal representation of the handle.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}
