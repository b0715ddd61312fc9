use thiserror::Error;

use crate::reference::NodeId;

/// The result of a graph or comparison operation.
pub type Result<T> = std::result::Result<T, ObddError>;

/// Error returned when a graph operation failed.
///
/// All variants signal programmer/usage errors: callers are expected to fix
/// the graph construction, not retry. No partial state is rolled back when an
/// operation fails part-way; the graph stays exactly as constructed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ObddError {
    /// Structurally forbidden wiring, e.g. both branches of a node pointing
    /// at the same target, or a terminal used as an edge source.
    #[error("invalid node configuration: {0}")]
    InvalidConfiguration(String),

    /// A variable-based edge operation referenced a variable that is absent
    /// from the unique table.
    #[error("no node with variable {0} exists in the graph")]
    NodeNotFound(i32),

    /// No reverse parent entry is recorded between the two nodes.
    #[error("no edge recorded from {from} to {to}")]
    EdgeNotFound { from: NodeId, to: NodeId },

    /// Validation found zero or multiple in-degree-zero decision nodes.
    #[error("expected exactly one root candidate, found {0}")]
    InvalidRoot(usize),

    /// Validation revisited a node on the current traversal path (a cycle).
    #[error("node {0} was revisited on the current traversal path")]
    InvalidNodeReference(NodeId),

    /// Comparison was attempted on a graph that has not completed validation.
    #[error("graph has not been initialized")]
    NotInitialized,

    /// Structural mutation was attempted after successful validation.
    #[error("graph is already initialized; its structure is frozen")]
    AlreadyInitialized,

    /// A directional walk ended without reaching a terminal node.
    #[error("traversal ended without reaching a terminal node")]
    NoTerminal,
}
