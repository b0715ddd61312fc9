use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use fxhash::FxHashMap;
use log::warn;

use crate::error::{ObddError, Result};
use crate::reference::NodeId;

/// Reserved variable of the canonical `true` terminal.
pub const VAR_ONE: i32 = -1;
/// Reserved variable of the canonical `false` terminal.
pub const VAR_ZERO: i32 = -2;

/// Which branch of a parent reaches a node, as recorded in the reverse map.
///
/// `Unknown` marks a back-reference that was established without a branch,
/// i.e. the graph's own link to a freshly constructed node.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BranchLabel {
    True,
    False,
    Unknown,
}

impl From<bool> for BranchLabel {
    fn from(branch: bool) -> Self {
        if branch {
            BranchLabel::True
        } else {
            BranchLabel::False
        }
    }
}

/// The owner of a reverse edge: either a real node, or the graph itself for
/// the initial back-reference every fresh node starts with.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ParentRef {
    Graph,
    Node(NodeId),
}

/// The two concrete node variants.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NodeKind {
    /// An internal node; traversal continues through the selected branch.
    Decision,
    /// A leaf carrying a fixed boolean value; it has no outgoing branches.
    Terminal { value: bool },
}

// Terminal branch reads are expected, not erroneous; say so once per process.
static TERMINAL_BRANCH_WARNED: AtomicBool = AtomicBool::new(false);

fn warn_terminal_branch_once() {
    if TERMINAL_BRANCH_WARNED
        .compare_exchange(false, true, AtomicOrdering::Relaxed, AtomicOrdering::Relaxed)
        .is_ok()
    {
        warn!("a terminal node has no branches");
    }
}

/// A node in the diagram: identity, decision variable, forward branch slots,
/// and the reverse parent map mirroring incoming forward assignments.
///
/// Forward branches and reverse parent entries are only ever updated together
/// by the graph-level edge operations; nothing here enforces the mirror on
/// its own.
#[derive(Debug, Clone)]
pub struct NodeData {
    id: NodeId,
    variable: i32,
    kind: NodeKind,
    true_branch: Option<NodeId>,
    false_branch: Option<NodeId>,
    parents: FxHashMap<ParentRef, BranchLabel>,
}

impl NodeData {
    /// Construct a decision node with the given initial branches and the
    /// graph recorded as its only parent.
    ///
    /// Fails eagerly when both branches point at the same node: identical
    /// branches denote redundancy the model forbids at construction time.
    pub(crate) fn new_decision(
        id: NodeId,
        variable: i32,
        true_branch: NodeId,
        false_branch: NodeId,
    ) -> Result<Self> {
        if true_branch == false_branch {
            return Err(ObddError::InvalidConfiguration(format!(
                "true and false branches of {} both point at {}",
                id, true_branch
            )));
        }
        let mut parents = FxHashMap::default();
        parents.insert(ParentRef::Graph, BranchLabel::Unknown);
        Ok(Self {
            id,
            variable,
            kind: NodeKind::Decision,
            true_branch: Some(true_branch),
            false_branch: Some(false_branch),
            parents,
        })
    }

    /// Construct a terminal leaf at a reserved variable slot.
    pub(crate) fn new_terminal(id: NodeId, variable: i32, value: bool) -> Self {
        let mut parents = FxHashMap::default();
        parents.insert(ParentRef::Graph, BranchLabel::Unknown);
        Self {
            id,
            variable,
            kind: NodeKind::Terminal { value },
            true_branch: None,
            false_branch: None,
            parents,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn variable(&self) -> i32 {
        self.variable
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, NodeKind::Terminal { .. })
    }

    /// The fixed value of a terminal leaf, `None` for decision nodes.
    pub fn terminal_value(&self) -> Option<bool> {
        match self.kind {
            NodeKind::Terminal { value } => Some(value),
            NodeKind::Decision => None,
        }
    }

    /// Return the true or false branch, `None` when absent.
    ///
    /// Terminals always answer "no successor"; this is their defining
    /// property, not an error, and is logged at most once per process.
    pub fn branch(&self, branch: bool) -> Option<NodeId> {
        if self.is_terminal() {
            warn_terminal_branch_once();
            return None;
        }
        if branch {
            self.true_branch
        } else {
            self.false_branch
        }
    }

    /// Assign a forward branch.
    ///
    /// Rejects duplicate instances among {parent, true-branch, false-branch}:
    /// the other branch already holding `target`, or `target` already being a
    /// recorded parent of this node.
    pub(crate) fn set_branch(&mut self, branch: bool, target: NodeId) -> Result<()> {
        if self.is_terminal() {
            return Err(ObddError::InvalidConfiguration(format!(
                "terminal {} has no branch slots",
                self.id
            )));
        }
        let other = if branch {
            self.false_branch
        } else {
            self.true_branch
        };
        if other == Some(target) {
            return Err(ObddError::InvalidConfiguration(format!(
                "true and false branches of {} both point at {}",
                self.id, target
            )));
        }
        if self.parents.contains_key(&ParentRef::Node(target)) {
            return Err(ObddError::InvalidConfiguration(format!(
                "{} is both a parent and a branch of {}",
                target, self.id
            )));
        }
        if branch {
            self.true_branch = Some(target);
        } else {
            self.false_branch = Some(target);
        }
        Ok(())
    }

    /// Record a reverse parent entry.
    ///
    /// Rejects a parent that is also one of this node's branches (the same
    /// duplicate-instance rule as [`set_branch`][Self::set_branch]).
    pub(crate) fn add_parent(&mut self, parent: ParentRef, label: BranchLabel) -> Result<()> {
        if let ParentRef::Node(node) = parent {
            if self.true_branch == Some(node) || self.false_branch == Some(node) {
                return Err(ObddError::InvalidConfiguration(format!(
                    "{} is both a parent and a branch of {}",
                    node, self.id
                )));
            }
        }
        self.parents.insert(parent, label);
        Ok(())
    }

    pub(crate) fn remove_parent(&mut self, parent: ParentRef) {
        self.parents.remove(&parent);
    }

    /// The recorded branch label from `parent`, if any.
    pub fn parent_label(&self, parent: ParentRef) -> Option<BranchLabel> {
        self.parents.get(&parent).copied()
    }

    pub fn has_parent(&self, parent: ParentRef) -> bool {
        self.parents.contains_key(&parent)
    }

    /// Whether any real node (as opposed to the graph's initial
    /// back-reference) is recorded as a parent. Root resolution is driven by
    /// this predicate.
    pub fn has_node_parent(&self) -> bool {
        self.parents
            .keys()
            .any(|p| matches!(p, ParentRef::Node(_)))
    }

    pub fn parent_count(&self) -> usize {
        self.parents.len()
    }

    /// Ordering by decision variable, ascending, with the id as a
    /// deterministic tie-break. Never used for equality.
    pub fn order(&self, other: &NodeData) -> Ordering {
        self.variable
            .cmp(&other.variable)
            .then(self.id.cmp(&other.id))
    }
}

impl Display for NodeData {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            NodeKind::Terminal { value } => write!(f, "Terminal({})", value),
            NodeKind::Decision => {
                let show = |b: Option<NodeId>| match b {
                    Some(id) => format!("{}", id),
                    None => "''".to_string(),
                };
                write!(
                    f,
                    "Decision(x{}, true:{}, false:{})",
                    self.variable,
                    show(self.true_branch),
                    show(self.false_branch)
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_identical_branches_rejected_at_construction() {
        let target = NodeId::new(1);
        let res = NodeData::new_decision(NodeId::new(5), 3, target, target);
        assert!(matches!(res, Err(ObddError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_set_branch_rejects_duplicate() {
        let one = NodeId::new(0);
        let zero = NodeId::new(1);
        let mut node = NodeData::new_decision(NodeId::new(2), 1, one, zero).unwrap();
        // Rewiring the false branch onto the true branch's target is redundancy.
        let res = node.set_branch(false, one);
        assert!(matches!(res, Err(ObddError::InvalidConfiguration(_))));
        // A fresh target is fine.
        node.set_branch(false, NodeId::new(3)).unwrap();
        assert_eq!(node.branch(false), Some(NodeId::new(3)));
    }

    #[test]
    fn test_parent_branch_duplicate_rejected() {
        let one = NodeId::new(0);
        let zero = NodeId::new(1);
        let mut node = NodeData::new_decision(NodeId::new(2), 1, one, zero).unwrap();
        node.set_branch(true, NodeId::new(3)).unwrap();
        // The true branch target cannot also be recorded as a parent.
        let res = node.add_parent(ParentRef::Node(NodeId::new(3)), BranchLabel::True);
        assert!(matches!(res, Err(ObddError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_terminal_branch_reads_are_noops() {
        let leaf = NodeData::new_terminal(NodeId::new(0), VAR_ONE, true);
        // Absence of branches is the defining property of a terminal; reads
        // stay quiet no matter how often they are repeated.
        for _ in 0..3 {
            assert_eq!(leaf.branch(true), None);
            assert_eq!(leaf.branch(false), None);
        }
        assert_eq!(leaf.terminal_value(), Some(true));
        assert_eq!(leaf.kind(), NodeKind::Terminal { value: true });
    }

    #[test]
    fn test_terminal_set_branch_fails() {
        let mut leaf = NodeData::new_terminal(NodeId::new(0), VAR_ZERO, false);
        let res = leaf.set_branch(true, NodeId::new(4));
        assert!(matches!(res, Err(ObddError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_fresh_node_has_only_graph_parent() {
        let node =
            NodeData::new_decision(NodeId::new(2), 7, NodeId::new(0), NodeId::new(1)).unwrap();
        assert!(node.has_parent(ParentRef::Graph));
        assert!(!node.has_node_parent());
        assert_eq!(node.parent_label(ParentRef::Graph), Some(BranchLabel::Unknown));
        assert_eq!(node.kind(), NodeKind::Decision);
    }

    #[test]
    fn test_parent_count_tracks_reverse_entries() {
        let mut node =
            NodeData::new_decision(NodeId::new(2), 1, NodeId::new(0), NodeId::new(1)).unwrap();
        assert_eq!(node.parent_count(), 1); // the graph's initial back-reference
        node.add_parent(ParentRef::Node(NodeId::new(5)), BranchLabel::True)
            .unwrap();
        node.add_parent(ParentRef::Node(NodeId::new(6)), BranchLabel::False)
            .unwrap();
        assert_eq!(node.parent_count(), 3);
        node.remove_parent(ParentRef::Node(NodeId::new(5)));
        assert_eq!(node.parent_count(), 2);
    }

    #[test]
    fn test_order_by_variable_then_id() {
        let a = NodeData::new_decision(NodeId::new(2), 1, NodeId::new(0), NodeId::new(1)).unwrap();
        let b = NodeData::new_decision(NodeId::new(3), 2, NodeId::new(0), NodeId::new(1)).unwrap();
        let c = NodeData::new_decision(NodeId::new(4), 1, NodeId::new(0), NodeId::new(1)).unwrap();
        assert_eq!(a.order(&b), Ordering::Less);
        assert_eq!(b.order(&a), Ordering::Greater);
        assert_eq!(a.order(&c), Ordering::Less); // same variable, id breaks the tie
    }

    #[test]
    fn test_label_from_bool() {
        assert_eq!(BranchLabel::from(true), BranchLabel::True);
        assert_eq!(BranchLabel::from(false), BranchLabel::False);
    }
}
