use std::fmt::{Display, Formatter};

use crate::reference::NodeId;

/// A transient edge descriptor returned by edge establishment.
///
/// The durable edge state lives in the forward branch slots and the reverse
/// parent map of the nodes involved; an `Edge` is never stored back into the
/// graph.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub branch: bool,
}

impl Display for Edge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -[{}]-> {}",
            self.source,
            if self.branch { "true" } else { "false" },
            self.target
        )
    }
}
