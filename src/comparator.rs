//! Comparison of validated graphs.
//!
//! The equivalence check is a directional-traversal approximation, not a
//! full per-assignment Boolean equality: for each direction, one fixed
//! branch is followed from root to terminal in both graphs, the two terminal
//! values are folded through the operator, and the two directional outcomes
//! are folded once more. Graphs that differ only on paths the fixed
//! directions never reach are reported as equivalent. This behavior is
//! deliberate and must not be replaced with an apply-style algorithm.

use std::cmp::Ordering;

use log::debug;

use crate::error::{ObddError, Result};
use crate::graph::Graph;
use crate::logical::Logical;
use crate::traverse::Direction;

/// A stateless comparison service over any number of validated graphs.
#[derive(Debug, Default, Copy, Clone)]
pub struct Comparator;

impl Comparator {
    pub fn new() -> Self {
        Self
    }

    /// General-purpose ordering of two graphs.
    ///
    /// Equivalence under [`Logical::And`] is the tie; otherwise the graph
    /// with the smaller unique table orders first.
    pub fn compare(&self, g1: &Graph, g2: &Graph) -> Result<Ordering> {
        if self.compare_with(g1, g2, Logical::And)? {
            Ok(Ordering::Equal)
        } else {
            Ok(g1.node_count().cmp(&g2.node_count()))
        }
    }

    /// Compare two graphs under a logical operator.
    ///
    /// Both graphs must have completed validation. For each fixed direction,
    /// each graph is walked from its root always taking that branch until a
    /// terminal is reached; the operator folds the pair of terminal values
    /// into the directional outcome, and the final result folds the two
    /// outcomes.
    pub fn compare_with(&self, g1: &Graph, g2: &Graph, op: Logical) -> Result<bool> {
        if !g1.is_initialized() || !g2.is_initialized() {
            return Err(ObddError::NotInitialized);
        }
        let on_true = op.apply(self.walk(g1, true)?, self.walk(g2, true)?);
        let on_false = op.apply(self.walk(g1, false)?, self.walk(g2, false)?);
        let result = op.apply(on_true, on_false);
        debug!(
            "compare_with({:?}): true-direction = {}, false-direction = {}, result = {}",
            op, on_true, on_false, result
        );
        Ok(result)
    }

    /// Follow the same fixed branch from the root until a terminal and
    /// return its value.
    fn walk(&self, graph: &Graph, branch: bool) -> Result<bool> {
        for step in graph.traverse(graph.root()?, Direction::Branch(branch)) {
            let node = step?;
            if let Some(value) = graph.terminal_value(node) {
                return Ok(value);
            }
        }
        Err(ObddError::NoTerminal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    /// Root x1 with its true branch rewired to x2; everything else default.
    fn single_edge_graph() -> Graph {
        let mut g = Graph::new();
        let a = g.add_node(1).unwrap();
        let b = g.add_node(2).unwrap();
        g.set_edge_reference(a, b, true).unwrap();
        g.init().unwrap();
        g
    }

    /// A graph whose walks end at the true terminal in both directions:
    /// x1's false branch goes through x2, whose false branch is rewired to
    /// the true terminal (its own true branch is parked on x3 first, since
    /// both branches may never share a target). `extra` appends one more
    /// pass-through node below x3 to vary the table size without changing
    /// either directional walk.
    fn both_directions_true_graph(extra: bool) -> Graph {
        let mut g = Graph::new();
        let a = g.add_node(1).unwrap();
        let b = g.add_node(2).unwrap();
        let c = g.add_node(3).unwrap();
        let one = g.one();
        g.set_edge_reference(a, b, false).unwrap();
        g.set_edge_reference(b, c, true).unwrap();
        g.set_edge_reference(b, one, false).unwrap();
        if extra {
            let d = g.add_node(4).unwrap();
            g.set_edge_reference(c, d, true).unwrap();
        }
        g.init().unwrap();
        g
    }

    #[test]
    fn test_requires_initialized_graphs() {
        let comparator = Comparator::new();
        let g1 = single_edge_graph();
        let mut g2 = Graph::new();
        g2.add_node(1).unwrap();
        assert_eq!(
            comparator.compare_with(&g1, &g2, Logical::And).unwrap_err(),
            ObddError::NotInitialized
        );
        assert_eq!(
            comparator.compare(&g1, &g2).unwrap_err(),
            ObddError::NotInitialized
        );
    }

    #[test]
    fn test_isomorphic_graphs_equivalent_under_or() {
        let comparator = Comparator::new();
        let g1 = single_edge_graph();
        let g2 = single_edge_graph();
        assert!(comparator.compare_with(&g1, &g2, Logical::Or).unwrap());
    }

    #[test]
    fn test_self_comparison_is_a_tie() {
        let comparator = Comparator::new();
        // Tie through the AND fold failing but the sizes matching...
        let g = single_edge_graph();
        assert_eq!(comparator.compare(&g, &g).unwrap(), Ordering::Equal);
        // ...and through genuine AND equivalence.
        let h = both_directions_true_graph(false);
        assert_eq!(comparator.compare(&h, &h).unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_equivalence_wins_over_size() {
        let comparator = Comparator::new();
        let g1 = both_directions_true_graph(false);
        let g2 = both_directions_true_graph(true);
        assert_ne!(g1.node_count(), g2.node_count());
        // Both walks of both graphs end at the true terminal, so the AND
        // fold holds and the size difference never comes into play.
        assert!(comparator.compare_with(&g1, &g2, Logical::And).unwrap());
        assert_eq!(comparator.compare(&g1, &g2).unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_size_fallback_orders_smaller_first() {
        let comparator = Comparator::new();
        let small = single_edge_graph();
        // Three-node chain; its false-direction walk still ends at the
        // false terminal, so the AND fold fails for any pairing with it.
        let mut big = Graph::new();
        let a = big.add_node(1).unwrap();
        let b = big.add_node(2).unwrap();
        let c = big.add_node(3).unwrap();
        big.set_edge_reference(a, b, true).unwrap();
        big.set_edge_reference(b, c, true).unwrap();
        big.init().unwrap();

        assert_eq!(comparator.compare(&small, &big).unwrap(), Ordering::Less);
        assert_eq!(comparator.compare(&big, &small).unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_directional_approximation_misses_differences() {
        let comparator = Comparator::new();
        // g1 routes x2 through the true branch, g2 through the false one:
        // different functions, but the fixed-direction walks reach the same
        // terminals, so OR reports them as equivalent.
        let g1 = single_edge_graph();
        let mut g2 = Graph::new();
        let a = g2.add_node(1).unwrap();
        let b = g2.add_node(2).unwrap();
        g2.set_edge_reference(a, b, false).unwrap();
        g2.init().unwrap();

        assert!(comparator.compare_with(&g1, &g2, Logical::Or).unwrap());
    }

    #[test]
    fn test_not_operator_detects_agreement() {
        let comparator = Comparator::new();
        let g1 = single_edge_graph();
        let g2 = single_edge_graph();
        // Identical walks agree in both directions; the binary inequality
        // test then reports false for each direction and for the fold.
        assert!(!comparator.compare_with(&g1, &g2, Logical::Not).unwrap());
    }
}
