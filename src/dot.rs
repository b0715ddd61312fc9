//! Graph to DOT (Graphviz) conversion.
//!
//! Decision nodes are rendered as circles labelled with their variable,
//! terminals as boxes at the sink rank. Solid arrows are true branches,
//! dashed arrows false branches.
//!
//! ```
//! use obdd_rs::graph::Graph;
//!
//! let mut g = Graph::new();
//! let a = g.add_node(1).unwrap();
//! let b = g.add_node(2).unwrap();
//! g.set_edge_reference(a, b, true).unwrap();
//!
//! let dot = g.to_dot();
//! // Render with: dot -Tpng graph.dot -o graph.png
//! assert!(dot.contains("x1"));
//! ```

use std::fmt::Write;

use crate::graph::Graph;
use crate::reference::NodeId;

impl Graph {
    /// Render the graph in DOT format.
    pub fn to_dot(&self) -> String {
        let mut out = String::new();

        writeln!(out, "digraph obdd {{").unwrap();
        writeln!(out, "  node [shape=circle];").unwrap();

        writeln!(out, "  {{ rank=sink;").unwrap();
        for id in [self.one(), self.zero()] {
            let value = self.terminal_value(id).unwrap();
            writeln!(out, "    \"{}\" [shape=box, label=\"{}\"];", id, value).unwrap();
        }
        writeln!(out, "  }}").unwrap();

        // Stable output: variable order, ids as the tie-break.
        let mut decisions: Vec<NodeId> = self.decision_nodes().collect();
        decisions.sort_by(|&a, &b| self.node(a).order(self.node(b)));

        for &id in &decisions {
            writeln!(out, "  \"{}\" [label=\"x{}\"];", id, self.node(id).variable()).unwrap();
        }
        for &id in &decisions {
            if let Some(target) = self.branch(id, true) {
                writeln!(out, "  \"{}\" -> \"{}\" [style=solid];", id, target).unwrap();
            }
            if let Some(target) = self.branch(id, false) {
                writeln!(out, "  \"{}\" -> \"{}\" [style=dashed];", id, target).unwrap();
            }
        }

        writeln!(out, "}}").unwrap();
        out
    }
}
