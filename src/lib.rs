//! # obdd-rs: Ordered Binary Decision Diagrams in Rust
//!
//! **`obdd-rs`** is a library for constructing, validating, and comparing
//! **Ordered Binary Decision Diagrams (OBDDs)**: compact, shared graph
//! representations of Boolean functions used in formal verification, logic
//! synthesis, and decision analysis.
//!
//! ## Architecture
//!
//! - **Graph-Centric Ownership**: All nodes live in an arena owned by a
//!   [`Graph`][crate::graph::Graph] and are addressed through lightweight
//!   [`NodeId`][crate::reference::NodeId] handles, so diagrams that share
//!   sub-graphs (and may even be cyclic before validation) never create
//!   ownership cycles.
//! - **Hash Consing by Variable**: Each graph keeps at most one node per
//!   decision variable; adding the same variable twice returns the same
//!   handle. Note that this is narrower than the classical
//!   (variable, low, high) consing: a variable occupies one position in the
//!   whole diagram.
//! - **Validation Gate**: A graph must pass [`init`][crate::graph::Graph::init]
//!   (unique root resolution + acyclicity) before it can be compared;
//!   afterwards its structure is frozen.
//! - **Directional Comparison**: The
//!   [`Comparator`][crate::comparator::Comparator] folds per-direction walk
//!   outcomes through a [`Logical`][crate::logical::Logical] operator. This
//!   is a deliberate approximation of semantic equivalence, not a full
//!   apply-style equality test.
//!
//! ## Basic Usage
//!
//! ```rust
//! use std::cmp::Ordering;
//!
//! use obdd_rs::comparator::Comparator;
//! use obdd_rs::graph::Graph;
//! use obdd_rs::logical::Logical;
//!
//! # fn main() -> Result<(), obdd_rs::error::ObddError> {
//! // 1. Construct a graph; the two terminal leaves come pre-populated.
//! let mut g = Graph::new();
//!
//! // 2. Add decision nodes (hash-consed by variable).
//! let x1 = g.add_node(1)?;
//! let x2 = g.add_node(2)?;
//! assert_eq!(g.add_node(1)?, x1);
//!
//! // 3. Wire edges, then validate once.
//! g.set_edge_reference(x1, x2, true)?;
//! g.init()?;
//!
//! // 4. Compare validated graphs.
//! let comparator = Comparator::new();
//! assert!(comparator.compare_with(&g, &g, Logical::Or)?);
//! assert_eq!(comparator.compare(&g, &g)?, Ordering::Equal);
//! # Ok(()) }
//! ```
//!
//! ## Core Components
//!
//! - **[`graph`]**: The owning [`Graph`][crate::graph::Graph] container:
//!   arena, terminals, unique table, edge operations, validation.
//! - **[`comparator`]**: Ordering and logical comparison of validated graphs.
//! - **[`traverse`]**: The pull-based traversal cursor shared by validation
//!   and comparison.
//! - **[`dot`]**: Utilities for visualizing graphs using Graphviz.

pub mod comparator;
pub mod dot;
pub mod edge;
pub mod error;
pub mod graph;
pub mod logical;
pub mod node;
pub mod reference;
pub mod traverse;
