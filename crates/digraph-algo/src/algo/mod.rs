// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Directed Graph Algorithm Engine
//!
//! # Architecture
//!
//! Two execution paths are supported:
//!
//! - **DirectTraversal**: hash-based traversal on the caller's [`Graph`].
//!   Best for light algorithms (BFS, DFS, single shortest path, reachability).
//!
//! - **GraphProjection**: materialized dense CSR for heavy algorithms.
//!   Best for whole-graph algorithms (SCC, k-shortest paths, Johnson).
//!
//! The [`operations`] module wraps both behind one function per query.
//!
//! # Example
//!
//! ```
//! use digraph_algo::algo::{Algorithm, ProjectionBuilder, Scc, SccConfig};
//! use digraph_common::SimpleGraph;
//!
//! let graph = SimpleGraph::from_edges([(1, 2), (2, 1), (2, 3)]);
//!
//! // Build projection
//! let projection = ProjectionBuilder::new(&graph)
//!     .include_reverse(Scc::needs_reverse())
//!     .build();
//!
//! // Run algorithm
//! let result = Scc::run(&projection, SccConfig::default());
//! assert_eq!(result.component_count, 2);
//! ```
//!
//! [`Graph`]: digraph_common::Graph

mod id_map;
pub mod projection;
mod traversal;

pub mod algorithms;
mod node_cycles;
pub mod operations;
pub mod views;

pub use algorithms::*;
pub use id_map::IdMap;
pub use projection::{GraphProjection, ProjectionBuilder, ProjectionConfig};
pub use traversal::{BfsIterator, DfsIterator, DirectTraversal, Direction, Path};

#[cfg(test)]
pub mod test_utils;
