// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Core algorithm trait and the projection-based algorithms.

use crate::algo::GraphProjection;
use digraph_common::Node;

/// Core trait for graph algorithms that run on a dense projection.
pub trait Algorithm {
    /// Algorithm parameters.
    type Config<N: Node>: Clone;
    /// Result type.
    type Result<N: Node>;

    /// Algorithm identifier.
    fn name() -> &'static str;

    /// Execute algorithm on a projection.
    fn run<N: Node>(graph: &GraphProjection<N>, config: Self::Config<N>) -> Self::Result<N>;

    /// Whether this algorithm requires reverse edges.
    fn needs_reverse() -> bool {
        false
    }
}

mod scc;
pub use scc::{Component, Scc, SccConfig, SccResult};
pub(crate) use scc::{SlotComponents, tarjan};

mod scc_graph;
pub use scc_graph::{Condensation, CondensationConfig, SccGraph};

mod topological_sort;
pub use topological_sort::{TopologicalOrder, TopologicalSort, TopologicalSortConfig};

mod path_heap;

mod k_shortest_paths;
pub use k_shortest_paths::{KShortestPaths, KShortestPathsConfig, KShortestPathsResult};

mod elementary_circuits;
pub use elementary_circuits::{
    ElementaryCircuits, ElementaryCircuitsConfig, ElementaryCircuitsResult,
};
