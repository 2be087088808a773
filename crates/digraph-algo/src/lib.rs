// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

pub mod algo;

pub use algo::operations::{
    NeighbourhoodConfig, collect_outs_recursively, compute_scc_graph,
    compute_strongly_connected_components, find_cycles, find_k_shortest_paths,
    find_node_neighbourhood, find_node_neighbourhood_with, find_nodes_between, find_path,
    invert_edge_directions, iterate_simple_cycles, iterate_simple_cycles_with, perform_bfs,
    perform_dfs, topological_order,
};
pub use algo::projection::{GraphProjection, ProjectionBuilder, ProjectionConfig};
pub use algo::views::{ExcludedNodeGraph, InvertedGraph};
pub use algo::{
    Component, Direction, ElementaryCircuitsConfig, IdMap, Path, SccGraph, TopologicalOrder,
};
