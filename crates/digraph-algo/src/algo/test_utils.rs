// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use crate::algo::{GraphProjection, ProjectionBuilder};
use digraph_common::SimpleGraph;

/// Build a graph whose node order is exactly `nodes`, so slot `i` is `nodes[i]`.
pub fn build_simple_graph(nodes: Vec<u32>, edges: Vec<(u32, u32)>) -> SimpleGraph<u32> {
    let mut graph = SimpleGraph::with_capacity(nodes.len());
    for node in nodes {
        graph.add_node(node);
    }
    for (src, dst) in edges {
        graph
            .try_add_edge(&src, &dst)
            .expect("Edge endpoint not in nodes list");
    }
    graph
}

/// Projection with both edge directions for algorithm unit tests.
pub fn build_test_graph(nodes: Vec<u32>, edges: Vec<(u32, u32)>) -> GraphProjection<u32> {
    let graph = build_simple_graph(nodes, edges);
    ProjectionBuilder::new(&graph).include_reverse(true).build()
}
