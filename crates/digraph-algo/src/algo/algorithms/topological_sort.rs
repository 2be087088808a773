// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Topological Order over strongly connected components.
//!
//! Produces a linear ordering of all nodes such that for every edge `u -> v`
//! between different components, `u` comes before `v`. Members of one
//! component are contiguous. Unlike a plain topological sort this always
//! succeeds; cyclic graphs are reported through `is_acyclic` and
//! `circular_dependency`.

use crate::algo::GraphProjection;
use crate::algo::algorithms::{Algorithm, tarjan};
use digraph_common::Node;
use fxhash::FxHashMap;
use std::cmp::Ordering;
use tracing::{debug, instrument};

pub struct TopologicalSort;

#[derive(Debug, Clone, Default)]
pub struct TopologicalSortConfig {}

#[derive(Debug, Clone)]
pub struct TopologicalOrder<N> {
    sorted_nodes: Vec<N>,
    index: FxHashMap<N, u32>,
    /// An edge inside the first cyclic component, if any
    circular: Option<(N, N)>,
}

impl<N: Node> TopologicalOrder<N> {
    pub fn sorted_nodes(&self) -> &[N] {
        &self.sorted_nodes
    }

    pub fn is_acyclic(&self) -> bool {
        self.circular.is_none()
    }

    /// An edge `(u, v)` lying on some cycle, or None for an acyclic graph.
    pub fn circular_dependency(&self) -> Option<(&N, &N)> {
        self.circular.as_ref().map(|(u, v)| (u, v))
    }

    /// Position of a node in the order.
    pub fn index_of(&self, node: &N) -> Option<usize> {
        self.index.get(node).map(|&i| i as usize)
    }

    /// Compare two nodes by their position. Unknown nodes sort last.
    pub fn compare(&self, a: &N, b: &N) -> Ordering {
        let key = |n: &N| self.index_of(n).unwrap_or(usize::MAX);
        key(a).cmp(&key(b))
    }
}

impl Algorithm for TopologicalSort {
    type Config<N: Node> = TopologicalSortConfig;
    type Result<N: Node> = TopologicalOrder<N>;

    fn name() -> &'static str {
        "topological_sort"
    }

    #[instrument(skip_all, level = "debug", fields(vertices = graph.vertex_count()))]
    fn run<N: Node>(graph: &GraphProjection<N>, _config: Self::Config<N>) -> Self::Result<N> {
        let slots = tarjan(graph, |_| true);

        // Tarjan emits sinks first; walk components backwards.
        let mut sorted_slots = Vec::with_capacity(graph.vertex_count());
        let mut circular = None;
        for id in (0..slots.members.len() as u32).rev() {
            let members = &slots.members[id as usize];
            if circular.is_none() && slots.is_cyclic(graph, id) {
                circular = members.iter().find_map(|&u| {
                    graph
                        .out_neighbors(u)
                        .iter()
                        .find(|&&v| slots.component_of[v as usize] == id)
                        .map(|&v| (graph.to_node(u).clone(), graph.to_node(v).clone()))
                });
            }
            sorted_slots.extend(members.iter().rev());
        }

        let sorted_nodes = graph.to_nodes(&sorted_slots);
        let index = sorted_nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.clone(), i as u32))
            .collect();

        debug!(acyclic = circular.is_none(), "topological order computed");

        TopologicalOrder {
            sorted_nodes,
            index,
            circular,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::test_utils::build_test_graph;

    #[test]
    fn test_topological_sort_dag() {
        // 0 -> 1 -> 2, 0 -> 2
        let graph = build_test_graph(vec![2, 1, 0], vec![(0, 1), (1, 2), (0, 2)]);

        let result = TopologicalSort::run(&graph, TopologicalSortConfig::default());

        assert!(result.is_acyclic());
        assert_eq!(result.sorted_nodes(), &[0, 1, 2]);
        assert_eq!(result.compare(&0, &2), Ordering::Less);
        assert_eq!(result.index_of(&1), Some(1));
    }

    #[test]
    fn test_topological_sort_cycle() {
        // 3 -> {0 <-> 1} -> 2
        let graph = build_test_graph(vec![0, 1, 2, 3], vec![(0, 1), (1, 0), (1, 2), (3, 0)]);

        let result = TopologicalSort::run(&graph, TopologicalSortConfig::default());

        assert!(!result.is_acyclic());
        let (u, v) = result.circular_dependency().unwrap();
        assert!((*u, *v) == (0, 1) || (*u, *v) == (1, 0));

        assert_eq!(result.sorted_nodes().len(), 4);
        assert_eq!(result.sorted_nodes()[0], 3);
        assert_eq!(result.sorted_nodes()[3], 2);
    }

    #[test]
    fn test_self_loop_is_circular() {
        let graph = build_test_graph(vec![0], vec![(0, 0)]);
        let result = TopologicalSort::run(&graph, TopologicalSortConfig::default());
        assert_eq!(result.circular_dependency(), Some((&0, &0)));
    }
}
