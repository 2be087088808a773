// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! One-call entry points over any [`Graph`].
//!
//! Light queries run as direct traversals on the caller's graph. The heavy
//! ones first build a [`GraphProjection`] sized for the algorithm, run it and
//! map slots back to nodes. Nodes unknown to the graph behave as isolated
//! nodes.

use crate::algo::algorithms::{
    Algorithm, Component, Condensation, CondensationConfig, ElementaryCircuits,
    ElementaryCircuitsConfig, KShortestPaths, KShortestPathsConfig, Scc, SccConfig, SccGraph,
    TopologicalOrder, TopologicalSort, TopologicalSortConfig,
};
use crate::algo::projection::{GraphProjection, ProjectionBuilder};
use crate::algo::traversal::{Direction, DirectTraversal, Path};
use crate::algo::views::InvertedGraph;
use digraph_common::{CancellationToken, Graph, NeverCancelled};
use fxhash::FxHashSet;

pub use crate::algo::node_cycles::find_cycles;

/// Options for [`find_node_neighbourhood_with`].
#[derive(Debug, Clone, Copy)]
pub struct NeighbourhoodConfig {
    /// Maximum hop distance from the start node
    pub level_bound: u32,
    pub direction: Direction,
}

impl Default for NeighbourhoodConfig {
    fn default() -> Self {
        Self {
            level_bound: 1,
            direction: Direction::Both,
        }
    }
}

fn project<A: Algorithm, G: Graph>(graph: &G) -> GraphProjection<G::Node> {
    ProjectionBuilder::new(graph)
        .include_reverse(A::needs_reverse())
        .build()
}

/// Breadth-first traversal from `root`, calling `visit(node, level)` once per
/// reachable node in non-decreasing level order.
pub fn perform_bfs<G, F>(graph: &G, root: G::Node, mut visit: F)
where
    G: Graph,
    F: FnMut(&G::Node, u32),
{
    for (node, level) in DirectTraversal::new(graph).bfs(root, Direction::Outgoing) {
        visit(&node, level);
    }
}

/// Depth-first traversal from `root`, calling `visit` once per reachable node.
pub fn perform_dfs<G, F>(graph: &G, root: G::Node, mut visit: F)
where
    G: Graph,
    F: FnMut(&G::Node),
{
    for node in DirectTraversal::new(graph).dfs(root, Direction::Outgoing) {
        visit(&node);
    }
}

/// A shortest path by hop count, or None if `finish` is unreachable.
pub fn find_path<G: Graph>(graph: &G, start: &G::Node, finish: &G::Node) -> Option<Path<G::Node>> {
    DirectTraversal::new(graph).shortest_path(start, finish)
}

/// Up to `k` shortest paths from `start` to `finish`, shortest first.
///
/// Cancellation returns the paths found so far.
pub fn find_k_shortest_paths<G, C>(
    graph: &G,
    start: &G::Node,
    finish: &G::Node,
    k: usize,
    cancel: &C,
) -> Vec<Path<G::Node>>
where
    G: Graph,
    C: CancellationToken + ?Sized,
{
    if k == 0 || cancel.is_cancelled() {
        return Vec::new();
    }
    let projection = project::<KShortestPaths, _>(graph);
    if cancel.is_cancelled() {
        return Vec::new();
    }
    let config = KShortestPathsConfig::new(start.clone(), finish.clone(), k);
    KShortestPaths::run_cancellable(&projection, config, cancel).paths
}

/// The graph of strongly connected components.
pub fn compute_scc_graph<G: Graph>(graph: &G) -> SccGraph<G::Node> {
    let projection = project::<Condensation, _>(graph);
    Condensation::run(&projection, CondensationConfig::default())
}

/// The strongly connected components, sinks first.
pub fn compute_strongly_connected_components<G: Graph>(graph: &G) -> Vec<Component<G::Node>> {
    let projection = project::<Scc, _>(graph);
    Scc::run(&projection, SccConfig::default()).components
}

/// Feed every elementary cycle of the graph to `consumer`, each exactly once.
pub fn iterate_simple_cycles<G, F>(graph: &G, consumer: F)
where
    G: Graph,
    F: FnMut(Path<G::Node>),
{
    iterate_simple_cycles_with(graph, &ElementaryCircuitsConfig::default(), &NeverCancelled, consumer);
}

/// [`iterate_simple_cycles`] with a limit and a cancellation token. Returns
/// the number of cycles produced.
pub fn iterate_simple_cycles_with<G, C, F>(
    graph: &G,
    config: &ElementaryCircuitsConfig,
    cancel: &C,
    consumer: F,
) -> usize
where
    G: Graph,
    C: CancellationToken + ?Sized,
    F: FnMut(Path<G::Node>),
{
    let projection = project::<ElementaryCircuits, _>(graph);
    ElementaryCircuits::for_each(&projection, config, cancel, consumer)
}

/// Nodes within `level_bound` hops of `node` in either direction, including
/// `node` itself.
pub fn find_node_neighbourhood<G: Graph>(
    graph: &G,
    node: &G::Node,
    level_bound: u32,
) -> FxHashSet<G::Node> {
    find_node_neighbourhood_with(
        graph,
        node,
        &NeighbourhoodConfig {
            level_bound,
            ..Default::default()
        },
    )
}

pub fn find_node_neighbourhood_with<G: Graph>(
    graph: &G,
    node: &G::Node,
    config: &NeighbourhoodConfig,
) -> FxHashSet<G::Node> {
    DirectTraversal::new(graph).neighbourhood(node.clone(), config.level_bound, config.direction)
}

/// Nodes lying on some path from `start` to `finish`, both included.
///
/// Empty when `finish` is not reachable from `start`.
pub fn find_nodes_between<G: Graph>(
    graph: &G,
    start: &G::Node,
    finish: &G::Node,
) -> FxHashSet<G::Node> {
    let traversal = DirectTraversal::new(graph);
    let forward = traversal.reachable(start.clone(), Direction::Outgoing);
    if !forward.contains(finish) {
        return FxHashSet::default();
    }
    let backward = traversal.reachable(finish.clone(), Direction::Incoming);
    forward.intersection(&backward).cloned().collect()
}

/// A view of `graph` with every edge reversed.
pub fn invert_edge_directions<G: Graph>(graph: &G) -> InvertedGraph<&G> {
    InvertedGraph::new(graph)
}

/// All nodes reachable from `start`, including `start`.
pub fn collect_outs_recursively<G: Graph>(graph: &G, start: &G::Node) -> FxHashSet<G::Node> {
    DirectTraversal::new(graph).reachable(start.clone(), Direction::Outgoing)
}

/// Topological order of the components, members of a component contiguous.
pub fn topological_order<G: Graph>(graph: &G) -> TopologicalOrder<G::Node> {
    let projection = project::<TopologicalSort, _>(graph);
    TopologicalSort::run(&projection, TopologicalSortConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use digraph_common::SimpleGraph;
    use std::cell::Cell;

    fn sample() -> SimpleGraph<&'static str> {
        // a -> b -> c -> d, b -> e, x isolated from the chain
        let mut graph = SimpleGraph::from_edges([("a", "b"), ("b", "c"), ("c", "d"), ("b", "e")]);
        graph.add_node("x");
        graph
    }

    #[test]
    fn test_perform_bfs_levels() {
        let graph = sample();
        let mut visited = Vec::new();
        perform_bfs(&graph, "a", |node, level| visited.push((*node, level)));

        assert_eq!(visited[0], ("a", 0));
        assert_eq!(visited[1], ("b", 1));
        assert_eq!(visited.len(), 5);
        assert!(visited.windows(2).all(|w| w[0].1 <= w[1].1));
    }

    #[test]
    fn test_perform_dfs_visits_reachable_once() {
        let graph = sample();
        let mut visited = Vec::new();
        perform_dfs(&graph, "b", |node| visited.push(*node));

        visited.sort();
        assert_eq!(visited, vec!["b", "c", "d", "e"]);
    }

    #[test]
    fn test_find_nodes_between() {
        let graph = sample();
        let between = find_nodes_between(&graph, &"a", &"d");
        let expected: FxHashSet<_> = ["a", "b", "c", "d"].into_iter().collect();
        assert_eq!(between, expected);

        assert!(find_nodes_between(&graph, &"d", &"a").is_empty());
    }

    #[test]
    fn test_neighbourhood_defaults_to_both_directions() {
        let graph = sample();
        let near = find_node_neighbourhood(&graph, &"b", 1);
        let expected: FxHashSet<_> = ["a", "b", "c", "e"].into_iter().collect();
        assert_eq!(near, expected);

        let outgoing = find_node_neighbourhood_with(
            &graph,
            &"b",
            &NeighbourhoodConfig {
                level_bound: 2,
                direction: Direction::Outgoing,
            },
        );
        assert_eq!(outgoing.len(), 4); // b, c, e, d
    }

    #[test]
    fn test_inverted_graph_paths() {
        let graph = sample();
        let inverted = invert_edge_directions(&graph);
        let path = find_path(&inverted, &"d", &"a").unwrap();
        assert_eq!(path.nodes, vec!["d", "c", "b", "a"]);
    }

    #[test]
    fn test_collect_outs_recursively() {
        let graph = sample();
        let outs = collect_outs_recursively(&graph, &"c");
        assert_eq!(outs.len(), 2);
        assert!(outs.contains(&"c") && outs.contains(&"d"));
    }

    #[test]
    fn test_k_shortest_zero_k() {
        let graph = sample();
        assert!(find_k_shortest_paths(&graph, &"a", &"d", 0, &NeverCancelled).is_empty());
    }

    #[test]
    fn test_k_shortest_cancelled_while_projecting() {
        // Let the first poll through; the token fires once the projection is built.
        let graph = sample();
        let polls = Cell::new(0);
        let token = || {
            polls.set(polls.get() + 1);
            polls.get() > 1
        };

        let paths = find_k_shortest_paths(&graph, &"a", &"d", 3, &token);
        assert!(paths.is_empty());
        assert_eq!(polls.get(), 2);
    }
}
