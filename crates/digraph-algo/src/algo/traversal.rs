// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Direct traversal on a caller's graph.
//!
//! For light algorithms that don't need the full projection overhead: BFS, DFS,
//! single-pair shortest path and the reachability queries derived from them.
//! State is hash-based and scoped to one call.

use digraph_common::{Graph, Node};
use fxhash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Direction of adjacency followed by a traversal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Follow successors.
    #[default]
    Outgoing,
    /// Follow predecessors.
    Incoming,
    /// Follow both, treating the graph as undirected.
    Both,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::Outgoing => Direction::Incoming,
            Direction::Incoming => Direction::Outgoing,
            Direction::Both => Direction::Both,
        }
    }
}

/// Traversal context borrowing the caller's graph.
///
/// Use this for light algorithms like BFS, DFS, or point-to-point shortest path
/// where projection overhead isn't justified.
pub struct DirectTraversal<'a, G> {
    graph: &'a G,
}

impl<'a, G: Graph> DirectTraversal<'a, G> {
    /// Create a new direct traversal context.
    pub fn new(graph: &'a G) -> Self {
        Self { graph }
    }

    /// Neighbors of a node in the given direction.
    pub fn neighbors(&self, node: &G::Node, direction: Direction) -> Vec<G::Node> {
        match direction {
            Direction::Outgoing => self.graph.successors(node).collect(),
            Direction::Incoming => self.graph.predecessors(node).collect(),
            Direction::Both => {
                let mut result: Vec<G::Node> = self.graph.successors(node).collect();
                result.extend(self.graph.predecessors(node));
                result
            }
        }
    }

    /// BFS from a source node, yielding `(node, level)` pairs.
    pub fn bfs(&self, source: G::Node, direction: Direction) -> BfsIterator<'_, 'a, G> {
        BfsIterator::new(self, source, direction)
    }

    /// Iterative DFS from a source node.
    pub fn dfs(&self, source: G::Node, direction: Direction) -> DfsIterator<'_, 'a, G> {
        DfsIterator::new(self, source, direction)
    }

    /// Find a shortest (fewest hops) path from `source` to `target`.
    ///
    /// Runs a BFS backwards from `target` over predecessor edges, recording for
    /// every discovered node the next hop towards `target`, and stops as soon as
    /// `source` is dequeued. Returns None if `target` is unreachable.
    pub fn shortest_path(&self, source: &G::Node, target: &G::Node) -> Option<Path<G::Node>> {
        if source == target {
            return Some(Path::single(source.clone()));
        }

        // node -> next hop towards target
        let mut next_hop: FxHashMap<G::Node, G::Node> = FxHashMap::default();
        let mut visited: FxHashSet<G::Node> = FxHashSet::default();
        let mut frontier: VecDeque<G::Node> = VecDeque::new();

        visited.insert(target.clone());
        frontier.push_back(target.clone());

        let mut found = false;
        while let Some(current) = frontier.pop_front() {
            if &current == source {
                found = true;
                break;
            }
            for pred in self.graph.predecessors(&current) {
                if visited.insert(pred.clone()) {
                    next_hop.insert(pred.clone(), current.clone());
                    frontier.push_back(pred);
                }
            }
        }

        if !found {
            return None;
        }

        Some(Path::from_next_hops(source, target, |node| {
            next_hop.get(node).cloned()
        }))
    }

    /// All nodes reachable from `source` in `direction`, including `source`.
    pub fn reachable(&self, source: G::Node, direction: Direction) -> FxHashSet<G::Node> {
        self.dfs(source, direction).collect()
    }

    /// All nodes within `level_bound` hops of `node`, including `node`.
    pub fn neighbourhood(
        &self,
        node: G::Node,
        level_bound: u32,
        direction: Direction,
    ) -> FxHashSet<G::Node> {
        self.bfs(node, direction)
            .take_while(|(_, level)| *level <= level_bound)
            .map(|(node, _)| node)
            .collect()
    }
}

/// BFS iterator yielding (node, level) pairs in non-decreasing level order.
///
/// A node is marked visited when it is first enqueued, so the level reported
/// for it is its hop distance from the source.
pub struct BfsIterator<'t, 'a, G: Graph> {
    traversal: &'t DirectTraversal<'a, G>,
    frontier: VecDeque<(G::Node, u32)>,
    visited: FxHashSet<G::Node>,
    direction: Direction,
}

impl<'t, 'a, G: Graph> BfsIterator<'t, 'a, G> {
    fn new(traversal: &'t DirectTraversal<'a, G>, source: G::Node, direction: Direction) -> Self {
        let mut frontier = VecDeque::new();
        let mut visited = FxHashSet::default();

        visited.insert(source.clone());
        frontier.push_back((source, 0));

        Self {
            traversal,
            frontier,
            visited,
            direction,
        }
    }
}

impl<G: Graph> Iterator for BfsIterator<'_, '_, G> {
    type Item = (G::Node, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let (current, level) = self.frontier.pop_front()?;

        // Enqueue neighbors
        for neighbor in self.traversal.neighbors(&current, self.direction) {
            if self.visited.insert(neighbor.clone()) {
                self.frontier.push_back((neighbor, level + 1));
            }
        }

        Some((current, level))
    }
}

/// Stack-based DFS iterator. Each reachable node is yielded exactly once; the
/// most recently discovered successor is explored first.
pub struct DfsIterator<'t, 'a, G: Graph> {
    traversal: &'t DirectTraversal<'a, G>,
    stack: Vec<G::Node>,
    visited: FxHashSet<G::Node>,
    direction: Direction,
}

impl<'t, 'a, G: Graph> DfsIterator<'t, 'a, G> {
    fn new(traversal: &'t DirectTraversal<'a, G>, source: G::Node, direction: Direction) -> Self {
        Self {
            traversal,
            stack: vec![source],
            visited: FxHashSet::default(),
            direction,
        }
    }
}

impl<G: Graph> Iterator for DfsIterator<'_, '_, G> {
    type Item = G::Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if !self.visited.insert(current.clone()) {
                continue;
            }
            for neighbor in self.traversal.neighbors(&current, self.direction) {
                if !self.visited.contains(&neighbor) {
                    self.stack.push(neighbor);
                }
            }
            return Some(current);
        }
        None
    }
}

/// Path representation for path and cycle results.
///
/// For paths, `nodes[0]` is the source and the last node the target. For
/// cycles, the closing edge from the last node back to the first is implicit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path<N> {
    /// Nodes in the path (source to target)
    pub nodes: Vec<N>,
}

impl<N: Node> Path<N> {
    pub fn new(nodes: Vec<N>) -> Self {
        Self { nodes }
    }

    /// The zero-length path consisting of one node.
    pub fn single(node: N) -> Self {
        Self { nodes: vec![node] }
    }

    /// Walk a next-hop chain from `source` until `target`.
    ///
    /// Panics if the chain breaks before reaching `target`: the caller built
    /// the chain from a search that already proved `target` reachable.
    pub(crate) fn from_next_hops<F>(source: &N, target: &N, next_hop: F) -> Self
    where
        F: Fn(&N) -> Option<N>,
    {
        let mut nodes = vec![source.clone()];
        let mut current = source.clone();
        while &current != target {
            current = next_hop(&current).unwrap_or_else(|| {
                panic!("next-hop chain broken at {current:?} before reaching {target:?}")
            });
            nodes.push(current.clone());
        }
        Self { nodes }
    }

    /// Length of the path (number of edges)
    pub fn len(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Whether the path has no edges (source == target)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn source(&self) -> Option<&N> {
        self.nodes.first()
    }

    pub fn target(&self) -> Option<&N> {
        self.nodes.last()
    }

    pub fn into_nodes(self) -> Vec<N> {
        self.nodes
    }
}

impl<N> From<Vec<N>> for Path<N> {
    fn from(nodes: Vec<N>) -> Self {
        Self { nodes }
    }
}
