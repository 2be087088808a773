// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Simple adjacency list graph.
//!
//! Minimal in-memory implementation of the [`Graph`] contract:
//! - O(1) node lookup
//! - O(degree) neighbor iteration in both directions
//! - Insertion-ordered node enumeration (deterministic slot assignment)
//! - Parallel edges collapse into one adjacency

use crate::api::error::{GraphError, Result};
use crate::graph::contract::{Graph, InboundSemiGraph, Node, OutboundSemiGraph};
use fxhash::FxHashMap;
use tracing::debug;

/// Per-node adjacency entry. Neighbors are stored as entry indices.
#[derive(Clone, Debug)]
struct Entry<N> {
    node: N,
    outgoing: Vec<u32>,
    incoming: Vec<u32>,
    removed: bool,
}

/// Simple directed graph with adjacency lists.
///
/// Stores outgoing and incoming lists per node so both adjacency queries are
/// O(degree). Removed nodes leave a tombstone entry that enumeration skips.
#[derive(Clone, Debug)]
pub struct SimpleGraph<N> {
    /// Live node -> entry index
    index: FxHashMap<N, u32>,
    /// Entries in insertion order (including tombstones)
    entries: Vec<Entry<N>>,
    edge_count: usize,
}

impl<N> Default for SimpleGraph<N> {
    fn default() -> Self {
        Self {
            index: FxHashMap::default(),
            entries: Vec::new(),
            edge_count: 0,
        }
    }
}

impl<N: Node> SimpleGraph<N> {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new graph with pre-allocated capacity for nodes.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(nodes, Default::default()),
            entries: Vec::with_capacity(nodes),
            edge_count: 0,
        }
    }

    /// Builds a graph from an edge list. Endpoints are created on first use.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N)>,
    {
        let mut graph = Self::new();
        for (from, to) in edges {
            graph.add_edge(from, to);
        }
        graph
    }

    /// Generates a full graph from one that only knows inbound edges.
    ///
    /// Successor lists are derived from the predecessor lists, so the result
    /// satisfies the consistency requirement of [`Graph`].
    pub fn from_inbound<S>(semi: &S) -> Self
    where
        S: InboundSemiGraph<Node = N>,
    {
        let mut graph = Self::new();
        for node in InboundSemiGraph::nodes(semi) {
            graph.add_node(node);
        }
        for node in InboundSemiGraph::nodes(semi) {
            for pred in semi.predecessors(&node) {
                graph.add_edge(pred, node.clone());
            }
        }
        graph
    }

    /// Generates a full graph from one that only knows outbound edges.
    pub fn from_outbound<S>(semi: &S) -> Self
    where
        S: OutboundSemiGraph<Node = N>,
    {
        let mut graph = Self::new();
        for node in OutboundSemiGraph::nodes(semi) {
            graph.add_node(node);
        }
        for node in OutboundSemiGraph::nodes(semi) {
            for succ in semi.successors(&node) {
                graph.add_edge(node.clone(), succ);
            }
        }
        graph
    }

    /// Adds a node. Returns true if the node was newly added.
    pub fn add_node(&mut self, node: N) -> bool {
        if self.index.contains_key(&node) {
            return false;
        }
        self.insert_entry(node);
        true
    }

    fn insert_entry(&mut self, node: N) -> u32 {
        let idx = self.entries.len() as u32;
        self.index.insert(node.clone(), idx);
        self.entries.push(Entry {
            node,
            outgoing: Vec::new(),
            incoming: Vec::new(),
            removed: false,
        });
        idx
    }

    fn slot_or_insert(&mut self, node: N) -> u32 {
        match self.index.get(&node) {
            Some(&idx) => idx,
            None => self.insert_entry(node),
        }
    }

    /// Adds an edge. Nodes are implicitly created if they don't exist.
    ///
    /// Returns false if the edge was already present.
    pub fn add_edge(&mut self, from: N, to: N) -> bool {
        let src = self.slot_or_insert(from);
        let dst = self.slot_or_insert(to);
        self.link(src, dst)
    }

    /// Adds an edge between two nodes that must already exist.
    pub fn try_add_edge(&mut self, from: &N, to: &N) -> Result<bool> {
        let src = *self
            .index
            .get(from)
            .ok_or_else(|| GraphError::unknown_node(from))?;
        let dst = *self
            .index
            .get(to)
            .ok_or_else(|| GraphError::unknown_node(to))?;
        Ok(self.link(src, dst))
    }

    fn link(&mut self, src: u32, dst: u32) -> bool {
        if self.entries[src as usize].outgoing.contains(&dst) {
            return false;
        }
        self.entries[src as usize].outgoing.push(dst);
        self.entries[dst as usize].incoming.push(src);
        self.edge_count += 1;
        true
    }

    /// Removes an edge. Returns true if it was present.
    pub fn remove_edge(&mut self, from: &N, to: &N) -> bool {
        let (Some(&src), Some(&dst)) = (self.index.get(from), self.index.get(to)) else {
            return false;
        };
        let outgoing = &mut self.entries[src as usize].outgoing;
        let Some(pos) = outgoing.iter().position(|&n| n == dst) else {
            return false;
        };
        outgoing.remove(pos);
        self.entries[dst as usize].incoming.retain(|&n| n != src);
        self.edge_count -= 1;
        true
    }

    /// Removes a node and all its edges from the graph.
    pub fn remove_node(&mut self, node: &N) -> bool {
        let Some(idx) = self.index.remove(node) else {
            return false;
        };
        let entry = &mut self.entries[idx as usize];
        entry.removed = true;
        let outgoing = std::mem::take(&mut entry.outgoing);
        let incoming = std::mem::take(&mut entry.incoming);

        // A self-loop appears in both lists but is one edge.
        let self_loop = outgoing.contains(&idx);
        self.edge_count -= outgoing.len() + incoming.len() - usize::from(self_loop);

        for dst in outgoing {
            self.entries[dst as usize].incoming.retain(|&n| n != idx);
        }
        for src in incoming {
            self.entries[src as usize].outgoing.retain(|&n| n != idx);
        }
        true
    }

    /// Checks if a node exists in the graph.
    pub fn contains_node(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    /// Checks if the edge `from -> to` exists.
    pub fn contains_edge(&self, from: &N, to: &N) -> bool {
        match (self.index.get(from), self.index.get(to)) {
            (Some(&src), Some(&dst)) => self.entries[src as usize].outgoing.contains(&dst),
            _ => false,
        }
    }

    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    /// Returns the total number of (distinct) edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns an iterator over all edges as `(from, to)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (N, N)> + '_ {
        self.entries
            .iter()
            .filter(|e| !e.removed)
            .flat_map(move |e| {
                e.outgoing
                    .iter()
                    .map(move |&dst| (e.node.clone(), self.entries[dst as usize].node.clone()))
            })
    }

    fn neighbors(&self, node: &N, incoming: bool) -> impl Iterator<Item = N> + '_ {
        let list: &[u32] = match self.index.get(node) {
            Some(&idx) if incoming => &self.entries[idx as usize].incoming,
            Some(&idx) => &self.entries[idx as usize].outgoing,
            None => &[],
        };
        list.iter().map(|&n| self.entries[n as usize].node.clone())
    }
}

impl SimpleGraph<String> {
    /// Parses the line-oriented edge list format.
    ///
    /// ```text
    /// # comment
    /// a -> b -> c   # chain: a -> b, b -> c
    /// d             # isolated node
    /// ```
    pub fn parse_edge_list(input: &str) -> Result<Self> {
        let mut graph = Self::new();
        for (line_no, raw) in input.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }

            let mut names = Vec::new();
            for part in line.split("->") {
                let name = part.trim();
                if name.is_empty() || name.contains(char::is_whitespace) {
                    return Err(GraphError::Parse {
                        line: line_no + 1,
                        message: format!("expected a node name, found '{}'", part.trim()),
                    });
                }
                names.push(name.to_string());
            }

            if let [single] = names.as_slice() {
                graph.add_node(single.clone());
            }
            for pair in names.windows(2) {
                graph.add_edge(pair[0].clone(), pair[1].clone());
            }
        }
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "parsed edge list"
        );
        Ok(graph)
    }
}

impl<N: Node> Graph for SimpleGraph<N> {
    type Node = N;

    fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.entries
            .iter()
            .filter(|e| !e.removed)
            .map(|e| e.node.clone())
    }

    fn predecessors(&self, node: &N) -> impl Iterator<Item = N> + '_ {
        self.neighbors(node, true)
    }

    fn successors(&self, node: &N) -> impl Iterator<Item = N> + '_ {
        self.neighbors(node, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn succ(g: &SimpleGraph<&'static str>, n: &'static str) -> Vec<&'static str> {
        g.successors(&n).collect()
    }

    fn pred(g: &SimpleGraph<&'static str>, n: &'static str) -> Vec<&'static str> {
        g.predecessors(&n).collect()
    }

    #[test]
    fn test_add_remove_node() {
        let mut g = SimpleGraph::new();

        assert!(g.add_node("a"));
        assert!(!g.add_node("a")); // Already exists
        assert!(g.add_node("b"));

        assert_eq!(g.node_count(), 2);
        assert!(g.contains_node(&"a"));

        assert!(g.remove_node(&"a"));
        assert_eq!(g.node_count(), 1);
        assert!(!g.contains_node(&"a"));
        assert_eq!(g.nodes().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_parallel_edges_collapse() {
        let mut g = SimpleGraph::new();
        assert!(g.add_edge("a", "b"));
        assert!(!g.add_edge("a", "b"));

        assert_eq!(g.edge_count(), 1);
        assert_eq!(succ(&g, "a"), vec!["b"]);
        assert_eq!(pred(&g, "b"), vec!["a"]);
    }

    #[test]
    fn test_remove_node_with_edges() {
        let mut g = SimpleGraph::from_edges([("a", "b"), ("b", "c"), ("b", "b")]);
        assert_eq!(g.edge_count(), 3);

        g.remove_node(&"b");

        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 0);
        assert!(succ(&g, "a").is_empty());
        assert!(pred(&g, "c").is_empty());
    }

    #[test]
    fn test_remove_edge() {
        let mut g = SimpleGraph::from_edges([("a", "b"), ("a", "c")]);
        assert!(g.remove_edge(&"a", &"b"));
        assert!(!g.remove_edge(&"a", &"b"));

        assert_eq!(succ(&g, "a"), vec!["c"]);
        assert!(pred(&g, "b").is_empty());
        assert!(g.contains_edge(&"a", &"c"));
        assert!(!g.contains_edge(&"a", &"b"));
    }

    #[test]
    fn test_try_add_edge_unknown_node() {
        let mut g = SimpleGraph::new();
        g.add_node("a");
        let err = g.try_add_edge(&"a", &"zzz").unwrap_err();
        assert!(matches!(err, GraphError::UnknownNode { .. }));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_unknown_node_has_no_neighbors() {
        let g = SimpleGraph::from_edges([("a", "b")]);
        assert!(succ(&g, "missing").is_empty());
        assert!(pred(&g, "missing").is_empty());
    }

    #[test]
    fn test_parse_edge_list() -> anyhow::Result<()> {
        let g = SimpleGraph::parse_edge_list(
            "# modules\n\
             app -> core -> util\n\
             app -> util\n\
             \n\
             orphan\n",
        )?;

        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 3);
        assert!(g.contains_edge(&"app".to_string(), &"core".to_string()));
        assert!(g.contains_edge(&"core".to_string(), &"util".to_string()));
        assert!(g.contains_node(&"orphan".to_string()));
        Ok(())
    }

    #[test]
    fn test_parse_edge_list_reports_line() {
        let err = SimpleGraph::parse_edge_list("a -> b\nb -> \n").unwrap_err();
        match err {
            GraphError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    struct Inbound;

    impl InboundSemiGraph for Inbound {
        type Node = u32;

        fn nodes(&self) -> impl Iterator<Item = u32> + '_ {
            0..3
        }

        fn predecessors(&self, node: &u32) -> impl Iterator<Item = u32> + '_ {
            // 0 -> 1 -> 2
            node.checked_sub(1).into_iter()
        }
    }

    #[test]
    fn test_from_inbound_derives_successors() {
        let g = SimpleGraph::from_inbound(&Inbound);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.successors(&0).collect::<Vec<_>>(), vec![1]);
        assert_eq!(g.successors(&1).collect::<Vec<_>>(), vec![2]);
        assert_eq!(g.predecessors(&2).collect::<Vec<_>>(), vec![1]);
        assert!(g.successors(&2).next().is_none());
    }
}
