// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Adapter views over a borrowed graph.
//!
//! Each view holds the underlying graph plus its transform and implements
//! [`Graph`] itself, so every algorithm runs on it unchanged.

use digraph_common::Graph;

/// The same graph with every edge reversed.
#[derive(Debug, Clone, Copy)]
pub struct InvertedGraph<G> {
    graph: G,
}

impl<G: Graph> InvertedGraph<G> {
    pub fn new(graph: G) -> Self {
        Self { graph }
    }

    pub fn into_inner(self) -> G {
        self.graph
    }
}

impl<G: Graph> Graph for InvertedGraph<G> {
    type Node = G::Node;

    fn nodes(&self) -> impl Iterator<Item = Self::Node> + '_ {
        self.graph.nodes()
    }

    fn predecessors(&self, node: &Self::Node) -> impl Iterator<Item = Self::Node> + '_ {
        self.graph.successors(node)
    }

    fn successors(&self, node: &Self::Node) -> impl Iterator<Item = Self::Node> + '_ {
        self.graph.predecessors(node)
    }
}

/// The graph with one node and all its incident edges removed.
#[derive(Debug, Clone)]
pub struct ExcludedNodeGraph<G: Graph> {
    graph: G,
    excluded: G::Node,
}

impl<G: Graph> ExcludedNodeGraph<G> {
    pub fn new(graph: G, excluded: G::Node) -> Self {
        Self { graph, excluded }
    }

    pub fn excluded(&self) -> &G::Node {
        &self.excluded
    }
}

impl<G: Graph> Graph for ExcludedNodeGraph<G> {
    type Node = G::Node;

    fn nodes(&self) -> impl Iterator<Item = Self::Node> + '_ {
        self.graph.nodes().filter(move |n| n != &self.excluded)
    }

    fn predecessors(&self, node: &Self::Node) -> impl Iterator<Item = Self::Node> + '_ {
        let hidden = node == &self.excluded;
        self.graph
            .predecessors(node)
            .filter(move |n| !hidden && n != &self.excluded)
    }

    fn successors(&self, node: &Self::Node) -> impl Iterator<Item = Self::Node> + '_ {
        let hidden = node == &self.excluded;
        self.graph
            .successors(node)
            .filter(move |n| !hidden && n != &self.excluded)
    }
}
