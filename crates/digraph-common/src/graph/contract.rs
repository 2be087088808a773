// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! The read-only directed graph capability consumed by every algorithm.
//!
//! A graph is a finite node set plus, for each node, its direct predecessors
//! and successors. Nodes are opaque identities: algorithms only compare and
//! hash them. Parallel edges collapse to a single adjacency.

use std::fmt::Debug;
use std::hash::Hash;

/// Identity type usable as a graph node.
pub trait Node: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Node for T {}

/// Read-only directed graph.
///
/// `successors` and `predecessors` must agree: an edge `a -> b` shows up as
/// `b` in `successors(a)` and as `a` in `predecessors(b)`. Derived views may
/// leave one direction empty when the consuming algorithm only follows the
/// other one.
pub trait Graph {
    type Node: Node;

    /// All nodes of the graph. Order is only significant where an algorithm
    /// says so (it defines slot indices for projections).
    fn nodes(&self) -> impl Iterator<Item = Self::Node> + '_;

    /// Nodes with a direct edge into `node`.
    fn predecessors(&self, node: &Self::Node) -> impl Iterator<Item = Self::Node> + '_;

    /// Nodes with a direct edge out of `node`.
    fn successors(&self, node: &Self::Node) -> impl Iterator<Item = Self::Node> + '_;
}

impl<G: Graph + ?Sized> Graph for &G {
    type Node = G::Node;

    fn nodes(&self) -> impl Iterator<Item = Self::Node> + '_ {
        (**self).nodes()
    }

    fn predecessors(&self, node: &Self::Node) -> impl Iterator<Item = Self::Node> + '_ {
        (**self).predecessors(node)
    }

    fn successors(&self, node: &Self::Node) -> impl Iterator<Item = Self::Node> + '_ {
        (**self).successors(node)
    }
}

/// A graph that only knows its inbound edges.
pub trait InboundSemiGraph {
    type Node: Node;

    fn nodes(&self) -> impl Iterator<Item = Self::Node> + '_;

    fn predecessors(&self, node: &Self::Node) -> impl Iterator<Item = Self::Node> + '_;
}

/// A graph that only knows its outbound edges.
pub trait OutboundSemiGraph {
    type Node: Node;

    fn nodes(&self) -> impl Iterator<Item = Self::Node> + '_;

    fn successors(&self, node: &Self::Node) -> impl Iterator<Item = Self::Node> + '_;
}
