// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Graph Projection - Dense CSR representation for algorithm execution.
//!
//! A `GraphProjection` is a materialized, algorithm-optimized snapshot of a
//! caller's [`Graph`]. It provides:
//! - Dense vertex indexing (0..V) for efficient array-based state
//! - CSR format for cache-friendly neighbor iteration
//! - Optional reverse edges, read from the graph's own predecessor view
//!
//! Parallel edges collapse into one adjacency. Slots follow the order of
//! [`Graph::nodes`].

use crate::algo::IdMap;
use digraph_common::{Graph, Node};
use tracing::{debug, instrument, trace};

/// Edge list for CSR construction: (source_slot, destination_slot) pairs.
type EdgeList = Vec<(u32, u32)>;

/// Configuration for building a graph projection.
#[derive(Debug, Clone, Default)]
pub struct ProjectionConfig {
    /// Whether to build reverse edges (in_neighbors)
    pub include_reverse: bool,
}

/// Dense CSR representation optimized for algorithm execution.
#[derive(Debug)]
pub struct GraphProjection<N> {
    /// Number of vertices in the projection
    pub(crate) vertex_count: usize,

    /// Outbound edges: CSR format
    pub(crate) out_offsets: Vec<u32>, // [V+1] vertex slot -> edge start
    pub(crate) out_neighbors: Vec<u32>, // [E] neighbor slots

    /// Inbound edges: CSR format (optional, for backward searches)
    pub(crate) in_offsets: Vec<u32>, // [V+1]
    pub(crate) in_neighbors: Vec<u32>, // [E]

    /// Identity mapping
    pub(crate) id_map: IdMap<N>,
}

impl<N: Node> GraphProjection<N> {
    /// Number of vertices in the projection.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of edges in the projection.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.out_neighbors.len()
    }

    /// Outbound neighbors of a vertex (by slot).
    #[inline]
    pub fn out_neighbors(&self, slot: u32) -> &[u32] {
        let start = self.out_offsets[slot as usize] as usize;
        let end = self.out_offsets[slot as usize + 1] as usize;
        &self.out_neighbors[start..end]
    }

    /// Outbound degree of a vertex.
    #[inline]
    pub fn out_degree(&self, slot: u32) -> u32 {
        self.out_offsets[slot as usize + 1] - self.out_offsets[slot as usize]
    }

    /// Inbound neighbors of a vertex (by slot).
    ///
    /// Empty for every vertex if the projection was built without
    /// `include_reverse`.
    #[inline]
    pub fn in_neighbors(&self, slot: u32) -> &[u32] {
        let start = self.in_offsets[slot as usize] as usize;
        let end = self.in_offsets[slot as usize + 1] as usize;
        &self.in_neighbors[start..end]
    }

    /// Inbound degree of a vertex.
    #[inline]
    pub fn in_degree(&self, slot: u32) -> u32 {
        self.in_offsets[slot as usize + 1] - self.in_offsets[slot as usize]
    }

    /// Check if reverse edges are available.
    #[inline]
    pub fn has_reverse(&self) -> bool {
        !self.in_neighbors.is_empty()
    }

    /// Map slot back to its node.
    #[inline]
    pub fn to_node(&self, slot: u32) -> &N {
        self.id_map.to_node_unchecked(slot)
    }

    /// Map node to slot.
    #[inline]
    pub fn to_slot(&self, node: &N) -> Option<u32> {
        self.id_map.to_slot(node)
    }

    /// Map a sequence of slots back to owned nodes.
    pub fn to_nodes(&self, slots: &[u32]) -> Vec<N> {
        slots.iter().map(|&slot| self.to_node(slot).clone()).collect()
    }

    /// Iterate over all vertices as (slot, node).
    pub fn vertices(&self) -> impl Iterator<Item = (u32, &N)> + '_ {
        self.id_map.iter()
    }
}

/// Builder for constructing a `GraphProjection` from any [`Graph`].
pub struct ProjectionBuilder<'a, G> {
    graph: &'a G,
    config: ProjectionConfig,
}

impl<'a, G: Graph> ProjectionBuilder<'a, G> {
    /// Create a new projection builder.
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            config: ProjectionConfig::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ProjectionConfig) -> Self {
        self.config = config;
        self
    }

    /// Include reverse edges for in_neighbors access.
    pub fn include_reverse(mut self, enabled: bool) -> Self {
        self.config.include_reverse = enabled;
        self
    }

    /// Build the projection.
    #[instrument(skip_all, level = "debug", fields(include_reverse = self.config.include_reverse))]
    pub fn build(self) -> GraphProjection<G::Node> {
        // 1. Assign dense slots in node enumeration order
        let id_map: IdMap<G::Node> = self.graph.nodes().collect();
        let vertex_count = id_map.len();

        // 2. Collect edges through the graph's own adjacency views
        let out_edges = collect_edges(&id_map, |node| self.graph.successors(node).collect());
        let (in_offsets, in_neighbors) = if self.config.include_reverse {
            let in_edges =
                collect_edges(&id_map, |node| self.graph.predecessors(node).collect());
            build_csr(vertex_count, &in_edges)
        } else {
            (vec![0; vertex_count + 1], Vec::new())
        };
        let (out_offsets, out_neighbors) = build_csr(vertex_count, &out_edges);

        debug!(
            vertices = vertex_count,
            edges = out_neighbors.len(),
            "graph projection built"
        );

        GraphProjection {
            vertex_count,
            out_offsets,
            out_neighbors,
            in_offsets,
            in_neighbors,
            id_map,
        }
    }
}

/// Collect deduplicated (source_slot, neighbor_slot) pairs for one direction.
fn collect_edges<N, F>(id_map: &IdMap<N>, neighbors: F) -> EdgeList
where
    N: Node,
    F: Fn(&N) -> Vec<N>,
{
    let mut edges = Vec::new();
    // Last source slot that inserted each neighbor; collapses parallel edges.
    let mut seen_from = vec![u32::MAX; id_map.len()];

    for (src_slot, node) in id_map.iter() {
        for neighbor in neighbors(node) {
            let Some(dst_slot) = id_map.to_slot(&neighbor) else {
                trace!(?node, ?neighbor, "skipping edge to node outside the node set");
                continue;
            };
            if seen_from[dst_slot as usize] == src_slot {
                continue;
            }
            seen_from[dst_slot as usize] = src_slot;
            edges.push((src_slot, dst_slot));
        }
    }

    edges
}

/// Build CSR from edge list.
fn build_csr(vertex_count: usize, edges: &[(u32, u32)]) -> (Vec<u32>, Vec<u32>) {
    if vertex_count == 0 {
        return (vec![0], Vec::new());
    }

    // Count degrees
    let mut degrees = vec![0u32; vertex_count];
    for &(src, _) in edges {
        degrees[src as usize] += 1;
    }

    // Build offsets (prefix sum)
    let mut offsets = vec![0u32; vertex_count + 1];
    for i in 0..vertex_count {
        offsets[i + 1] = offsets[i] + degrees[i];
    }

    // Fill neighbors
    let mut neighbors = vec![0u32; edges.len()];
    let mut current = offsets.clone();

    for &(src, dst) in edges {
        let idx = current[src as usize] as usize;
        neighbors[idx] = dst;
        current[src as usize] += 1;
    }

    (offsets, neighbors)
}
