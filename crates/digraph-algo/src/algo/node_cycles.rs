// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Cycles passing through one given node.
//!
//! A neighbour that is both a successor and a predecessor of the node closes
//! a 2-cycle and takes no further part. For every other successor `s` and
//! predecessor `p`, the shortest path from `s` to `p` in the graph without
//! the node closes a cycle. Each cycle is reported ending with the queried
//! node; rotations of one cycle found from different pairs are kept as
//! distinct sequences.

use crate::algo::traversal::{DirectTraversal, Path};
use crate::algo::views::ExcludedNodeGraph;
use digraph_common::Graph;
use fxhash::FxHashSet;
use tracing::trace;

/// Cycles through `node`, at most one per (successor, predecessor) pair.
///
/// A self-loop on `node` is reported as the one-element cycle `[node]`; a
/// node that is both a successor and a predecessor yields only `[that, node]`
/// and is left out of the remaining pairs.
pub fn find_cycles<G: Graph>(graph: &G, node: &G::Node) -> FxHashSet<Path<G::Node>> {
    let mut cycles = FxHashSet::default();

    let mut successors = Vec::new();
    let mut seen = FxHashSet::default();
    for succ in graph.successors(node) {
        if &succ == node {
            cycles.insert(Path::single(node.clone()));
        } else if seen.insert(succ.clone()) {
            successors.push(succ);
        }
    }
    if successors.is_empty() {
        return cycles;
    }

    let mut predecessors = Vec::new();
    seen.clear();
    for pred in graph.predecessors(node) {
        if &pred != node && seen.insert(pred.clone()) {
            predecessors.push(pred);
        }
    }

    let successor_set: FxHashSet<_> = successors.iter().cloned().collect();
    let overlap: FxHashSet<_> = predecessors
        .iter()
        .filter(|pred| successor_set.contains(*pred))
        .cloned()
        .collect();
    for both in &overlap {
        cycles.insert(Path::new(vec![both.clone(), node.clone()]));
    }
    successors.retain(|succ| !overlap.contains(succ));
    predecessors.retain(|pred| !overlap.contains(pred));

    let excluded = ExcludedNodeGraph::new(graph, node.clone());
    let traversal = DirectTraversal::new(&excluded);

    for succ in &successors {
        for pred in &predecessors {
            if let Some(path) = traversal.shortest_path(succ, pred) {
                let mut nodes = path.into_nodes();
                nodes.push(node.clone());
                cycles.insert(Path::new(nodes));
            }
        }
    }

    trace!(?node, cycles = cycles.len(), "cycles through node");
    cycles
}
