// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Condensation of a graph into its graph of strongly connected components.
//!
//! Component adjacency is read from the predecessor view: component `B` is a
//! predecessor of component `A` iff some member of `B` is a predecessor of
//! some member of `A` in the original graph. Successor lists are derived
//! from those inbound lists, so the condensed graph keeps the original edge
//! direction and satisfies the [`Graph`] consistency rule.

use crate::algo::GraphProjection;
use crate::algo::algorithms::{Algorithm, Component, tarjan};
use digraph_common::{Graph, Node};
use fxhash::FxHashMap;
use tracing::{debug, instrument};

pub struct Condensation;

#[derive(Debug, Clone, Default)]
pub struct CondensationConfig {}

/// Graph whose nodes are the strongly connected components of another graph.
#[derive(Debug, Clone)]
pub struct SccGraph<N> {
    components: Vec<Component<N>>,
    /// Original node -> component id
    node_component: FxHashMap<N, u32>,
    /// Component -> component id
    component_index: FxHashMap<Component<N>, u32>,
    inbound: Vec<Vec<u32>>,
    outbound: Vec<Vec<u32>>,
}

impl<N: Node> SccGraph<N> {
    /// All components, sinks first.
    pub fn components(&self) -> &[Component<N>] {
        &self.components
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// The component a node of the original graph belongs to.
    pub fn component_of(&self, node: &N) -> Option<&Component<N>> {
        self.node_component
            .get(node)
            .map(|&id| &self.components[id as usize])
    }

    pub fn into_components(self) -> Vec<Component<N>> {
        self.components
    }

    fn adjacent<'s>(
        &'s self,
        lists: &'s [Vec<u32>],
        component: &Component<N>,
    ) -> impl Iterator<Item = Component<N>> + 's {
        let ids: &[u32] = match self.component_index.get(component) {
            Some(&id) => &lists[id as usize],
            None => &[],
        };
        ids.iter().map(|&id| self.components[id as usize].clone())
    }
}

impl<N: Node> Graph for SccGraph<N> {
    type Node = Component<N>;

    fn nodes(&self) -> impl Iterator<Item = Component<N>> + '_ {
        self.components.iter().cloned()
    }

    fn predecessors(&self, node: &Component<N>) -> impl Iterator<Item = Component<N>> + '_ {
        self.adjacent(&self.inbound, node)
    }

    fn successors(&self, node: &Component<N>) -> impl Iterator<Item = Component<N>> + '_ {
        self.adjacent(&self.outbound, node)
    }
}

impl Algorithm for Condensation {
    type Config<N: Node> = CondensationConfig;
    type Result<N: Node> = SccGraph<N>;

    fn name() -> &'static str {
        "scc_graph"
    }

    fn needs_reverse() -> bool {
        true
    }

    #[instrument(skip_all, level = "debug", fields(vertices = graph.vertex_count()))]
    fn run<N: Node>(graph: &GraphProjection<N>, _config: Self::Config<N>) -> Self::Result<N> {
        let slots = tarjan(graph, |_| true);
        let count = slots.members.len();

        let mut inbound: Vec<Vec<u32>> = vec![Vec::new(); count];
        let mut outbound: Vec<Vec<u32>> = vec![Vec::new(); count];
        // Last target component that recorded each source component.
        let mut recorded_for = vec![u32::MAX; count];

        for (target, members) in slots.members.iter().enumerate() {
            let target = target as u32;
            for &member in members {
                for &pred in graph.in_neighbors(member) {
                    let source = slots.component_of[pred as usize];
                    if source == target || recorded_for[source as usize] == target {
                        continue;
                    }
                    recorded_for[source as usize] = target;
                    inbound[target as usize].push(source);
                    outbound[source as usize].push(target);
                }
            }
        }

        let components: Vec<Component<N>> = slots
            .members
            .iter()
            .map(|members| Component::new(graph.to_nodes(members)))
            .collect();

        let node_component = graph
            .vertices()
            .map(|(slot, node)| (node.clone(), slots.component_of[slot as usize]))
            .collect();
        let component_index = components
            .iter()
            .enumerate()
            .map(|(id, component)| (component.clone(), id as u32))
            .collect();

        debug!(
            components = count,
            edges = inbound.iter().map(Vec::len).sum::<usize>(),
            "component graph built"
        );

        SccGraph {
            components,
            node_component,
            component_index,
            inbound,
            outbound,
        }
    }
}
