// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Strongly Connected Components (SCC) Algorithm using Tarjan's algorithm.
//!
//! The depth-first search runs on an explicit frame stack, so deep graphs do
//! not exhaust the thread stack. Components are emitted in reverse
//! topological order: a component comes after every component it reaches.

use crate::algo::GraphProjection;
use crate::algo::algorithms::Algorithm;
use digraph_common::Node;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::{debug, instrument};

const UNVISITED: u32 = u32::MAX;

/// Component id of slots excluded from a restricted run.
pub(crate) const NO_COMPONENT: u32 = u32::MAX;

pub struct Scc;

#[derive(Debug, Clone, Default)]
pub struct SccConfig {}

pub struct SccResult<N> {
    pub components: Vec<Component<N>>,
    pub component_count: usize,
}

/// A strongly connected component: an immutable, non-empty set of nodes.
///
/// Components of one partition are disjoint, so equality and hashing only
/// need to look at the members.
#[derive(Debug, Clone)]
pub struct Component<N> {
    members: Arc<[N]>,
}

impl<N: Node> Component<N> {
    pub(crate) fn new(members: Vec<N>) -> Self {
        assert!(!members.is_empty(), "strongly connected component cannot be empty");
        Self {
            members: members.into(),
        }
    }

    /// Member nodes in discovery order.
    pub fn nodes(&self) -> &[N] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.members.contains(node)
    }

    /// First member; identifies the component within its partition.
    pub fn representative(&self) -> &N {
        &self.members[0]
    }
}

impl<N: Node> PartialEq for Component<N> {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl<N: Node> Eq for Component<N> {}

impl<N: Node> Hash for Component<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.representative().hash(state);
    }
}

/// Slot-level partition produced by [`tarjan`].
pub(crate) struct SlotComponents {
    /// Slot -> component id (`NO_COMPONENT` for excluded slots)
    pub component_of: Vec<u32>,
    /// Component id -> member slots
    pub members: Vec<Vec<u32>>,
}

impl SlotComponents {
    /// Whether the component contains a cycle: more than one member, or a
    /// single member with a self-loop.
    pub fn is_cyclic<N: Node>(&self, graph: &GraphProjection<N>, id: u32) -> bool {
        match self.members[id as usize].as_slice() {
            [single] => graph.out_neighbors(*single).contains(single),
            members => members.len() > 1,
        }
    }
}

impl Algorithm for Scc {
    type Config<N: Node> = SccConfig;
    type Result<N: Node> = SccResult<N>;

    fn name() -> &'static str {
        "scc"
    }

    #[instrument(skip_all, level = "debug", fields(vertices = graph.vertex_count()))]
    fn run<N: Node>(graph: &GraphProjection<N>, _config: Self::Config<N>) -> Self::Result<N> {
        let slots = tarjan(graph, |_| true);

        let components: Vec<Component<N>> = slots
            .members
            .iter()
            .map(|members| Component::new(graph.to_nodes(members)))
            .collect();

        debug!(components = components.len(), "strongly connected components computed");

        SccResult {
            component_count: components.len(),
            components,
        }
    }
}

struct TarjanContext {
    index: u32,
    stack: Vec<u32>,
    on_stack: Vec<bool>,
    indices: Vec<u32>,
    lowlink: Vec<u32>,
    component_of: Vec<u32>,
    members: Vec<Vec<u32>>,
}

impl TarjanContext {
    fn discover(&mut self, v: u32) {
        self.indices[v as usize] = self.index;
        self.lowlink[v as usize] = self.index;
        self.index += 1;
        self.stack.push(v);
        self.on_stack[v as usize] = true;
    }

    fn pop_component(&mut self, root: u32) {
        let id = self.members.len() as u32;
        let mut component = Vec::new();
        loop {
            let w = self
                .stack
                .pop()
                .expect("Tarjan stack exhausted before reaching component root");
            self.on_stack[w as usize] = false;
            self.component_of[w as usize] = id;
            component.push(w);
            if w == root {
                break;
            }
        }
        self.members.push(component);
    }
}

/// Tarjan's algorithm restricted to the slots accepted by `include`.
///
/// Edges touching excluded slots are ignored, so the result is the SCC
/// partition of the induced subgraph.
pub(crate) fn tarjan<N, F>(graph: &GraphProjection<N>, include: F) -> SlotComponents
where
    N: Node,
    F: Fn(u32) -> bool,
{
    let n = graph.vertex_count();
    let mut ctx = TarjanContext {
        index: 0,
        stack: Vec::new(),
        on_stack: vec![false; n],
        indices: vec![UNVISITED; n],
        lowlink: vec![0; n],
        component_of: vec![NO_COMPONENT; n],
        members: Vec::new(),
    };

    // (vertex, position of the next out-neighbor to examine)
    let mut frames: Vec<(u32, usize)> = Vec::new();

    for root in 0..n as u32 {
        if !include(root) || ctx.indices[root as usize] != UNVISITED {
            continue;
        }

        ctx.discover(root);
        frames.push((root, 0));

        while let Some(frame) = frames.last_mut() {
            let v = frame.0;
            let neighbors = graph.out_neighbors(v);

            if let Some(&w) = neighbors.get(frame.1) {
                frame.1 += 1;
                if !include(w) {
                    continue;
                }
                if ctx.indices[w as usize] == UNVISITED {
                    ctx.discover(w);
                    frames.push((w, 0));
                } else if ctx.on_stack[w as usize] {
                    ctx.lowlink[v as usize] =
                        std::cmp::min(ctx.lowlink[v as usize], ctx.indices[w as usize]);
                }
                continue;
            }

            // All neighbors done: propagate low-link to the DFS parent.
            frames.pop();
            if let Some(&(parent, _)) = frames.last() {
                ctx.lowlink[parent as usize] =
                    std::cmp::min(ctx.lowlink[parent as usize], ctx.lowlink[v as usize]);
            }

            if ctx.lowlink[v as usize] == ctx.indices[v as usize] {
                ctx.pop_component(v);
            }
        }
    }

    SlotComponents {
        component_of: ctx.component_of,
        members: ctx.members,
    }
}
