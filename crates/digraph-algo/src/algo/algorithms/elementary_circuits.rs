// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Elementary Circuits Algorithm (Johnson's Algorithm).
//!
//! Enumerates every elementary circuit (cycle without repeated nodes) exactly
//! once. For increasing start slots `s`, the SCCs of the subgraph induced by
//! slots `>= s` are recomputed; `s` jumps to the least slot of a cyclic
//! component and a blocked search inside that component reports each circuit
//! through `s`.
//!
//! Both the component search and the circuit search run on explicit stacks,
//! so the depth of the graph is bounded only by memory.

use crate::algo::GraphProjection;
use crate::algo::algorithms::{Algorithm, SlotComponents, tarjan};
use crate::algo::traversal::Path;
use digraph_common::{CancellationToken, GraphError, NeverCancelled, Node};
use std::ops::ControlFlow;
use tracing::{debug, instrument, trace};

pub struct ElementaryCircuits;

#[derive(Debug, Clone, Default)]
pub struct ElementaryCircuitsConfig {
    /// Stop after this many circuits. None enumerates all of them.
    pub limit: Option<usize>,
}

impl ElementaryCircuitsConfig {
    pub fn validate(&self) -> digraph_common::Result<()> {
        if self.limit == Some(0) {
            return Err(GraphError::invalid_config(
                "elementary circuits limit must be at least 1",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ElementaryCircuitsResult<N> {
    /// Each cycle lists its nodes once; the edge back to the first is implicit.
    pub cycles: Vec<Path<N>>,
}

impl Algorithm for ElementaryCircuits {
    type Config<N: Node> = ElementaryCircuitsConfig;
    type Result<N: Node> = ElementaryCircuitsResult<N>;

    fn name() -> &'static str {
        "elementary_circuits"
    }

    fn run<N: Node>(graph: &GraphProjection<N>, config: Self::Config<N>) -> Self::Result<N> {
        let mut cycles = Vec::new();
        Self::for_each(graph, &config, &NeverCancelled, |cycle| cycles.push(cycle));
        ElementaryCircuitsResult { cycles }
    }
}

impl ElementaryCircuits {
    /// Stream circuits to `consumer` as they are found.
    ///
    /// Stops early once `config.limit` circuits were produced or `cancel`
    /// fires. Returns the number of circuits produced.
    #[instrument(skip_all, level = "debug", fields(vertices = graph.vertex_count(), limit = ?config.limit))]
    pub fn for_each<N, C, F>(
        graph: &GraphProjection<N>,
        config: &ElementaryCircuitsConfig,
        cancel: &C,
        consumer: F,
    ) -> usize
    where
        N: Node,
        C: CancellationToken + ?Sized,
        F: FnMut(Path<N>),
    {
        let mut search = CircuitSearch {
            graph,
            limit: config.limit.unwrap_or(usize::MAX),
            emitted: 0,
            blocked: vec![false; graph.vertex_count()],
            block_map: vec![Vec::new(); graph.vertex_count()],
            path: Vec::new(),
            frames: Vec::new(),
            consumer,
        };

        if search.limit == 0 {
            return 0;
        }

        let mut start = 0u32;
        while (start as usize) < graph.vertex_count() {
            if cancel.is_cancelled() {
                debug!(emitted = search.emitted, "elementary circuits cancelled");
                return search.emitted;
            }

            let slots = tarjan(graph, |v| v >= start);
            let Some((least, component)) = least_cyclic_component(graph, &slots) else {
                break;
            };

            trace!(start = least, size = slots.members[component as usize].len(), "searching component");
            start = least;
            for &v in &slots.members[component as usize] {
                search.blocked[v as usize] = false;
                search.block_map[v as usize].clear();
            }

            let in_component = |v: u32| slots.component_of[v as usize] == component;
            if search.circuits_from(start, in_component, cancel).is_break() {
                break;
            }
            start += 1;
        }

        debug!(cycles = search.emitted, "elementary circuits enumerated");
        search.emitted
    }
}

/// Cyclic component holding the least slot, as `(least slot, component id)`.
fn least_cyclic_component<N: Node>(
    graph: &GraphProjection<N>,
    slots: &SlotComponents,
) -> Option<(u32, u32)> {
    (0..slots.members.len() as u32)
        .filter(|&id| slots.is_cyclic(graph, id))
        .filter_map(|id| {
            slots.members[id as usize]
                .iter()
                .min()
                .map(|&least| (least, id))
        })
        .min()
}

struct Frame {
    v: u32,
    /// Next out-neighbor position to examine
    pos: usize,
    /// Whether some circuit was closed below this frame
    found: bool,
}

struct CircuitSearch<'g, N, F> {
    graph: &'g GraphProjection<N>,
    limit: usize,
    emitted: usize,
    blocked: Vec<bool>,
    /// B(w): nodes to unblock together with w
    block_map: Vec<Vec<u32>>,
    path: Vec<u32>,
    frames: Vec<Frame>,
    consumer: F,
}

impl<N, F> CircuitSearch<'_, N, F>
where
    N: Node,
    F: FnMut(Path<N>),
{
    /// Report every circuit through `s` inside the component accepted by
    /// `in_component`. Breaks when the limit is hit or `cancel` fires.
    fn circuits_from<C, I>(&mut self, s: u32, in_component: I, cancel: &C) -> ControlFlow<()>
    where
        C: CancellationToken + ?Sized,
        I: Fn(u32) -> bool,
    {
        let graph = self.graph;
        self.path.push(s);
        self.blocked[s as usize] = true;
        self.frames.push(Frame {
            v: s,
            pos: 0,
            found: false,
        });

        while let Some(frame) = self.frames.last_mut() {
            if cancel.is_cancelled() {
                debug!(emitted = self.emitted, "elementary circuits cancelled");
                self.frames.clear();
                self.path.clear();
                return ControlFlow::Break(());
            }

            let v = frame.v;
            let neighbors = graph.out_neighbors(v);

            if let Some(&w) = neighbors.get(frame.pos) {
                frame.pos += 1;
                if !in_component(w) {
                    continue;
                }
                if w == s {
                    frame.found = true;
                    (self.consumer)(Path::new(graph.to_nodes(&self.path)));
                    self.emitted += 1;
                    if self.emitted >= self.limit {
                        self.frames.clear();
                        self.path.clear();
                        return ControlFlow::Break(());
                    }
                } else if !self.blocked[w as usize] {
                    self.path.push(w);
                    self.blocked[w as usize] = true;
                    self.frames.push(Frame {
                        v: w,
                        pos: 0,
                        found: false,
                    });
                }
                continue;
            }

            // All neighbors examined: retreat from v.
            let found = frame.found;
            self.frames.pop();
            self.path.pop();

            if found {
                self.unblock(v);
                if let Some(parent) = self.frames.last_mut() {
                    parent.found = true;
                }
            } else {
                for &w in neighbors {
                    if in_component(w) && !self.block_map[w as usize].contains(&v) {
                        self.block_map[w as usize].push(v);
                    }
                }
            }
        }

        ControlFlow::Continue(())
    }

    fn unblock(&mut self, v: u32) {
        let mut pending = vec![v];
        while let Some(u) = pending.pop() {
            if !self.blocked[u as usize] {
                continue;
            }
            self.blocked[u as usize] = false;
            pending.append(&mut self.block_map[u as usize]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::test_utils::build_test_graph;
    use digraph_common::CancelFlag;

    fn cycles_of(result: ElementaryCircuitsResult<u32>) -> Vec<Vec<u32>> {
        result.cycles.into_iter().map(Path::into_nodes).collect()
    }

    #[test]
    fn test_elementary_circuits() {
        // 0->1->2->0 (Cycle 1)
        // 1->2->1 (Cycle 2 - nested)
        let graph = build_test_graph(vec![0, 1, 2], vec![(0, 1), (1, 2), (2, 0), (2, 1)]);

        let result = ElementaryCircuits::run(&graph, ElementaryCircuitsConfig::default());

        assert_eq!(cycles_of(result), vec![vec![0, 1, 2], vec![1, 2]]);
    }

    #[test]
    fn test_self_loops_are_circuits() {
        let graph = build_test_graph(vec![0, 1, 2], vec![(0, 0), (0, 1), (1, 0), (2, 2)]);

        let result = ElementaryCircuits::run(&graph, ElementaryCircuitsConfig::default());

        assert_eq!(cycles_of(result), vec![vec![0], vec![0, 1], vec![2]]);
    }

    #[test]
    fn test_complete_digraph_count() {
        // K4 without self-loops: 6 two-cycles, 8 three-cycles, 6 four-cycles
        let nodes: Vec<u32> = (0..4).collect();
        let edges = (0..4)
            .flat_map(|a| (0..4).filter(move |&b| b != a).map(move |b| (a, b)))
            .collect();
        let graph = build_test_graph(nodes, edges);

        let result = ElementaryCircuits::run(&graph, ElementaryCircuitsConfig::default());
        assert_eq!(result.cycles.len(), 20);

        let limited = ElementaryCircuits::run(&graph, ElementaryCircuitsConfig { limit: Some(3) });
        assert_eq!(limited.cycles.len(), 3);
    }

    #[test]
    fn test_acyclic_graph_has_no_circuits() {
        let graph = build_test_graph(vec![0, 1, 2], vec![(0, 1), (1, 2), (0, 2)]);
        let result = ElementaryCircuits::run(&graph, ElementaryCircuitsConfig::default());
        assert!(result.cycles.is_empty());
    }

    #[test]
    fn test_long_cycle_does_not_recurse() {
        let n = 100_000u32;
        let nodes: Vec<u32> = (0..n).collect();
        let edges = (0..n).map(|i| (i, (i + 1) % n)).collect();
        let graph = build_test_graph(nodes, edges);

        let result = ElementaryCircuits::run(&graph, ElementaryCircuitsConfig::default());
        assert_eq!(result.cycles.len(), 1);
        assert_eq!(result.cycles[0].nodes.len(), n as usize);
    }

    #[test]
    fn test_cancelled_stream_stops() {
        let graph = build_test_graph(vec![0, 1], vec![(0, 1), (1, 0)]);
        let flag = CancelFlag::new();
        flag.cancel();

        let mut seen = 0;
        let emitted = ElementaryCircuits::for_each(
            &graph,
            &ElementaryCircuitsConfig::default(),
            &flag,
            |_| seen += 1,
        );
        assert_eq!(emitted, 0);
        assert_eq!(seen, 0);
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let config = ElementaryCircuitsConfig { limit: Some(0) };
        assert!(matches!(
            config.validate(),
            Err(GraphError::InvalidConfig { .. })
        ));
        assert!(ElementaryCircuitsConfig::default().validate().is_ok());
    }
}
