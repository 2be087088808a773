// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! K-Shortest Paths Algorithm (Eppstein).
//!
//! Finds the k shortest paths by hop count from a source to a target. Every
//! path is described relative to the shortest-path tree towards the target as
//! the sequence of non-tree edges ("sidetracks") it takes. The sequences are
//! enumerated cheapest first through a path graph over persistent heaps, so
//! each additional path costs O(log n) after an O(m + n log n) setup.
//!
//! Results are walks: on cyclic graphs a path may revisit nodes, including
//! the target.

use crate::algo::GraphProjection;
use crate::algo::algorithms::Algorithm;
use crate::algo::algorithms::path_heap::{NIL, OutHeaps, Sidetrack, TreeHeaps};
use crate::algo::traversal::Path;
use digraph_common::{CancellationToken, NeverCancelled, Node};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use tracing::{debug, instrument, trace};

const UNREACHED: u32 = u32::MAX;

pub struct KShortestPaths;

#[derive(Debug, Clone)]
pub struct KShortestPathsConfig<N> {
    pub source: N,
    pub target: N,
    pub k: usize,
}

impl<N> KShortestPathsConfig<N> {
    pub fn new(source: N, target: N, k: usize) -> Self {
        Self { source, target, k }
    }
}

#[derive(Debug, Clone)]
pub struct KShortestPathsResult<N> {
    /// Paths ordered by non-decreasing length
    pub paths: Vec<Path<N>>,
}

impl<N> KShortestPathsResult<N> {
    fn empty() -> Self {
        Self { paths: Vec::new() }
    }
}

impl Algorithm for KShortestPaths {
    type Config<N: Node> = KShortestPathsConfig<N>;
    type Result<N: Node> = KShortestPathsResult<N>;

    fn name() -> &'static str {
        "k_shortest_paths"
    }

    fn needs_reverse() -> bool {
        true
    }

    fn run<N: Node>(graph: &GraphProjection<N>, config: Self::Config<N>) -> Self::Result<N> {
        Self::run_cancellable(graph, config, &NeverCancelled)
    }
}

impl KShortestPaths {
    /// Run the search, polling `cancel` once per step of every loop.
    ///
    /// On cancellation the paths found so far are returned.
    #[instrument(skip_all, level = "debug", fields(vertices = graph.vertex_count(), k = config.k))]
    pub fn run_cancellable<N, C>(
        graph: &GraphProjection<N>,
        config: KShortestPathsConfig<N>,
        cancel: &C,
    ) -> KShortestPathsResult<N>
    where
        N: Node,
        C: CancellationToken + ?Sized,
    {
        if config.k == 0 {
            return KShortestPathsResult::empty();
        }
        let (Some(source), Some(target)) =
            (graph.to_slot(&config.source), graph.to_slot(&config.target))
        else {
            return KShortestPathsResult::empty();
        };
        if source == target {
            return KShortestPathsResult {
                paths: vec![Path::single(config.source)],
            };
        }

        let Some(index) = SidetrackIndex::build(graph, target, cancel) else {
            debug!("k-shortest-paths cancelled during setup");
            return KShortestPathsResult::empty();
        };
        if index.dist[source as usize] == UNREACHED {
            return KShortestPathsResult::empty();
        }

        let mut search = PathSearch::new(&index, source, target);
        let mut paths = Vec::with_capacity(config.k.min(64));
        while paths.len() < config.k {
            if cancel.is_cancelled() {
                debug!(found = paths.len(), "k-shortest-paths cancelled");
                break;
            }
            let Some(slots) = search.next_path() else {
                break;
            };
            paths.push(Path::new(graph.to_nodes(&slots)));
        }

        debug!(
            found = paths.len(),
            sidetracks = index.out.len(),
            heap_nodes = index.tree.len(),
            "k-shortest-paths computed"
        );

        KShortestPathsResult { paths }
    }
}

/// Shortest-path tree towards the target plus the sidetrack heaps over it.
struct SidetrackIndex {
    target: u32,
    /// Hops to the target
    dist: Vec<u32>,
    /// Next hop towards the target
    next: Vec<u32>,
    out: OutHeaps,
    tree: TreeHeaps,
    /// Slot -> persistent heap of all sidetracks on its tree path
    roots: Vec<u32>,
}

impl SidetrackIndex {
    fn build<N, C>(graph: &GraphProjection<N>, target: u32, cancel: &C) -> Option<Self>
    where
        N: Node,
        C: CancellationToken + ?Sized,
    {
        let n = graph.vertex_count();

        // 1. Backward BFS from the target
        let mut dist = vec![UNREACHED; n];
        let mut next = vec![NIL; n];
        let mut order = Vec::new();
        let mut queue = VecDeque::new();
        dist[target as usize] = 0;
        queue.push_back(target);

        while let Some(v) = queue.pop_front() {
            if cancel.is_cancelled() {
                return None;
            }
            order.push(v);
            for &u in graph.in_neighbors(v) {
                if dist[u as usize] == UNREACHED {
                    dist[u as usize] = dist[v as usize] + 1;
                    next[u as usize] = v;
                    queue.push_back(u);
                }
            }
        }

        // 2. Sidetracks of every node that can reach the target
        let mut sidetracks = Vec::new();
        for &u in &order {
            if cancel.is_cancelled() {
                return None;
            }
            for &v in graph.out_neighbors(u) {
                if dist[v as usize] == UNREACHED || next[u as usize] == v {
                    continue;
                }
                sidetracks.push(Sidetrack {
                    from: u,
                    to: v,
                    delta: dist[v as usize] + 1 - dist[u as usize],
                });
            }
        }
        let out = OutHeaps::build(n, sidetracks);
        trace!(reachable = order.len(), sidetracks = out.len(), "shortest-path tree built");

        // 3. Persistent heaps, parents before children in BFS order
        let mut tree = TreeHeaps::with_capacity(out.len() * 2);
        let mut roots = vec![NIL; n];
        for &v in &order {
            if cancel.is_cancelled() {
                return None;
            }
            let inherited = if v == target {
                NIL
            } else {
                roots[next[v as usize] as usize]
            };
            roots[v as usize] = match out.root(v) {
                Some(root) => tree.insert(inherited, root, out.get(root).delta),
                None => inherited,
            };
        }

        Some(Self {
            target,
            dist,
            next,
            out,
            tree,
            roots,
        })
    }

    fn sidetrack_of(&self, heap: HeapRef) -> Sidetrack {
        match heap {
            HeapRef::Tree(t) => self.out.get(self.tree.sidetrack(t)),
            HeapRef::Out(s) => self.out.get(s),
        }
    }

    /// Heap children of a path-graph node; their deltas are never smaller.
    fn heap_children(&self, heap: HeapRef) -> Vec<HeapRef> {
        match heap {
            HeapRef::Tree(t) => self
                .tree
                .children(t)
                .map(HeapRef::Tree)
                .chain(self.out.children(self.tree.sidetrack(t)).map(HeapRef::Out))
                .collect(),
            HeapRef::Out(s) => self.out.children(s).map(HeapRef::Out).collect(),
        }
    }

    /// Append tree hops from `current` until `until` is reached.
    fn follow_tree(&self, slots: &mut Vec<u32>, current: &mut u32, until: u32) {
        while *current != until {
            let hop = self.next[*current as usize];
            assert!(
                hop != NIL,
                "next-hop chain broken at slot {current} before reaching slot {until}"
            );
            *current = hop;
            slots.push(hop);
        }
    }
}

/// Node of the path graph: a tree heap node, or a non-root out-heap entry.
#[derive(Debug, Clone, Copy)]
enum HeapRef {
    Tree(u32),
    Out(u32),
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    heap: HeapRef,
    /// Candidate whose sidetrack precedes this one
    prefix: Option<u32>,
}

struct PathSearch<'i> {
    index: &'i SidetrackIndex,
    source: u32,
    candidates: Vec<Candidate>,
    queue: BinaryHeap<Reverse<(u32, u32)>>,
    emitted_shortest: bool,
}

impl<'i> PathSearch<'i> {
    fn new(index: &'i SidetrackIndex, source: u32, target: u32) -> Self {
        debug_assert_eq!(index.target, target);
        let mut search = Self {
            index,
            source,
            candidates: Vec::new(),
            queue: BinaryHeap::new(),
            emitted_shortest: false,
        };
        let root = index.roots[source as usize];
        if root != NIL {
            let cost = index.dist[source as usize] + index.sidetrack_of(HeapRef::Tree(root)).delta;
            search.push(HeapRef::Tree(root), None, cost);
        }
        search
    }

    fn push(&mut self, heap: HeapRef, prefix: Option<u32>, cost: u32) {
        let id = self.candidates.len() as u32;
        self.candidates.push(Candidate { heap, prefix });
        self.queue.push(Reverse((cost, id)));
    }

    /// Slots of the next path, or None once every path has been produced.
    fn next_path(&mut self) -> Option<Vec<u32>> {
        if !self.emitted_shortest {
            self.emitted_shortest = true;
            return Some(self.reconstruct(None));
        }

        let Reverse((cost, id)) = self.queue.pop()?;
        let candidate = self.candidates[id as usize];
        let sidetrack = self.index.sidetrack_of(candidate.heap);

        // Swap the last sidetrack for a heap child.
        for child in self.index.heap_children(candidate.heap) {
            let child_cost = cost - sidetrack.delta + self.index.sidetrack_of(child).delta;
            self.push(child, candidate.prefix, child_cost);
        }

        // Append another sidetrack after this one.
        let next_root = self.index.roots[sidetrack.to as usize];
        if next_root != NIL {
            let next_cost = cost + self.index.sidetrack_of(HeapRef::Tree(next_root)).delta;
            self.push(HeapRef::Tree(next_root), Some(id), next_cost);
        }

        Some(self.reconstruct(Some(id)))
    }

    fn reconstruct(&self, last: Option<u32>) -> Vec<u32> {
        let mut sidetracks = Vec::new();
        let mut cursor = last;
        while let Some(id) = cursor {
            let candidate = self.candidates[id as usize];
            sidetracks.push(self.index.sidetrack_of(candidate.heap));
            cursor = candidate.prefix;
        }

        let mut slots = vec![self.source];
        let mut current = self.source;
        for sidetrack in sidetracks.iter().rev() {
            self.index.follow_tree(&mut slots, &mut current, sidetrack.from);
            slots.push(sidetrack.to);
            current = sidetrack.to;
        }
        self.index
            .follow_tree(&mut slots, &mut current, self.index.target);
        slots
    }
}
