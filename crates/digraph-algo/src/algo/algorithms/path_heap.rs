// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Heap structures behind the k-shortest-paths search.
//!
//! Every node owns an *out-heap* of its sidetracks. Out-heaps are stored
//! sorted in one CSR array and read as an implicit heap: local index 0 has
//! the single child 1, and index `j >= 1` has children `2j` and `2j + 1`.
//!
//! Along the shortest-path tree the out-heap roots are collected into
//! persistent leftist heaps. `TreeHeaps::insert` copies only the nodes on the
//! merge path, so the heap of a node shares all untouched structure with the
//! heap of its next hop.

pub(crate) const NIL: u32 = u32::MAX;

/// A non-tree edge `from -> to`, tagged with the extra hops it costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Sidetrack {
    pub from: u32,
    pub to: u32,
    pub delta: u32,
}

/// Per-node out-heaps, CSR layout, each node's run sorted by `delta`.
#[derive(Debug)]
pub(crate) struct OutHeaps {
    offsets: Vec<u32>,
    sidetracks: Vec<Sidetrack>,
}

impl OutHeaps {
    /// Group sidetracks by `from` and sort each group by `delta`.
    pub fn build(vertex_count: usize, mut sidetracks: Vec<Sidetrack>) -> Self {
        sidetracks.sort_by_key(|st| (st.from, st.delta));

        let mut offsets = vec![0u32; vertex_count + 1];
        for st in &sidetracks {
            offsets[st.from as usize + 1] += 1;
        }
        for i in 0..vertex_count {
            offsets[i + 1] += offsets[i];
        }

        Self {
            offsets,
            sidetracks,
        }
    }

    pub fn len(&self) -> usize {
        self.sidetracks.len()
    }

    #[inline]
    pub fn get(&self, id: u32) -> Sidetrack {
        self.sidetracks[id as usize]
    }

    /// Global id of the cheapest sidetrack leaving `slot`.
    pub fn root(&self, slot: u32) -> Option<u32> {
        let start = self.offsets[slot as usize];
        (start < self.offsets[slot as usize + 1]).then_some(start)
    }

    /// Out-heap children of sidetrack `id`.
    pub fn children(&self, id: u32) -> impl Iterator<Item = u32> + use<> {
        let from = self.sidetracks[id as usize].from as usize;
        let start = self.offsets[from];
        let end = self.offsets[from + 1];
        let local = id - start;

        let (first, count) = if local == 0 { (1, 1) } else { (2 * local, 2) };
        (first..first + count)
            .map(move |j| start + j)
            .filter(move |&global| global < end)
    }
}

#[derive(Debug, Clone, Copy)]
struct TreeNode {
    /// Out-heap root stored in this node
    sidetrack: u32,
    delta: u32,
    rank: u32,
    left: u32,
    right: u32,
}

/// Arena of persistent leftist heap nodes keyed by `(delta, sidetrack)`.
#[derive(Debug, Default)]
pub(crate) struct TreeHeaps {
    nodes: Vec<TreeNode>,
}

impl TreeHeaps {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn sidetrack(&self, heap: u32) -> u32 {
        self.nodes[heap as usize].sidetrack
    }

    /// Non-empty subheaps directly below `heap`.
    pub fn children(&self, heap: u32) -> impl Iterator<Item = u32> + use<> {
        let node = self.nodes[heap as usize];
        [node.left, node.right].into_iter().filter(|&h| h != NIL)
    }

    /// New heap containing everything in `heap` plus `sidetrack`. `heap` itself
    /// stays valid and unchanged.
    pub fn insert(&mut self, heap: u32, sidetrack: u32, delta: u32) -> u32 {
        let single = self.push(TreeNode {
            sidetrack,
            delta,
            rank: 1,
            left: NIL,
            right: NIL,
        });
        self.merge(heap, single)
    }

    fn merge(&mut self, a: u32, b: u32) -> u32 {
        if a == NIL {
            return b;
        }
        if b == NIL {
            return a;
        }

        let (top, other) = if self.key(b) < self.key(a) { (b, a) } else { (a, b) };
        let mut node = self.nodes[top as usize];
        // Right spine of a leftist heap has O(log n) nodes, bounding recursion.
        node.right = self.merge(node.right, other);
        if self.rank(node.left) < self.rank(node.right) {
            std::mem::swap(&mut node.left, &mut node.right);
        }
        node.rank = self.rank(node.right) + 1;
        self.push(node)
    }

    fn key(&self, heap: u32) -> (u32, u32) {
        let node = &self.nodes[heap as usize];
        (node.delta, node.sidetrack)
    }

    fn rank(&self, heap: u32) -> u32 {
        if heap == NIL {
            0
        } else {
            self.nodes[heap as usize].rank
        }
    }

    fn push(&mut self, node: TreeNode) -> u32 {
        let id = self.nodes.len() as u32;
        self.nodes.push(node);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn st(from: u32, to: u32, delta: u32) -> Sidetrack {
        Sidetrack { from, to, delta }
    }

    fn drain_out_heap(heaps: &OutHeaps, root: u32) -> Vec<u32> {
        let mut seen = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            seen.push(heaps.get(id).delta);
            for child in heaps.children(id) {
                assert!(heaps.get(child).delta >= heaps.get(id).delta);
                stack.push(child);
            }
        }
        seen.sort();
        seen
    }

    #[test]
    fn test_out_heap_covers_every_sidetrack_once() {
        let sidetracks = (0..7).map(|d| st(1, 0, 7 - d)).chain([st(0, 1, 3)]).collect();
        let heaps = OutHeaps::build(3, sidetracks);

        assert_eq!(heaps.len(), 8);
        assert!(heaps.root(2).is_none());

        let root = heaps.root(1).unwrap();
        assert_eq!(heaps.get(root).delta, 1);
        assert_eq!(drain_out_heap(&heaps, root), vec![1, 2, 3, 4, 5, 6, 7]);

        let single = heaps.root(0).unwrap();
        assert_eq!(heaps.children(single).count(), 0);
    }

    #[test]
    fn test_tree_heap_is_persistent() {
        let mut heaps = TreeHeaps::with_capacity(16);
        let a = heaps.insert(NIL, 10, 5);
        let b = heaps.insert(a, 11, 2);
        let c = heaps.insert(b, 12, 9);

        // Older versions keep their minimum and shape.
        assert_eq!(heaps.sidetrack(a), 10);
        assert_eq!(heaps.children(a).count(), 0);
        assert_eq!(heaps.sidetrack(b), 11);
        assert_eq!(heaps.sidetrack(c), 11);

        let mut all = Vec::new();
        let mut stack = vec![c];
        while let Some(h) = stack.pop() {
            all.push(heaps.sidetrack(h));
            stack.extend(heaps.children(h));
        }
        all.sort();
        assert_eq!(all, vec![10, 11, 12]);
    }
}
