// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Identity mapping between caller nodes and dense algorithm slots.
//!
//! Graph algorithms typically require dense integer indices (0..V) for efficient
//! array-based state storage. Callers hand us arbitrary hashable node identities.
//! This module provides bidirectional mapping between these representations.

use digraph_common::Node;
use fxhash::FxHashMap;

/// Bidirectional mapping between nodes and dense algorithm slots.
///
/// # Example
///
/// ```
/// use digraph_algo::IdMap;
///
/// let mut id_map = IdMap::new();
/// id_map.insert("core"); // slot 0
/// id_map.insert("app"); // slot 1
///
/// assert_eq!(id_map.to_slot(&"core"), Some(0));
/// assert_eq!(id_map.to_node(1), Some(&"app"));
/// ```
#[derive(Debug, Clone)]
pub struct IdMap<N> {
    /// Dense slot -> Node
    slot_to_node: Vec<N>,
    /// Node -> Dense slot
    node_to_slot: FxHashMap<N, u32>,
}

impl<N: Node> IdMap<N> {
    /// Create an empty ID map.
    pub fn new() -> Self {
        Self {
            slot_to_node: Vec::new(),
            node_to_slot: FxHashMap::default(),
        }
    }

    /// Create an ID map with preallocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slot_to_node: Vec::with_capacity(capacity),
            node_to_slot: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Insert a node and return its slot.
    ///
    /// If the node already exists, returns the existing slot.
    pub fn insert(&mut self, node: N) -> u32 {
        if let Some(&slot) = self.node_to_slot.get(&node) {
            return slot;
        }

        let slot = self.slot_to_node.len() as u32;
        self.node_to_slot.insert(node.clone(), slot);
        self.slot_to_node.push(node);
        slot
    }

    /// Get the slot for a node.
    #[inline]
    pub fn to_slot(&self, node: &N) -> Option<u32> {
        self.node_to_slot.get(node).copied()
    }

    /// Get the node for a slot.
    #[inline]
    pub fn to_node(&self, slot: u32) -> Option<&N> {
        self.slot_to_node.get(slot as usize)
    }

    /// Get the node for a slot (panics if out of bounds).
    #[inline]
    pub fn to_node_unchecked(&self, slot: u32) -> &N {
        &self.slot_to_node[slot as usize]
    }

    /// Number of mapped nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.slot_to_node.len()
    }

    /// Whether the map is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slot_to_node.is_empty()
    }

    /// Check if a node is in the map.
    #[inline]
    pub fn contains(&self, node: &N) -> bool {
        self.node_to_slot.contains_key(node)
    }

    /// Iterate over all (slot, node) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &N)> + '_ {
        self.slot_to_node
            .iter()
            .enumerate()
            .map(|(slot, node)| (slot as u32, node))
    }
}

impl<N: Node> Default for IdMap<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Node> FromIterator<N> for IdMap<N> {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (lower, upper) = iter.size_hint();
        let mut map = Self::with_capacity(upper.unwrap_or(lower));

        for node in iter {
            map.insert(node);
        }

        map
    }
}
