//! Bucketed open set for A*.
//!
//! Nodes are split into four buckets by the parity of their (x, z)
//! coordinates. Each bucket is kept sorted with the cheapest node last, so
//! extract-minimum compares at most four tails and pops in O(1). Inserts
//! scan backwards from the tail: the search expands a frontier, so new
//! nodes usually land close to the end.

use std::collections::HashMap;

use voxnav_core::BlockPos;

use crate::node::{NodeId, PathNode};

const BUCKETS: usize = 4;

/// Open set over nodes stored in an external arena.
///
/// Every method that needs to compare costs takes the arena slice; the set
/// itself only stores node ids plus a coordinate index for membership.
#[derive(Debug, Default)]
pub struct OpenSet {
    buckets: [Vec<NodeId>; BUCKETS],
    index: HashMap<BlockPos, NodeId>,
}

impl OpenSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Remove everything, keeping allocations.
    pub fn clear(&mut self) {
        for b in &mut self.buckets {
            b.clear();
        }
        self.index.clear();
    }

    #[inline]
    pub fn contains(&self, pos: BlockPos) -> bool {
        self.index.contains_key(&pos)
    }

    /// The queued node at `pos`, whatever its current cost.
    #[inline]
    pub fn find(&self, pos: BlockPos) -> Option<NodeId> {
        self.index.get(&pos).copied()
    }

    /// Queue node `id`. Returns `false`, leaving the set unchanged, when a
    /// node with the same coordinates is already queued.
    pub fn add(&mut self, nodes: &[PathNode], id: NodeId) -> bool {
        let pos = nodes[id].pos;
        if self.index.contains_key(&pos) {
            return false;
        }
        self.index.insert(pos, id);
        insert_sorted(&mut self.buckets[bucket_of(pos)], nodes, id);
        true
    }

    /// Remove the node queued at `pos`.
    pub fn remove(&mut self, pos: BlockPos) -> Option<NodeId> {
        let id = self.index.remove(&pos)?;
        let bucket = &mut self.buckets[bucket_of(pos)];
        if let Some(i) = bucket.iter().rposition(|&n| n == id) {
            bucket.remove(i);
        }
        Some(id)
    }

    /// Pop the cheapest node (lowest `f`, then lowest `h`).
    pub fn remove_nearest(&mut self, nodes: &[PathNode]) -> Option<NodeId> {
        let mut best: Option<usize> = None;
        for (bi, bucket) in self.buckets.iter().enumerate() {
            let Some(&tail) = bucket.last() else {
                continue;
            };
            let better = match best {
                None => true,
                Some(b) => {
                    let cur = *self.buckets[b].last()?;
                    nodes[tail].cost_cmp(&nodes[cur]).is_lt()
                }
            };
            if better {
                best = Some(bi);
            }
        }
        let id = self.buckets[best?].pop()?;
        self.index.remove(&nodes[id].pos);
        Some(id)
    }

    /// Restore bucket order after node `id`'s cost was lowered in place.
    pub fn decrease_key(&mut self, nodes: &[PathNode], id: NodeId) {
        let bucket = &mut self.buckets[bucket_of(nodes[id].pos)];
        let Some(i) = bucket.iter().rposition(|&n| n == id) else {
            return;
        };
        bucket.remove(i);
        insert_sorted(bucket, nodes, id);
    }
}

#[inline]
fn bucket_of(pos: BlockPos) -> usize {
    (pos.z.rem_euclid(2) * 2 + pos.x.rem_euclid(2)) as usize
}

/// Insert `id` keeping `bucket` sorted from most to least expensive.
/// Equal-cost nodes go after existing ones, so the newest is popped first.
fn insert_sorted(bucket: &mut Vec<NodeId>, nodes: &[PathNode], id: NodeId) {
    let node = &nodes[id];
    let mut i = bucket.len();
    while i > 0 && nodes[bucket[i - 1]].cost_cmp(node).is_lt() {
        i -= 1;
    }
    bucket.insert(i, id);
}
