/*!
 * Swap-Out
 * FIFO eviction of the oldest live allocation
 */

use super::table::RegionTable;
use crate::core::types::AllocationId;
use crate::memory::types::MemoryBlock;
use std::collections::VecDeque;
use tracing::debug;

/// Allocation ids in the order they were placed
///
/// Freed ids are not removed here; they are dropped as stale when eviction
/// reaches them.
#[derive(Debug, Clone, Default)]
pub struct EvictionQueue {
    order: VecDeque<AllocationId>,
}

impl EvictionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: AllocationId) {
        self.order.push_back(id);
    }

    pub fn pop(&mut self) -> Option<AllocationId> {
        self.order.pop_front()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AllocationId> {
        self.order.iter()
    }
}

impl RegionTable {
    /// Free the oldest allocation that still owns a block
    ///
    /// Returns the victim's block as it was before being freed, or `None` once
    /// the queue holds no live id.
    pub fn swap_out(&mut self) -> Option<MemoryBlock> {
        while let Some(victim) = self.eviction_queue.pop() {
            let freed = self.release(victim);
            let Some(block) = freed.first().copied() else {
                debug!(id = victim, "Skipping stale eviction entry");
                continue;
            };

            self.merge();
            self.record_eviction(victim, &block);
            return Some(block);
        }
        None
    }

    /// Ids still waiting in the eviction queue, oldest first
    pub fn eviction_order(&self) -> Vec<AllocationId> {
        self.eviction_queue.iter().copied().collect()
    }
}
