/*!
 * Memory Allocator Implementation
 * Allocation and deallocation logic
 */

use super::super::types::{Allocation, MemoryBlock, MemoryPressure, MemoryResult, Strategy};
use super::MemoryManager;
use crate::core::types::{AllocationId, Size};
use tracing::{info, warn};

impl MemoryManager {
    /// Allocate `size` units for `id`, rounded up to whole pages
    ///
    /// Swaps out the oldest live allocations, one per retry, when no free
    /// block fits.
    pub fn allocate(
        &self,
        id: AllocationId,
        size: Size,
        strategy: Strategy,
    ) -> MemoryResult<Allocation> {
        let (result, used) = {
            let mut table = self.table.lock();
            let result = table.allocate(id, size, strategy);
            (result, table.used())
        };

        let allocation = match result {
            Ok(allocation) => allocation,
            Err(e) => {
                warn!(id, requested = size, strategy = %strategy, error = %e, "Allocation rejected");
                return Err(e);
            }
        };

        if let Some(level) = self.check_memory_pressure(used) {
            warn!(
                id,
                address = allocation.address,
                size = allocation.size,
                pages = allocation.pages,
                evicted = allocation.evicted.len(),
                used,
                total = self.config.total_size,
                "Memory pressure {}: allocated under {} fit",
                level,
                strategy
            );
        } else {
            info!(
                id,
                address = allocation.address,
                size = allocation.size,
                pages = allocation.pages,
                evicted = allocation.evicted.len(),
                "Allocated under {} fit",
                strategy
            );
        }

        Ok(allocation)
    }

    /// Allocate with the placement strategy given by name
    pub fn allocate_named(
        &self,
        id: AllocationId,
        size: Size,
        strategy: &str,
    ) -> MemoryResult<Allocation> {
        match strategy.parse::<Strategy>() {
            Ok(strategy) => self.allocate(id, size, strategy),
            Err(e) => {
                warn!(id, requested = size, error = %e, "Allocation rejected");
                Err(e)
            }
        }
    }

    /// Free the block owned by `id` and coalesce its free neighbours
    pub fn deallocate(&self, id: AllocationId) -> MemoryResult<Vec<MemoryBlock>> {
        let result = self.table.lock().deallocate(id);

        match &result {
            Ok(freed) => {
                for block in freed {
                    info!(id, address = block.start, size = block.size, "Deallocated");
                }
            }
            Err(e) => {
                warn!(id, error = %e, "Attempted to deallocate unknown or already freed id");
            }
        }

        result
    }

    /// Check if `id` currently owns a block
    pub fn is_allocated(&self, id: AllocationId) -> bool {
        self.table.lock().block_of(id).is_some()
    }

    /// Block currently owned by `id`
    pub fn block_of(&self, id: AllocationId) -> Option<MemoryBlock> {
        self.table.lock().block_of(id)
    }

    /// Check memory pressure level
    pub(super) fn check_memory_pressure(&self, used: Size) -> Option<MemoryPressure> {
        let usage_ratio = used as f64 / self.config.total_size as f64;

        match MemoryPressure::from_ratio(usage_ratio) {
            MemoryPressure::Low => None,
            level => Some(level),
        }
    }
}
