/*!
 * Memory Management
 *
 * Simulated virtual memory allocator over a fixed address space.
 *
 * ## Region Table
 *
 * The address space `[0, total)` is an ordered list of contiguous blocks, each
 * either free or owned by one allocation id:
 * - **Page rounding**: requests are rounded up to whole pages
 * - **Placement**: first, best or next fit picks the free block
 * - **Block splitting**: the unused tail of a chosen block stays free
 * - **Coalescing**: adjacent free blocks are merged after every free
 * - **Swap-out**: when nothing fits, the oldest live allocation is evicted
 *   and the request retried, one victim at a time
 *
 * ## Concurrency
 *
 * The table sits behind a single mutex. Clones of [`MemoryManager`] share it,
 * and every operation runs to completion before the next one observes the
 * table.
 */

mod allocator;
mod eviction;
mod paging;
mod placement;
mod stats;
mod table;

pub use eviction::EvictionQueue;
pub use paging::{pages_for, round_to_pages};
pub use table::{verify_layout, RegionTable};

use super::traits::{Allocator, MemoryInfo};
use super::types::{Allocation, MemoryBlock, MemoryResult, MemoryStats, Strategy};
use crate::core::config::SimulatorConfig;
use crate::core::types::{AllocationId, Size};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

/// Memory manager
pub struct MemoryManager {
    pub(super) table: Arc<Mutex<RegionTable>>,
    pub(super) config: SimulatorConfig,
}

impl MemoryManager {
    /// Manager over the default 1000-unit space with 100-unit pages
    pub fn new() -> Self {
        let config = SimulatorConfig::default();
        Self::build(config)
    }

    /// Create memory manager with a custom geometry
    pub fn with_config(config: SimulatorConfig) -> MemoryResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Shorthand for [`MemoryManager::with_config`] with the default map width
    pub fn with_capacity(total: Size, page_size: Size) -> MemoryResult<Self> {
        Self::with_config(SimulatorConfig::new(total, page_size))
    }

    fn build(config: SimulatorConfig) -> Self {
        info!(
            total = config.total_size,
            page_size = config.page_size,
            pages = config.page_count(),
            "Memory manager initialized"
        );
        Self {
            table: Arc::new(Mutex::new(RegionTable::with_geometry(
                config.total_size,
                config.page_size,
            ))),
            config,
        }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Ordered copy of every block in the table
    pub fn snapshot(&self) -> Vec<MemoryBlock> {
        self.table.lock().snapshot()
    }

    /// Ids waiting in the eviction queue, oldest first, stale entries included
    pub fn eviction_order(&self) -> Vec<AllocationId> {
        self.table.lock().eviction_order()
    }

    /// Check the table's structural invariants
    pub fn check_invariants(&self) -> Result<(), String> {
        self.table.lock().check_invariants()
    }
}

// Implement trait interfaces
impl Allocator for MemoryManager {
    fn allocate(
        &self,
        id: AllocationId,
        size: Size,
        strategy: Strategy,
    ) -> MemoryResult<Allocation> {
        MemoryManager::allocate(self, id, size, strategy)
    }

    fn deallocate(&self, id: AllocationId) -> MemoryResult<Vec<MemoryBlock>> {
        MemoryManager::deallocate(self, id)
    }

    fn is_allocated(&self, id: AllocationId) -> bool {
        MemoryManager::is_allocated(self, id)
    }

    fn block_of(&self, id: AllocationId) -> Option<MemoryBlock> {
        MemoryManager::block_of(self, id)
    }
}

impl MemoryInfo for MemoryManager {
    fn stats(&self) -> MemoryStats {
        MemoryManager::stats(self)
    }

    fn info(&self) -> (Size, Size, Size) {
        MemoryManager::info(self)
    }
}

impl Clone for MemoryManager {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            config: self.config,
        }
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::new()
    }
}
