/*!
 * Memory Statistics
 * Read-only usage summaries of the region table
 */

use super::super::types::MemoryStats;
use super::MemoryManager;
use crate::core::types::Size;

impl MemoryManager {
    /// Get detailed memory statistics
    pub fn stats(&self) -> MemoryStats {
        let table = self.table.lock();
        let blocks = table.blocks();

        let total = table.total_size();
        let used = table.used();
        let free_blocks = blocks.iter().filter(|b| b.is_free()).count();
        let largest_free_block = blocks
            .iter()
            .filter(|b| b.is_free())
            .map(|b| b.size)
            .max()
            .unwrap_or(0);

        MemoryStats {
            total_memory: total,
            used_memory: used,
            available_memory: total - used,
            usage_percentage: (used as f64 / total as f64) * 100.0,
            allocated_blocks: blocks.len() - free_blocks,
            free_blocks,
            largest_free_block,
            allocation_count: table.allocation_count,
            eviction_count: table.eviction_count,
        }
    }

    /// Get memory info as (total, used, available)
    pub fn info(&self) -> (Size, Size, Size) {
        let table = self.table.lock();
        let used = table.used();
        (table.total_size(), used, table.total_size() - used)
    }
}
