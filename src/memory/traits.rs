/*!
 * Memory Traits
 * Memory management abstractions
 */

use super::types::*;
use crate::core::types::{AllocationId, Size};

/// Memory allocator interface
pub trait Allocator: Send + Sync {
    /// Allocate memory for an id under a placement strategy
    fn allocate(&self, id: AllocationId, size: Size, strategy: Strategy)
        -> MemoryResult<Allocation>;

    /// Free every block owned by an id
    fn deallocate(&self, id: AllocationId) -> MemoryResult<Vec<MemoryBlock>>;

    /// Check if an id currently owns a block
    fn is_allocated(&self, id: AllocationId) -> bool;

    /// Get the block owned by an id
    fn block_of(&self, id: AllocationId) -> Option<MemoryBlock>;
}

/// Memory statistics provider
pub trait MemoryInfo: Send + Sync {
    /// Get overall memory statistics
    fn stats(&self) -> MemoryStats;

    /// Get memory info as (total, used, available)
    fn info(&self) -> (Size, Size, Size);

    /// Get memory pressure level
    fn pressure(&self) -> MemoryPressure {
        self.stats().memory_pressure()
    }
}
