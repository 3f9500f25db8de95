/*!
 * Region Table
 * Ordered partition of the address space into free and owned blocks
 *
 * ```text
 *  0                                                         total
 *  +----------+------+--------------------+-------+----------+
 *  | id 1     | free | id 4               | id 2  | free     |
 *  +----------+------+--------------------+-------+----------+
 * ```
 *
 * The table always covers `[0, total)` with contiguous blocks, and no two
 * neighbouring blocks are both free.
 */

use super::eviction::EvictionQueue;
use super::paging;
use crate::core::config::SimulatorConfig;
use crate::core::types::{Address, AllocationId, Size};
use crate::memory::types::{Allocation, MemoryBlock, MemoryError, MemoryResult, Strategy};
use std::collections::HashSet;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct RegionTable {
    blocks: Vec<MemoryBlock>,
    total_size: Size,
    page_size: Size,
    /// Table position where the next next-fit search starts
    pub(super) last_pos: usize,
    pub(super) eviction_queue: EvictionQueue,
    pub(super) allocation_count: u64,
    pub(super) eviction_count: u64,
}

impl RegionTable {
    /// Create a table holding one free block over the whole space
    ///
    /// Fails with [`MemoryError::InvalidConfig`] for the geometries
    /// [`SimulatorConfig::validate`] rejects.
    pub fn new(total_size: Size, page_size: Size) -> MemoryResult<Self> {
        SimulatorConfig::new(total_size, page_size).validate()?;
        Ok(Self::with_geometry(total_size, page_size))
    }

    /// Table over a geometry that has already been validated
    pub(super) fn with_geometry(total_size: Size, page_size: Size) -> Self {
        debug_assert!(page_size > 0 && total_size % page_size == 0);
        Self {
            blocks: vec![MemoryBlock::free(0, total_size)],
            total_size,
            page_size,
            last_pos: 0,
            eviction_queue: EvictionQueue::new(),
            allocation_count: 0,
            eviction_count: 0,
        }
    }

    pub fn total_size(&self) -> Size {
        self.total_size
    }

    pub fn page_size(&self) -> Size {
        self.page_size
    }

    pub fn blocks(&self) -> &[MemoryBlock] {
        &self.blocks
    }

    pub fn snapshot(&self) -> Vec<MemoryBlock> {
        self.blocks.clone()
    }

    pub fn used(&self) -> Size {
        self.blocks
            .iter()
            .filter(|b| !b.is_free())
            .map(|b| b.size)
            .sum()
    }

    pub fn live_count(&self) -> usize {
        self.blocks.iter().filter(|b| !b.is_free()).count()
    }

    pub(super) fn owner_index(&self, id: AllocationId) -> Option<usize> {
        self.blocks.iter().position(|b| b.is_owned_by(id))
    }

    pub fn block_of(&self, id: AllocationId) -> Option<MemoryBlock> {
        self.owner_index(id).map(|index| self.blocks[index])
    }

    /// Place `requested` units for `id`, swapping out the oldest allocations
    /// one at a time until a block fits
    pub fn allocate(
        &mut self,
        id: AllocationId,
        requested: Size,
        strategy: Strategy,
    ) -> MemoryResult<Allocation> {
        if requested == 0 {
            return Err(MemoryError::InvalidSize(requested));
        }
        if self.owner_index(id).is_some() {
            return Err(MemoryError::DuplicateId(id));
        }

        let (size, pages) = match paging::round_to_pages(requested, self.page_size) {
            Some(rounded) => rounded,
            None => {
                return Err(MemoryError::OutOfSpace {
                    requested,
                    total: self.total_size,
                })
            }
        };

        // Every live block has a queue entry, so eviction can at best empty
        // the whole table. Anything larger is rejected before touching state.
        if size > self.total_size {
            return Err(MemoryError::OutOfSpace {
                requested: size,
                total: self.total_size,
            });
        }

        let mut evicted = Vec::new();
        for _attempt in 0..=self.live_count() {
            if let Some(index) = self.find_fit(strategy, size) {
                let address = self.place(index, id, size, strategy);
                self.debug_check();
                return Ok(Allocation {
                    id,
                    address,
                    size,
                    pages,
                    evicted,
                });
            }

            debug!(id, size, strategy = %strategy, "No free block fits, attempting swap-out");
            match self.swap_out().and_then(|victim| victim.owner) {
                Some(victim) => evicted.push(victim),
                None => break,
            }
        }

        Err(MemoryError::OutOfSpace {
            requested: size,
            total: self.total_size,
        })
    }

    /// Give the block at `index` to `id`, splitting off any remainder
    fn place(&mut self, index: usize, id: AllocationId, size: Size, strategy: Strategy) -> Address {
        let block = self.blocks[index];
        debug_assert!(block.is_free() && block.size >= size);

        if block.size > size {
            self.blocks.insert(
                index + 1,
                MemoryBlock::free(block.start + size, block.size - size),
            );
            debug!(
                start = block.start,
                kept = size,
                remainder = block.size - size,
                "Split free block"
            );
        }

        self.blocks[index] = MemoryBlock::owned(block.start, size, id);
        self.eviction_queue.push(id);
        self.allocation_count += 1;

        if strategy == Strategy::Next {
            self.last_pos = (index + 1) % self.blocks.len();
        }

        block.start
    }

    /// Free every block owned by `id` and coalesce
    pub fn deallocate(&mut self, id: AllocationId) -> MemoryResult<Vec<MemoryBlock>> {
        let freed = self.release(id);
        if freed.is_empty() {
            return Err(MemoryError::NotFound(id));
        }

        self.merge();
        self.debug_check();
        Ok(freed)
    }

    /// Clear ownership of every block held by `id`, without coalescing
    pub(super) fn release(&mut self, id: AllocationId) -> Vec<MemoryBlock> {
        let mut freed = Vec::new();
        for block in self.blocks.iter_mut().filter(|b| b.is_owned_by(id)) {
            freed.push(*block);
            block.owner = None;
        }
        freed
    }

    /// Fuse every run of adjacent free blocks into one
    ///
    /// Returns how many blocks were absorbed.
    pub fn merge(&mut self) -> usize {
        let before = self.blocks.len();

        // `dedup_by` hands us (current, previous kept); absorbing returns true
        self.blocks.dedup_by(|next, prev| {
            if prev.is_free() && next.is_free() {
                prev.size += next.size;
                true
            } else {
                false
            }
        });

        let absorbed = before - self.blocks.len();
        if absorbed > 0 {
            debug!(absorbed, blocks = self.blocks.len(), "Coalesced adjacent free blocks");
        }
        absorbed
    }

    /// Check coverage, contiguity and coalescing of the current layout
    pub fn check_invariants(&self) -> Result<(), String> {
        verify_layout(&self.blocks, self.total_size)
    }

    fn debug_check(&self) {
        if cfg!(debug_assertions) {
            if let Err(violation) = self.check_invariants() {
                panic!("region table invariant violated: {}", violation);
            }
        }
    }

    pub(super) fn record_eviction(&mut self, id: AllocationId, victim: &MemoryBlock) {
        self.eviction_count += 1;
        info!(
            id,
            address = victim.start,
            size = victim.size,
            "Swapped out allocation"
        );
    }
}

/// Verify that `blocks` partitions `[0, total)` with no adjacent free pair
/// and no id owning two blocks
pub fn verify_layout(blocks: &[MemoryBlock], total: Size) -> Result<(), String> {
    let mut expected_start = 0;
    let mut owners = HashSet::new();

    for (i, block) in blocks.iter().enumerate() {
        if block.size == 0 {
            return Err(format!("block {} at {} is empty", i, block.start));
        }
        if block.start != expected_start {
            return Err(format!(
                "block {} starts at {}, expected {}",
                i, block.start, expected_start
            ));
        }
        if i > 0 && block.is_free() && blocks[i - 1].is_free() {
            return Err(format!("blocks {} and {} are both free", i - 1, i));
        }
        if let Some(owner) = block.owner {
            if !owners.insert(owner) {
                return Err(format!("id {} owns more than one block", owner));
            }
        }
        expected_start = block.end();
    }

    if expected_start != total {
        return Err(format!("blocks end at {}, expected {}", expected_start, total));
    }
    Ok(())
}
