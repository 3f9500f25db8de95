/*!
 * Placement Strategies
 * First, best and next fit over the region table
 */

use super::table::RegionTable;
use crate::core::types::Size;
use crate::memory::types::Strategy;

impl RegionTable {
    /// Index of the free block `strategy` picks for `size` units
    pub fn find_fit(&self, strategy: Strategy, size: Size) -> Option<usize> {
        match strategy {
            Strategy::First => self.find_first_fit(size),
            Strategy::Best => self.find_best_fit(size),
            Strategy::Next => self.find_next_fit(size),
        }
    }

    fn find_first_fit(&self, size: Size) -> Option<usize> {
        self.blocks()
            .iter()
            .position(|b| b.is_free() && b.size >= size)
    }

    fn find_best_fit(&self, size: Size) -> Option<usize> {
        // min_by_key keeps the first minimum, so ties go to the lowest address
        self.blocks()
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_free() && b.size >= size)
            .min_by_key(|(_, b)| b.size)
            .map(|(index, _)| index)
    }

    /// Scan once around the table, starting at the position after the last
    /// next-fit placement
    fn find_next_fit(&self, size: Size) -> Option<usize> {
        let blocks = self.blocks();
        let n = blocks.len();
        // Coalescing may have shrunk the table since `last_pos` was recorded
        let start = self.last_pos % n;

        (0..n)
            .map(|offset| (start + offset) % n)
            .find(|&i| blocks[i].is_free() && blocks[i].size >= size)
    }
}
