/*!
 * Simulator Configuration
 * Address space geometry fixed at construction
 */

use super::limits::{DEFAULT_MAP_CELLS, DEFAULT_PAGE_SIZE, DEFAULT_TOTAL_SIZE};
use super::types::Size;
use crate::memory::{MemoryError, MemoryResult};
use serde::{Deserialize, Serialize};

/// Geometry of a simulated address space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    pub total_size: Size,
    pub page_size: Size,
    /// Width of the ASCII memory map
    pub map_cells: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            total_size: DEFAULT_TOTAL_SIZE,
            page_size: DEFAULT_PAGE_SIZE,
            map_cells: DEFAULT_MAP_CELLS,
        }
    }
}

impl SimulatorConfig {
    pub fn new(total_size: Size, page_size: Size) -> Self {
        Self {
            total_size,
            page_size,
            ..Default::default()
        }
    }

    pub fn with_total_size(mut self, total_size: Size) -> Self {
        self.total_size = total_size;
        self
    }

    pub fn with_page_size(mut self, page_size: Size) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_map_cells(mut self, map_cells: usize) -> Self {
        self.map_cells = map_cells;
        self
    }

    /// Reject geometries the region table cannot represent
    ///
    /// A total size that is not a whole number of pages would leave a tail
    /// block no rounded request could ever claim.
    pub fn validate(&self) -> MemoryResult<()> {
        if self.page_size == 0 {
            return Err(MemoryError::InvalidConfig("page size must be positive".into()));
        }
        if self.total_size == 0 {
            return Err(MemoryError::InvalidConfig("total size must be positive".into()));
        }
        if self.total_size % self.page_size != 0 {
            return Err(MemoryError::InvalidConfig(format!(
                "total size {} is not a multiple of page size {}",
                self.total_size, self.page_size
            )));
        }
        if self.map_cells == 0 {
            return Err(MemoryError::InvalidConfig("map needs at least one cell".into()));
        }
        Ok(())
    }

    /// Number of pages backing the whole address space
    pub fn page_count(&self) -> usize {
        self.total_size / self.page_size
    }
}
