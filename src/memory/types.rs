/*!
 * Memory Types
 * Common types for region tracking and placement
 */

use crate::core::limits::{PRESSURE_CRITICAL_RATIO, PRESSURE_MEDIUM_RATIO, PRESSURE_WARNING_RATIO};
use crate::core::types::{Address, AllocationId, Size};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
///
/// Every variant leaves the region table exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum MemoryError {
    #[error("Unknown placement strategy: {0}")]
    #[diagnostic(
        code(memory::unknown_strategy),
        help("Use one of: first, best, next.")
    )]
    UnknownStrategy(String),

    #[error("Out of space: requested {requested} units, address space holds {total} units")]
    #[diagnostic(
        code(memory::out_of_space),
        help("No free region fits and eviction cannot make one. Free memory or request less.")
    )]
    OutOfSpace { requested: Size, total: Size },

    #[error("Allocation {0} not found")]
    #[diagnostic(
        code(memory::not_found),
        help("The id may never have been allocated, or was already freed or swapped out.")
    )]
    NotFound(AllocationId),

    #[error("Invalid allocation size: {0}")]
    #[diagnostic(code(memory::invalid_size), help("Request at least one unit."))]
    InvalidSize(Size),

    #[error("Allocation {0} already owns a block")]
    #[diagnostic(
        code(memory::duplicate_id),
        help("Free the existing allocation before reusing its id.")
    )]
    DuplicateId(AllocationId),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(memory::invalid_config))]
    InvalidConfig(String),
}

/// Contiguous range of the address space, free or owned by one allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBlock {
    pub start: Address,
    pub size: Size,
    pub owner: Option<AllocationId>,
}

impl MemoryBlock {
    pub fn free(start: Address, size: Size) -> Self {
        Self {
            start,
            size,
            owner: None,
        }
    }

    pub fn owned(start: Address, size: Size, owner: AllocationId) -> Self {
        Self {
            start,
            size,
            owner: Some(owner),
        }
    }

    pub fn is_free(&self) -> bool {
        self.owner.is_none()
    }

    pub fn is_owned_by(&self, id: AllocationId) -> bool {
        self.owner == Some(id)
    }

    /// One past the last address of the block
    pub fn end(&self) -> Address {
        self.start + self.size
    }

    /// Last address inside the block (inclusive)
    pub fn last(&self) -> Address {
        self.end() - 1
    }

    /// Whether the block shares any address with `[start, end)`
    pub fn overlaps(&self, start: Address, end: Address) -> bool {
        self.start < end && start < self.end()
    }
}

/// Placement strategy used to pick a free block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Lowest-address block that fits
    First,
    /// Smallest block that fits, lowest address on ties
    Best,
    /// First block that fits, scanning circularly from the last placement
    Next,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::First, Strategy::Best, Strategy::Next];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::First => "first",
            Strategy::Best => "best",
            Strategy::Next => "next",
        }
    }
}

impl FromStr for Strategy {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Strategy::First),
            "best" => Ok(Strategy::Best),
            "next" => Ok(Strategy::Next),
            other => Err(MemoryError::UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a successful placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub id: AllocationId,
    pub address: Address,
    /// Requested size rounded up to whole pages
    pub size: Size,
    pub pages: usize,
    /// Ids swapped out to make room, oldest first
    pub evicted: Vec<AllocationId>,
}

/// Memory statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_memory: Size,
    pub used_memory: Size,
    pub available_memory: Size,
    pub usage_percentage: f64,
    pub allocated_blocks: usize,
    pub free_blocks: usize,
    pub largest_free_block: Size,
    pub allocation_count: u64,
    pub eviction_count: u64,
}

impl MemoryStats {
    pub fn memory_pressure(&self) -> MemoryPressure {
        MemoryPressure::from_ratio(self.usage_percentage / 100.0)
    }
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl MemoryPressure {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= PRESSURE_CRITICAL_RATIO {
            MemoryPressure::Critical
        } else if ratio >= PRESSURE_WARNING_RATIO {
            MemoryPressure::High
        } else if ratio >= PRESSURE_MEDIUM_RATIO {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

impl fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}
