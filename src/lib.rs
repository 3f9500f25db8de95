/*!
 * Virtual Memory Simulator Library
 * Region tracking, placement strategies and swap-out over a fixed address space
 */

pub mod core;
pub mod memory;
pub mod monitoring;
pub mod shell;

// Re-exports
pub use crate::core::{AllocationId, SimulatorConfig};
pub use memory::{
    Allocation, Allocator, MemoryBlock, MemoryError, MemoryInfo, MemoryManager, MemoryResult,
    MemoryStats, Strategy,
};
pub use monitoring::init_tracing;
pub use shell::Shell;
