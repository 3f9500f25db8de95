/*!
 * Core Types
 * Common types used across the simulator
 */

/// Allocation identifier supplied by the caller (a PID in the shell)
pub type AllocationId = u32;

/// Offset into the simulated address space
pub type Address = usize;

/// Size type for memory operations
pub type Size = usize;
