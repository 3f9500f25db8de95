/*!
 * Simulator Limits and Constants
 *
 * Centralized location for the defaults a simulated address space is built with.
 */

// =============================================================================
// ADDRESS SPACE
// =============================================================================

/// Total simulated address space (1000 units)
pub const DEFAULT_TOTAL_SIZE: usize = 1000;

/// Allocation granularity (100 units)
/// Every request is rounded up to a whole number of pages
pub const DEFAULT_PAGE_SIZE: usize = 100;

// =============================================================================
// VISUALIZATION
// =============================================================================

/// Number of cells in the ASCII memory map
pub const DEFAULT_MAP_CELLS: usize = 50;

// =============================================================================
// MEMORY PRESSURE
// =============================================================================

/// Usage ratio at which pressure is reported as medium
pub const PRESSURE_MEDIUM_RATIO: f64 = 0.60;

/// Usage ratio at which pressure is reported as high
pub const PRESSURE_WARNING_RATIO: f64 = 0.80;

/// Usage ratio at which pressure is reported as critical
pub const PRESSURE_CRITICAL_RATIO: f64 = 0.95;
