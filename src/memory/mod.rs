/*!
 * Memory Module
 * Region tracking, placement and swap-out
 */

pub mod manager;
pub mod traits;
pub mod types;
pub mod visual;

// Re-export for convenience
pub use manager::{verify_layout, MemoryManager, RegionTable};
pub use traits::*;
pub use types::*;
