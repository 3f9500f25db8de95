/*!
 * Memory Visualization
 * Text projections of the block table for the shell
 */

use super::types::MemoryBlock;
use crate::core::types::Size;
use std::fmt::Write;

/// Character for a cell overlapped by an owned block
pub const ALLOCATED_CELL: char = '#';
/// Character for a cell with no owned block
pub const FREE_CELL: char = '.';

/// One line per block: `[start - end] : Free | Allocated (id N)`
pub fn render_table(blocks: &[MemoryBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        let _ = write!(out, "[{} - {}] : ", block.start, block.last());
        let _ = match block.owner {
            Some(id) => writeln!(out, "Allocated (id {})", id),
            None => writeln!(out, "Free"),
        };
    }
    out
}

/// Project the address space onto `cells` characters
///
/// Cells split `[0, total)` proportionally, so every address lands in some
/// cell even when `total` is not a multiple of `cells`. A space narrower than
/// the map gets one unit per cell. A cell is marked allocated if any owned
/// block overlaps its range.
pub fn render_map(blocks: &[MemoryBlock], total: Size, cells: usize) -> String {
    (0..cells)
        .map(|cell| {
            let (start, end) = cell_range(cell, total, cells);
            let occupied = blocks
                .iter()
                .any(|b| !b.is_free() && b.overlaps(start, end));
            if occupied {
                ALLOCATED_CELL
            } else {
                FREE_CELL
            }
        })
        .collect()
}

/// Address range `[start, end)` covered by `cell`
fn cell_range(cell: usize, total: Size, cells: usize) -> (Size, Size) {
    if total < cells {
        return (cell, cell + 1);
    }
    (cell * total / cells, ((cell + 1) * total).div_ceil(cells))
}
