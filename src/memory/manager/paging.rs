/*!
 * Page Rounding
 * Converts requested sizes into whole-page reservations
 */

use crate::core::types::Size;

/// Number of pages needed to hold `size` units
pub fn pages_for(size: Size, page_size: Size) -> usize {
    size.div_ceil(page_size)
}

/// Round `size` up to the next multiple of `page_size`
///
/// Returns the reserved size together with its page count, or `None` when the
/// rounded size does not fit in a `usize`.
pub fn round_to_pages(size: Size, page_size: Size) -> Option<(Size, usize)> {
    let pages = pages_for(size, page_size);
    pages.checked_mul(page_size).map(|rounded| (rounded, pages))
}
