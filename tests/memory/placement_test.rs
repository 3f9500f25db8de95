/*!
 * Placement Strategy Tests
 * First, best and next fit over fragmented layouts
 */

use pretty_assertions::assert_eq;
use vmem_sim::memory::{MemoryBlock, MemoryManager, Strategy};

/// Holes of 300 at 100, 200 at 500 and 200 at 800
fn fragmented() -> MemoryManager {
    let mem_mgr = MemoryManager::new();
    for (id, size) in [(1, 100), (2, 300), (3, 100), (4, 200), (5, 100)] {
        mem_mgr.allocate(id, size, Strategy::First).unwrap();
    }
    mem_mgr.deallocate(2).unwrap();
    mem_mgr.deallocate(4).unwrap();
    mem_mgr
}

#[test]
fn test_fragmented_layout() {
    let free: Vec<MemoryBlock> = fragmented()
        .snapshot()
        .into_iter()
        .filter(|b| b.is_free())
        .collect();

    assert_eq!(
        free,
        vec![
            MemoryBlock::free(100, 300),
            MemoryBlock::free(500, 200),
            MemoryBlock::free(800, 200),
        ]
    );
}

#[test]
fn test_first_fit_determinism() {
    // Same layout, same answer: the lowest hole that fits
    for _ in 0..3 {
        let mem_mgr = fragmented();
        let a = mem_mgr.allocate(10, 150, Strategy::First).unwrap();
        assert_eq!(a.address, 100);
    }

    let mem_mgr = fragmented();
    let a = mem_mgr.allocate(10, 250, Strategy::First).unwrap();
    assert_eq!(a.address, 100);
}

#[test]
fn test_best_fit_minimality() {
    let mem_mgr = fragmented();

    // Both 200-unit holes are the tightest fit; the lower one wins the tie
    let a = mem_mgr.allocate(10, 150, Strategy::Best).unwrap();
    assert_eq!(a.address, 500);

    // Then the remaining 200-unit hole
    let b = mem_mgr.allocate(11, 200, Strategy::Best).unwrap();
    assert_eq!(b.address, 800);

    // Only the 300-unit hole is left
    let c = mem_mgr.allocate(12, 300, Strategy::Best).unwrap();
    assert_eq!(c.address, 100);
    assert!(c.evicted.is_empty());
}

#[test]
fn test_next_fit_continuation() {
    let mem_mgr = MemoryManager::new();

    let a = mem_mgr.allocate(1, 100, Strategy::Next).unwrap();
    let b = mem_mgr.allocate(2, 100, Strategy::Next).unwrap();
    assert_ne!(a.address, b.address);
    assert!(b.address > a.address);

    // First fit would go back to the hole at 0; next fit keeps moving forward
    mem_mgr.deallocate(1).unwrap();
    let c = mem_mgr.allocate(3, 100, Strategy::Next).unwrap();
    assert_eq!(c.address, 200);

    let d = mem_mgr.allocate(4, 100, Strategy::First).unwrap();
    assert_eq!(d.address, 0);
}

#[test]
fn test_next_fit_wraps_to_start() {
    let mem_mgr = MemoryManager::new();
    for id in 1..=9 {
        mem_mgr.allocate(id, 100, Strategy::Next).unwrap();
    }
    mem_mgr.deallocate(2).unwrap();

    // The last placement ended the scan at the tail; the only hole before it is at 100
    let tail = mem_mgr.allocate(10, 100, Strategy::Next).unwrap();
    assert_eq!(tail.address, 900);
    let wrapped = mem_mgr.allocate(11, 100, Strategy::Next).unwrap();
    assert_eq!(wrapped.address, 100);
    assert!(wrapped.evicted.is_empty());
}

#[test]
fn test_split_keeps_remainder_after_placement() {
    let mem_mgr = fragmented();
    mem_mgr.allocate(10, 100, Strategy::First).unwrap();

    let snapshot = mem_mgr.snapshot();
    assert_eq!(snapshot[1], MemoryBlock::owned(100, 100, 10));
    assert_eq!(snapshot[2], MemoryBlock::free(200, 200));
}
