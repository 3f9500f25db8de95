/*!
 * Region Table Property Tests
 * Structural invariants over random allocate/free sequences
 */

use proptest::prelude::*;
use vmem_sim::memory::{
    verify_layout, MemoryBlock, MemoryError, RegionTable, Strategy as Placement,
};

const TOTAL: usize = 1000;
const PAGE: usize = 100;

#[derive(Debug, Clone)]
enum Op {
    Alloc { id: u32, size: usize, placement: Placement },
    Free { id: u32 },
}

fn placement() -> impl Strategy<Value = Placement> {
    prop_oneof![
        Just(Placement::First),
        Just(Placement::Best),
        Just(Placement::Next),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u32..8, 1usize..1200, placement())
            .prop_map(|(id, size, placement)| Op::Alloc { id, size, placement }),
        1 => (0u32..8).prop_map(|id| Op::Free { id }),
    ]
}

fn no_adjacent_free(blocks: &[MemoryBlock]) -> bool {
    blocks.windows(2).all(|w| !(w[0].is_free() && w[1].is_free()))
}

proptest! {
    #[test]
    fn layout_invariants_hold_after_every_operation(ops in prop::collection::vec(op(), 1..60)) {
        let mut table = RegionTable::new(TOTAL, PAGE).unwrap();

        for op in ops {
            let before = table.snapshot();
            match op {
                Op::Alloc { id, size, placement } => match table.allocate(id, size, placement) {
                    Ok(a) => {
                        let expected = size.div_ceil(PAGE) * PAGE;
                        prop_assert_eq!(a.size, expected);
                        prop_assert_eq!(table.block_of(id), Some(MemoryBlock::owned(a.address, a.size, id)));
                    }
                    Err(MemoryError::DuplicateId(dup)) => {
                        prop_assert_eq!(dup, id);
                        prop_assert_eq!(table.snapshot(), before);
                    }
                    Err(MemoryError::OutOfSpace { requested, .. }) => {
                        // Only impossible requests fail; eviction covers the rest
                        prop_assert!(requested > TOTAL);
                        prop_assert_eq!(table.snapshot(), before);
                    }
                    Err(e) => prop_assert!(false, "unexpected error {:?}", e),
                },
                Op::Free { id } => match table.deallocate(id) {
                    Ok(freed) => {
                        prop_assert_eq!(freed.len(), 1);
                        prop_assert!(no_adjacent_free(table.blocks()));
                    }
                    Err(e) => {
                        prop_assert_eq!(e, MemoryError::NotFound(id));
                        prop_assert_eq!(table.snapshot(), before);
                    }
                },
            }

            prop_assert!(verify_layout(table.blocks(), TOTAL).is_ok());
        }
    }

    #[test]
    fn merge_is_idempotent(ops in prop::collection::vec(op(), 1..40)) {
        let mut table = RegionTable::new(TOTAL, PAGE).unwrap();
        for op in ops {
            match op {
                Op::Alloc { id, size, placement } => { let _ = table.allocate(id, size, placement); }
                Op::Free { id } => { let _ = table.deallocate(id); }
            }
        }

        table.merge();
        let once = table.snapshot();
        prop_assert_eq!(table.merge(), 0);
        prop_assert_eq!(table.snapshot(), once);
    }

    #[test]
    fn first_fit_picks_lowest_fitting_block(ops in prop::collection::vec(op(), 1..40), size in 1usize..600) {
        let mut table = RegionTable::new(TOTAL, PAGE).unwrap();
        for op in ops {
            match op {
                Op::Alloc { id, size, placement } => { let _ = table.allocate(id, size, placement); }
                Op::Free { id } => { let _ = table.deallocate(id); }
            }
        }

        let needed = size.div_ceil(PAGE) * PAGE;
        let expected = table.blocks().iter().position(|b| b.is_free() && b.size >= needed);
        prop_assert_eq!(table.find_fit(Placement::First, needed), expected);
    }

    #[test]
    fn best_fit_picks_smallest_fitting_block(ops in prop::collection::vec(op(), 1..40), size in 1usize..600) {
        let mut table = RegionTable::new(TOTAL, PAGE).unwrap();
        for op in ops {
            match op {
                Op::Alloc { id, size, placement } => { let _ = table.allocate(id, size, placement); }
                Op::Free { id } => { let _ = table.deallocate(id); }
            }
        }

        let needed = size.div_ceil(PAGE) * PAGE;
        match table.find_fit(Placement::Best, needed) {
            Some(index) => {
                let chosen = table.blocks()[index];
                prop_assert!(chosen.is_free() && chosen.size >= needed);
                for (i, b) in table.blocks().iter().enumerate() {
                    if b.is_free() && b.size >= needed {
                        prop_assert!(b.size > chosen.size || (b.size == chosen.size && i >= index));
                    }
                }
            }
            None => {
                prop_assert!(table.blocks().iter().all(|b| !b.is_free() || b.size < needed));
            }
        }
    }

    #[test]
    fn next_fit_resumes_after_previous_placement(
        ops in prop::collection::vec(op(), 1..40),
        a_size in 1usize..300,
        b_size in 1usize..300,
    ) {
        let mut table = RegionTable::new(TOTAL, PAGE).unwrap();
        for op in ops {
            match op {
                Op::Alloc { id, size, placement } => { let _ = table.allocate(id, size, placement); }
                Op::Free { id } => { let _ = table.deallocate(id); }
            }
        }

        // Ids outside the generated range are always fresh
        let Ok(first) = table.allocate(100, a_size, Placement::Next) else {
            return Ok(());
        };
        let first_end = first.address + first.size;
        let needed = b_size.div_ceil(PAGE) * PAGE;
        let fits = |b: &&MemoryBlock| b.is_free() && b.size >= needed;

        // Blocks past the first placement come before any wrap to the front
        let blocks = table.snapshot();
        let expected = blocks
            .iter()
            .filter(|b| b.start >= first_end)
            .find(fits)
            .or_else(|| blocks.iter().find(fits))
            .map(|b| b.start);

        let second = table.allocate(101, b_size, Placement::Next).unwrap();
        match expected {
            Some(address) => {
                prop_assert!(second.evicted.is_empty());
                prop_assert_eq!(second.address, address);
                prop_assert_ne!(second.address, first.address);
            }
            None => prop_assert!(!second.evicted.is_empty()),
        }
    }
}
