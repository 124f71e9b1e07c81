//! Property-based tests for the pack solver.
//!
//! Results are checked against an independent oracle that explores totals
//! breadth-first by number of packs:
//!
//! 1. **At least**: total >= quantity
//! 2. **Sum**: total == sum of size * count
//! 3. **Smallest total**: no reachable total lies in [quantity, total)
//! 4. **Fewest packs**: no combination reaching total uses fewer packs
//! 5. **Shape**: entries are descending, distinct, drawn from the set, count > 0

use proptest::prelude::*;

use packwise::{
    packs::PackSizes,
    solvers::{Solver, dp::DPSolver},
};

/// Fewest packs summing exactly to each total in `0..=ceiling`, found by
/// expanding one pack at a time.
fn oracle(sizes: &[u64], ceiling: u64) -> Vec<Option<u64>> {
    let mut fewest = vec![None; ceiling as usize + 1];
    let mut frontier = vec![0_u64];

    fewest[0] = Some(0);

    let mut packs = 0;

    while !frontier.is_empty() {
        packs += 1;

        let mut next = Vec::new();

        for total in frontier {
            for &size in sizes {
                let reached = total + size;

                if reached <= ceiling && fewest[reached as usize].is_none() {
                    fewest[reached as usize] = Some(packs);
                    next.push(reached);
                }
            }
        }

        frontier = next;
    }

    fewest
}

fn arb_sizes() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(1_i64..=60, 1..=4)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn result_is_optimal(sizes in arb_sizes(), quantity in 1_i64..=400) {
        let sizes = PackSizes::new(sizes)?;
        let result = DPSolver::default().solve(quantity, &sizes)?;

        let requested = u64::try_from(quantity)?;
        let ceiling = requested + sizes.largest() - 1;
        let fewest = oracle(sizes.as_slice(), ceiling);

        prop_assert!(result.total >= requested, "shipped less than requested");

        let sum: u64 = result.packs.iter().map(|pack| pack.size * pack.count).sum();
        prop_assert_eq!(sum, result.total, "total must equal the sum of packs");

        for total in requested..result.total {
            prop_assert!(
                fewest[total as usize].is_none(),
                "reachable total {} is smaller than {}",
                total,
                result.total
            );
        }

        prop_assert_eq!(
            Some(result.pack_count()),
            fewest[result.total as usize],
            "pack count is not minimal for total {}",
            result.total
        );
    }

    #[test]
    fn result_shape_is_canonical(sizes in arb_sizes(), quantity in 1_i64..=400) {
        let sizes = PackSizes::new(sizes)?;
        let result = DPSolver::default().solve(quantity, &sizes)?;

        prop_assert!(result.packs.iter().all(|pack| pack.count > 0));
        prop_assert!(result.packs.iter().all(|pack| sizes.as_slice().contains(&pack.size)));
        prop_assert!(
            result.packs.windows(2).all(|pair| pair[0].size > pair[1].size),
            "entries must be strictly descending by size"
        );
    }

    #[test]
    fn non_positive_quantity_is_empty(sizes in arb_sizes(), quantity in -1_000_i64..=0) {
        let sizes = PackSizes::new(sizes)?;
        let result = DPSolver::default().solve(quantity, &sizes)?;

        prop_assert_eq!(result.requested, quantity);
        prop_assert_eq!(result.total, 0);
        prop_assert!(result.packs.is_empty());
    }

    #[test]
    fn solving_is_deterministic(sizes in arb_sizes(), quantity in 1_i64..=400) {
        let sizes = PackSizes::new(sizes)?;
        let solver = DPSolver::default();

        prop_assert_eq!(solver.solve(quantity, &sizes)?, solver.solve(quantity, &sizes)?);
    }
}
