//! The pack selector: bounded dynamic programming over shippable totals.
//!
//! A greedy "largest pack first, top the remainder up with the smallest"
//! strategy only yields minimal overage when every pack size divides the
//! next larger one. For arbitrary catalogs the optimal total has to be
//! searched: it lies in `[quantity, quantity + largest)`, since shipping
//! `⌈quantity / largest⌉` copies of the largest pack always lands in that
//! window.

use crate::entities::{Catalog, PackAssignment, PackSize};
use crate::util::assertions;
use log::debug;

/// Sentinel for totals that no combination of packs reaches exactly.
const UNREACHABLE: u64 = u64::MAX;

/// Selects the packs to ship for an order of `quantity` items.
///
/// The result minimizes, in order of priority: (1) total items shipped,
/// subject to covering the order, then (2) total number of packs. Among
/// assignments tied on both, larger packs are preferred (deterministic).
///
/// An empty catalog yields an empty assignment for any quantity: no packs
/// exist to ship. This is a valid outcome, not a failure. `quantity == 0`
/// also yields the empty assignment.
///
/// Orders within one largest pack of `u64::MAX` are covered with largest
/// packs alone: the search window over totals cannot be represented there,
/// so mixed-size overage minimization does not apply at that scale.
pub fn select(catalog: &Catalog, quantity: u64) -> PackAssignment {
    let Some(largest) = catalog.largest() else {
        return PackAssignment::new();
    };
    if quantity == 0 {
        return PackAssignment::new();
    }

    // For very large orders, prepay largest packs so the DP table stays
    // bounded by the catalog, not the order.
    let (window_qty, prepaid) = reduce_quantity(quantity, largest);

    // When the reduction fires the window top is bounded by largest² + 2·largest,
    // which always fits; only an unreduced quantity near u64::MAX can overflow.
    let mut assignment = match window_qty.checked_add(largest - 1) {
        Some(window_top) => solve_windowed(catalog, window_qty, window_top),
        None => largest_pack_cover(window_qty, largest),
    };
    assignment.add(largest, prepaid);

    debug!(
        "selected {} packs totalling {} items for an order of {}",
        assignment.total_packs(),
        assignment.total_items(),
        quantity
    );
    debug_assert!(assertions::assignment_is_valid(
        catalog,
        quantity,
        &assignment
    ));

    assignment
}

/// Shrinks the order to at most `largest² + largest` items by committing to
/// `prepaid` copies of the largest pack upfront. Returns the remaining
/// quantity and the prepaid count.
///
/// Any count-minimal combination contains fewer than `largest` packs of
/// smaller sizes: among `largest` such packs, some contiguous run sums to a
/// positive multiple of `largest` and can be swapped for fewer largest packs.
/// The smaller packs therefore contribute less than `largest²` items, so
/// every optimal solution above the threshold contains a largest pack that
/// can be split off. Both minimality criteria survive the reduction.
fn reduce_quantity(quantity: u64, largest: PackSize) -> (u64, u64) {
    let threshold = match largest.checked_mul(largest) {
        Some(t) => t,
        // largest² overflows u64, so quantity < largest² and no reduction applies
        None => return (quantity, 0),
    };
    if quantity <= threshold.saturating_add(largest) {
        return (quantity, 0);
    }
    let prepaid = (quantity - threshold) / largest;
    (quantity - prepaid * largest, prepaid)
}

/// Covers the order with largest packs alone: `⌈quantity / largest⌉` of
/// them. Reserved for orders so close to `u64::MAX` that no DP window over
/// totals can be represented.
fn largest_pack_cover(quantity: u64, largest: PackSize) -> PackAssignment {
    let mut assignment = PackAssignment::new();
    assignment.add(largest, quantity.div_ceil(largest));
    assignment
}

/// Coin-change style DP over exact totals `0..=window_top` where
/// `window_top = quantity + largest - 1`: `dp[s]` is the minimum number of
/// packs summing to exactly `s`. The shipped total is the smallest
/// reachable `s >= quantity`.
fn solve_windowed(catalog: &Catalog, quantity: u64, window_top: u64) -> PackAssignment {
    let sizes = catalog.sizes();
    let hi = window_top as usize;

    let mut dp = vec![UNREACHABLE; hi + 1];
    dp[0] = 0;
    for s in 1..=hi {
        for &size in sizes {
            let size = size as usize;
            if size <= s && dp[s - size] != UNREACHABLE {
                dp[s] = dp[s].min(dp[s - size] + 1);
            }
        }
    }

    let total = (quantity as usize..=hi)
        .find(|&s| dp[s] != UNREACHABLE)
        .expect("ceil(quantity / largest) largest packs always reach the window");

    reconstruct(sizes, &dp, total)
}

/// Walks an optimal path back from `total`, consuming the largest pack that
/// still lies on one at every step. Sizes are iterated in descending order,
/// which makes the tie-break among equal-count solutions deterministic.
fn reconstruct(sizes: &[PackSize], dp: &[u64], total: usize) -> PackAssignment {
    let mut assignment = PackAssignment::new();
    let mut s = total;
    while s > 0 {
        let size = sizes
            .iter()
            .copied()
            .find(|&size| {
                let size = size as usize;
                size <= s && dp[s - size] == dp[s] - 1
            })
            .expect("a reachable total always has an optimal predecessor");
        assignment.add(size, 1);
        s -= size as usize;
    }
    assignment
}
