//! Reorder resolver.
//!
//! Turns a drop gesture into the data-only mutation plan: the two endpoint
//! records with their positions exchanged. This is a swap, not an insertion
//! shift — records between the endpoints keep their positions, so a reorder
//! is always exactly two updates on the wire.

use crate::record::OrderedRecord;

/// The two record updates realizing one reorder.
///
/// Data only. Nothing touches the store until the plan is handed to
/// [`SyncController::apply`](crate::sync::SyncController::apply). The
/// positions are absolute, so re-applying a plan that already converged
/// writes the same values again instead of swapping back.
#[derive(Clone, Debug, PartialEq)]
pub struct SwapPlan<R> {
    /// The dragged record, now carrying the target's position.
    pub moved: R,
    /// The record it displaced, now carrying the dragged record's position.
    pub displaced: R,
}

/// Compute the swap plan for dropping `source` onto `target` within
/// `order`, the currently displayed order.
///
/// Returns `None` when the indices are equal, either index is out of
/// range, or the origin could not be determined through either gesture
/// channel (`source` is `None`). All of these are benign no-ops, not
/// errors.
pub fn resolve<R: OrderedRecord>(
    source: Option<usize>,
    target: usize,
    order: &[R],
) -> Option<SwapPlan<R>> {
    let source = source?;
    if source == target || source >= order.len() || target >= order.len() {
        return None;
    }

    let mut moved = order[source].clone();
    let mut displaced = order[target].clone();
    let from = moved.position();
    moved.set_position(displaced.position());
    displaced.set_position(from);
    Some(SwapPlan { moved, displaced })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{card, deck, Card};

    #[test]
    fn swaps_the_two_endpoint_positions() {
        let order = deck(3);
        let plan = resolve(Some(0), 2, &order).expect("valid drop");

        assert_eq!(plan.moved.id, "alpine");
        assert_eq!(plan.moved.position, 2);
        assert_eq!(plan.displaced.id, "desert");
        assert_eq!(plan.displaced.position, 0);
    }

    #[test]
    fn domain_fields_ride_through_unmodified() {
        let order = deck(2);
        let plan = resolve(Some(1), 0, &order).expect("valid drop");
        assert_eq!(plan.moved.label, order[1].label);
        assert_eq!(plan.displaced.label, order[0].label);
    }

    #[test]
    fn works_with_sparse_positions() {
        let order = vec![card(0, 10), card(1, 25), card(2, 90)];
        let plan = resolve(Some(2), 0, &order).expect("valid drop");
        assert_eq!(plan.moved.position, 10);
        assert_eq!(plan.displaced.position, 90);
    }

    #[test]
    fn same_index_is_a_noop() {
        let order = deck(3);
        assert!(resolve(Some(1), 1, &order).is_none());
    }

    #[test]
    fn out_of_range_indices_are_noops() {
        let order = deck(3);
        assert!(resolve(Some(3), 0, &order).is_none());
        assert!(resolve(Some(0), 3, &order).is_none());
        assert!(resolve(Some(7), 9, &order).is_none());
    }

    #[test]
    fn unknown_origin_is_a_noop() {
        let order = deck(3);
        assert!(resolve(None, 1, &order).is_none());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_plan_holds_exactly_the_two_original_positions_swapped(
                len in 2usize..12,
                source_seed in 0usize..64,
                target_seed in 0usize..64,
                base in -50i32..50,
                stride in 1i32..7,
            ) {
                let order: Vec<Card> = (0..len)
                    .map(|i| card(i, base + stride * i as i32))
                    .collect();
                let source = source_seed % len;
                let target = target_seed % len;

                match resolve(Some(source), target, &order) {
                    Some(plan) => {
                        prop_assert_ne!(source, target);
                        prop_assert_eq!(plan.moved.id, order[source].id);
                        prop_assert_eq!(plan.displaced.id, order[target].id);
                        prop_assert_eq!(plan.moved.position, order[target].position);
                        prop_assert_eq!(plan.displaced.position, order[source].position);
                    }
                    None => prop_assert_eq!(source, target),
                }
            }

            #[test]
            fn prop_records_between_the_endpoints_are_untouched(
                len in 3usize..12,
                source_seed in 0usize..64,
                target_seed in 0usize..64,
            ) {
                let order: Vec<Card> = deck(len);
                let source = source_seed % len;
                let target = target_seed % len;

                if let Some(plan) = resolve(Some(source), target, &order) {
                    // The plan names only the endpoints; everything else is
                    // absent from it by construction.
                    for (i, record) in order.iter().enumerate() {
                        if i != source && i != target {
                            prop_assert_ne!(record.id, plan.moved.id);
                            prop_assert_ne!(record.id, plan.displaced.id);
                        }
                    }
                }
            }
        }
    }
}
