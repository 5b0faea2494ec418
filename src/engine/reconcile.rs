//! Variant reconciliation: diff + merge against the previous collection.
//!
//! Every recompute regenerates the full combination list, but the variant
//! records themselves are user-owned once created. Reconciliation is the step
//! that keeps those two facts compatible:
//!
//! ```text
//! previous variants ──┐
//!                     ├─ match by CanonicalKey
//! new combinations ───┘
//!        │
//!        ├─ matched   -> carry forward verbatim, re-tag value_refs
//!        ├─ unmatched -> synthesize sku/title, base price, zero stock
//!        └─ leftover  -> dropped (no soft-delete, no recovery)
//! ```
//!
//! Output follows generator order, so the variant table's ordering is stable
//! and deterministic regardless of how the previous collection was ordered.
//!
//! Previous variants with stale references (an option or value that no longer
//! exists) need no special casing: their keys simply match nothing and they
//! fall out with the other leftovers.

use super::keys::CanonicalKey;
use super::metrics::ReconcileStats;
use super::synthesize;
use crate::Combination;
use crate::api::Context;
use crate::model::Variant;
use std::collections::HashMap;
use tracing::trace;

/// Merge `previous` into the freshly generated `combinations`.
///
/// Matched variants keep `sku`, `price`, `stock`, `is_active` and `title`
/// untouched; only their `value_refs` are re-tagged with the current
/// combination's ordering. Unmatched combinations become new variants priced
/// at `ctx.base_price` with zero stock, active by default.
pub fn reconcile(
    previous: &[Variant],
    combinations: &[Combination],
    ctx: &Context,
) -> (Vec<Variant>, ReconcileStats) {
    let mut prior: HashMap<CanonicalKey, &Variant> =
        previous.iter().map(|v| (CanonicalKey::of_refs(&v.value_refs), v)).collect();

    let mut out = Vec::with_capacity(combinations.len());
    let mut stats = ReconcileStats::default();

    for combination in combinations {
        let key = CanonicalKey::of_combination(combination);
        match prior.remove(&key) {
            Some(matched) => {
                let mut carried = matched.clone();
                carried.value_refs = combination.refs();
                out.push(carried);
                stats.carried += 1;
            }
            None => {
                out.push(Variant {
                    sku: synthesize::sku(ctx.base_code.as_deref(), combination),
                    price: ctx.base_price,
                    stock: 0,
                    is_active: true,
                    title: synthesize::title(combination),
                    value_refs: combination.refs(),
                });
                stats.created += 1;
            }
        }
    }

    stats.dropped = prior.len();
    trace!(carried = stats.carried, created = stats.created, dropped = stats.dropped, "reconciled");
    (out, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Generated, generate};
    use crate::OptionSet;

    fn ctx() -> Context {
        Context { base_code: Some("ABC".into()), base_price: 10.0 }
    }

    fn combos(set: &OptionSet) -> Vec<Combination> {
        match generate(set.options()) {
            Generated::Combinations(combos) => combos,
            other => panic!("expected combinations, got {other:?}"),
        }
    }

    #[test]
    fn synthesizes_from_scratch() {
        let set = crate::options! { "Color" => ["Red", "Blue"] };
        let (variants, stats) = reconcile(&[], &combos(&set), &ctx());
        assert_eq!(stats, ReconcileStats { carried: 0, created: 2, dropped: 0 });
        assert_eq!(variants[0].sku, "ABC-RED");
        assert_eq!(variants[0].title, "Red");
        assert_eq!(variants[0].price, 10.0);
        assert_eq!(variants[0].stock, 0);
        assert!(variants[0].is_active);
        assert_eq!(variants[1].sku, "ABC-BLUE");
    }

    #[test]
    fn carries_user_edits_verbatim() {
        let mut set = crate::options! { "Color" => ["Red", "Blue"] };
        let (mut variants, _) = reconcile(&[], &combos(&set), &ctx());
        variants[0].price = 9.99;
        variants[0].stock = 5;
        variants[0].sku = "CUSTOM".into();
        variants[0].is_active = false;

        set.add_value(0, "Green").unwrap();
        let (next, stats) = reconcile(&variants, &combos(&set), &ctx());
        assert_eq!(stats, ReconcileStats { carried: 2, created: 1, dropped: 0 });
        assert_eq!(next.len(), 3);
        assert_eq!(next[0].price, 9.99);
        assert_eq!(next[0].stock, 5);
        assert_eq!(next[0].sku, "CUSTOM");
        assert!(!next[0].is_active);
        assert_eq!(next[1], variants[1]); // Blue untouched
        assert_eq!(next[2].sku, "ABC-GRE");
        assert_eq!(next[2].price, 10.0);
    }

    #[test]
    fn drops_variants_whose_key_disappeared() {
        let mut set = crate::options! { "Color" => ["Red", "Blue"] };
        let (variants, _) = reconcile(&[], &combos(&set), &ctx());
        set.remove_value(0, 0).unwrap(); // Red goes away
        let (next, stats) = reconcile(&variants, &combos(&set), &ctx());
        assert_eq!(stats, ReconcileStats { carried: 1, created: 0, dropped: 1 });
        assert_eq!(next.len(), 1);
        assert_eq!(next[0], variants[1]);
    }

    #[test]
    fn stale_references_are_purged_not_errors() {
        let set = crate::options! { "Color" => ["Red"] };
        let ghost = Variant {
            sku: "GHOST".into(),
            price: 1.0,
            stock: 1,
            is_active: true,
            title: "Ghost".into(),
            value_refs: vec![crate::ValueRef { option: 7, slot: 42 }],
        };
        let (next, stats) = reconcile(&[ghost], &combos(&set), &ctx());
        assert_eq!(stats.dropped, 1);
        assert!(next.iter().all(|v| v.sku != "GHOST"));
    }

    #[test]
    fn reconcile_is_idempotent() {
        let set = crate::options! {
            "Color" => ["Red", "Blue"],
            "Size"  => ["S", "M"],
        };
        let (first, _) = reconcile(&[], &combos(&set), &ctx());
        let (second, stats) = reconcile(&first, &combos(&set), &ctx());
        assert_eq!(first, second);
        assert_eq!(stats, ReconcileStats { carried: 4, created: 0, dropped: 0 });
    }
}
