//! Canonical combination identity.
//!
//! Reconciliation needs to answer one question: *is this freshly generated
//! combination the same logical variant as this previously stored one?* The
//! ordered form of a combination is unsuitable for that — it exists for
//! display — so matching goes through a canonical key instead.
//!
//! ## What counts as "the same variant"
//!
//! Two combinations have equal keys iff they reference the same *set* of
//! value identities, regardless of the order in which either side stores
//! them. The key is simply the sorted sequence of [`ValueRef`]s; sorting
//! makes the comparison order-independent while keeping the key cheap,
//! hashable and totally ordered.
//!
//! A stored reference whose option or value no longer exists does not need
//! special handling here: it can never equal a key built from the current
//! option set, so the owning variant fails to match and is purged by the
//! reconciler.

use crate::{Combination, ValueRef};

/// Order-independent identity of a combination.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalKey(Vec<ValueRef>);

impl CanonicalKey {
    /// Key a freshly generated combination.
    pub fn of_combination(combination: &Combination) -> Self {
        Self::of_refs(&combination.refs())
    }

    /// Key a stored reference list (a variant's `value_refs`).
    pub fn of_refs(refs: &[ValueRef]) -> Self {
        let mut sorted = refs.to_vec();
        sorted.sort_unstable();
        Self(sorted)
    }
}
