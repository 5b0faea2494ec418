extern crate self as optweave;

use serde::{Deserialize, Serialize};

#[macro_use]
mod macros;
mod api;
mod catalog;
mod engine;
mod model;

pub use api::{Context, SubmitError, SubmitPayload, SubmitProblems, derive_variants, submit_payload};
pub use catalog::{BulkOption, BulkOptionSource, BuiltinCatalog, builtin_catalog};
pub use engine::{
    CanonicalKey, DEFAULT_BASE_CODE, Edit, EditSender, Fingerprint, Generated, RecomputeMetrics, ReconcileStats,
    SettleReport, Synchronizer, generate, reconcile, sku, title,
};
pub use model::{EditError, OptionSet, OptionValue, Variant, VariationOption};

// --- Core reference types ----------------------------------------------------

/// Reference to one concrete value inside the option set.
///
/// The `option` coordinate is the option's position in the set at generation
/// time: reordering options changes it, and every variant keyed through it
/// goes stale. The `slot` coordinate is assigned once when a value is inserted
/// into its option and is never reused, so removing a sibling value cannot
/// re-associate this reference with a different value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ValueRef {
    /// Index of the owning option, in option-declaration order.
    pub option: usize,
    /// Insertion slot of the value within that option.
    pub slot: u32,
}

/// One selected value of a combination: the reference plus its display text.
///
/// The text is captured at generation time so downstream naming does not need
/// to look back into the option set.
#[derive(Debug, Clone, PartialEq)]
pub struct Pick {
    pub value_ref: ValueRef,
    pub text: String,
}

/// One selection of exactly one value per option, in option-declaration order.
///
/// Combinations are intermediate products of [`generate`]; they are never
/// persisted. Identity for matching purposes is the order-independent
/// [`CanonicalKey`], not this ordered form.
#[derive(Debug, Clone, PartialEq)]
pub struct Combination {
    pub picks: Vec<Pick>,
}

impl Combination {
    /// The ordered value references, one per option.
    pub fn refs(&self) -> Vec<ValueRef> {
        self.picks.iter().map(|p| p.value_ref).collect()
    }
}
