//! Recompute observability.
//!
//! The reducer settles a whole queue of commands in one call, and most of
//! them are expected to be cheap no-ops (fingerprint unchanged, suspended,
//! ignored). These structs let a caller see what actually happened without
//! instrumenting the engine itself:
//!
//! - `SettleReport` summarizes one [`Synchronizer::settle`] call.
//! - `RecomputeMetrics` times each pipeline run inside it.
//! - `ReconcileStats` counts how the variant collection changed.
//!
//! Collection is intentionally cheap and always on: counting and two
//! `Instant` reads per recompute, no node lists, no allocation beyond the
//! per-recompute entries in the report.
//!
//! [`Synchronizer::settle`]: super::Synchronizer::settle

use crate::model::EditError;
use std::time::Duration;

/// How one reconciliation changed the variant collection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Previous variants matched by canonical key and carried forward.
    pub carried: usize,
    /// Combinations with no match, synthesized fresh.
    pub created: usize,
    /// Previous variants whose key no longer exists.
    pub dropped: usize,
}

/// Timing and counts for a single Generate → Reconcile run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecomputeMetrics {
    /// Elapsed time for the whole pipeline run.
    pub total: Duration,
    /// Time spent expanding combinations.
    pub generate: Duration,
    /// Time spent matching and synthesizing.
    pub reconcile: Duration,
    /// Number of combinations produced by the generator.
    pub combinations: usize,
    pub stats: ReconcileStats,
}

/// Summary of one `settle` call.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SettleReport {
    /// Commands popped off the queue.
    pub processed: usize,
    /// Commands that ran the full pipeline.
    pub recomputed: usize,
    /// Commands skipped because the fingerprint did not change.
    pub skipped_unchanged: usize,
    /// Commands that left generation suspended (some option empty).
    pub suspended: usize,
    /// Option edits ignored because the variation feature is off.
    pub ignored: usize,
    /// Edits dropped because they arrived while a recompute was in flight.
    pub coalesced: usize,
    /// Edits that referenced a nonexistent option or value.
    pub errors: Vec<EditError>,
    /// One entry per pipeline run, in execution order.
    pub recomputes: Vec<RecomputeMetrics>,
}

impl SettleReport {
    /// Total variants created and dropped across the whole settle call.
    pub fn churn(&self) -> (usize, usize) {
        self.recomputes.iter().fold((0, 0), |(c, d), m| (c + m.stats.created, d + m.stats.dropped))
    }
}
