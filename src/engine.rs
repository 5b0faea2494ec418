//! Variant synchronization engine.
//!
//! This module is the entry point for everything that happens *between* an
//! edit to the option set and the variant collection the caller renders and
//! eventually persists. It is split into focused submodules under
//! `src/engine/` while keeping public paths stable (for example
//! `crate::engine::Synchronizer` and `crate::engine::CanonicalKey`).
//!
//! ## How the parts work together
//!
//! At a high level, every accepted edit flows through one pipeline:
//!
//! ```text
//! Edit ──▶ Synchronizer::settle            (guard.rs)
//!            - pop one command at a time
//!            - apply it to the OptionSet
//!            - fingerprint {name, values[].value}
//!            - unchanged?   -> skip
//!            - in flight?   -> drop (coalesced)
//!                  │
//!                  v
//!          generate(options)               (generate.rs)
//!            - cartesian expansion, first option slowest
//!            - Empty / Suspended short-circuits
//!                  │
//!                  v
//!          reconcile(prev, combos, ctx)    (reconcile.rs)
//!            - match by CanonicalKey       (keys.rs)
//!            - carry matched variants verbatim
//!            - synthesize sku/title        (synthesize.rs)
//!            - drop the rest
//!                  │
//!                  v
//!          commit variants + fingerprint
//! ```
//!
//! The pipeline is pure and total over well-formed option sets: it raises no
//! errors, always terminates (bounded by the product of value counts), and
//! yields byte-identical output for identical input.
//!
//! ## Responsibilities by module
//!
//! - `generate.rs`: the cartesian combination generator.
//! - `keys.rs`: canonical, order-independent combination identity.
//! - `reconcile.rs`: diff/merge of generated combinations against the
//!   previous variant collection.
//! - `synthesize.rs`: deterministic sku/title naming for new variants.
//! - `guard.rs`: the command queue, fingerprint check and in-flight guard
//!   that keep recomputation idempotent and loop-free.
//! - `metrics.rs`: per-recompute timing and reconcile counts.

#[path = "engine/generate.rs"]
mod generation;
#[path = "engine/guard.rs"]
mod guard;
#[path = "engine/keys.rs"]
mod keys;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/reconcile.rs"]
mod reconciliation;
#[path = "engine/synthesize.rs"]
mod synthesize;

pub use generation::{Generated, generate};
pub use guard::{Edit, EditSender, Fingerprint, Synchronizer};
pub use keys::CanonicalKey;
pub use metrics::{RecomputeMetrics, ReconcileStats, SettleReport};
pub use reconciliation::reconcile;
pub use synthesize::{DEFAULT_BASE_CODE, sku, title};
