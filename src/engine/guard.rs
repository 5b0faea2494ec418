//! Recompute guard: command queue, fingerprint check, in-flight coalescing.
//!
//! The original problem this solves: option edits arrive from an interactive
//! form, and the variant pipeline must run **at most once per logically
//! distinct edit**, never concurrently with itself, and never in response to
//! its own output. Instead of watching state reactively, edits are explicit
//! commands pushed onto a queue and consumed by a single-threaded reducer,
//! one at a time.
//!
//! ```text
//! submit(Edit) ──▶ queue ──▶ settle()
//!                              │ pop one command
//!                              ├─ feature off/on  -> clear / seed, reset fingerprint
//!                              ├─ option edit     -> apply to the OptionSet
//!                              │    fingerprint unchanged -> skip
//!                              │    some option empty     -> suspended, keep variants
//!                              │    else                  -> generate + reconcile, commit
//!                              └─ next command
//! ```
//!
//! ## The in-flight window
//!
//! While a recompute runs (including the commit observer that renders the new
//! collection), the guard is *in flight*: any edit submitted in that window
//! is dropped rather than queued. A dropped edit loses nothing — whatever
//! state it described is still in the option set, and the next edit after the
//! recompute settles re-checks the latest state via the fingerprint. This is
//! what breaks the self-triggering loop where reacting to the recompute's own
//! output would schedule another recompute forever.
//!
//! ## Fingerprint
//!
//! The fingerprint covers exactly what generation depends on: option names
//! and value strings, in order. Display-order bookkeeping and variant fields
//! are excluded, so editing a price or a stock count never recomputes.
//! Equal fingerprint ⇒ recompute would be a no-op ⇒ skipped.

use super::generation::{Generated, generate};
use super::metrics::{RecomputeMetrics, SettleReport};
use super::reconciliation::reconcile;
use crate::api::Context;
use crate::catalog::BulkOption;
use crate::model::{OptionSet, Variant};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;
use tracing::debug;

/// Summary of the option set restricted to `{name, values[].value}`.
///
/// Built from the debug rendering of the restricted view, which escapes
/// embedded quotes and brackets, so distinct sets cannot collide.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(set: &OptionSet) -> Self {
        let view: Vec<(&str, Vec<&str>)> = set
            .options()
            .iter()
            .map(|o| (o.name.as_str(), o.values.iter().map(|v| v.value.as_str()).collect()))
            .collect();
        Self(format!("{view:?}"))
    }
}

/// One edit command consumed by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// Turn the variation feature on: discard everything, seed one empty
    /// option. Destructive by design.
    EnableFeature,
    /// Turn the variation feature off: discard all options and variants.
    DisableFeature,
    AddOption,
    RemoveOption { option: usize },
    RenameOption { option: usize, name: String },
    AddValue { option: usize, value: String },
    RemoveValue { option: usize, value: usize },
    /// Rename an option and replace its values from a bulk catalog entry.
    AdoptCatalogEntry { option: usize, entry: BulkOption },
}

/// Cloneable handle for pushing edits onto a [`Synchronizer`]'s queue.
///
/// The handle shares the synchronizer's in-flight flag: a submit that lands
/// inside a running recompute is dropped (coalesced), not queued.
#[derive(Clone)]
pub struct EditSender {
    queue: Rc<RefCell<VecDeque<Edit>>>,
    in_flight: Rc<Cell<bool>>,
    dropped: Rc<Cell<usize>>,
}

impl EditSender {
    /// Push an edit; returns `false` if it was dropped because a recompute
    /// was in flight.
    pub fn submit(&self, edit: Edit) -> bool {
        if self.in_flight.get() {
            self.dropped.set(self.dropped.get() + 1);
            debug!(?edit, "recompute in flight, edit dropped");
            return false;
        }
        self.queue.borrow_mut().push_back(edit);
        true
    }
}

/// Owns the option set + variant collection pair and serializes every
/// mutation through its queue.
///
/// Single-threaded and synchronous: all pipeline steps run to completion
/// inside one `settle` call, with no suspension points.
pub struct Synchronizer {
    ctx: Context,
    enabled: bool,
    set: OptionSet,
    variants: Vec<Variant>,
    committed: Fingerprint,
    queue: Rc<RefCell<VecDeque<Edit>>>,
    in_flight: Rc<Cell<bool>>,
    dropped: Rc<Cell<usize>>,
    observer: Option<Box<dyn FnMut(&[Variant])>>,
}

impl std::fmt::Debug for Synchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Synchronizer")
            .field("enabled", &self.enabled)
            .field("options", &self.set.len())
            .field("variants", &self.variants.len())
            .field("queued", &self.queue.borrow().len())
            .finish()
    }
}

impl Synchronizer {
    /// A synchronizer with the variation feature off and nothing queued.
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            enabled: false,
            set: OptionSet::new(),
            variants: Vec::new(),
            committed: Fingerprint::default(),
            queue: Rc::new(RefCell::new(VecDeque::new())),
            in_flight: Rc::new(Cell::new(false)),
            dropped: Rc::new(Cell::new(0)),
            observer: None,
        }
    }

    /// Resume from caller-persisted state, feature on.
    ///
    /// The resumed fingerprint is committed as-is, so settling without edits
    /// changes nothing even if the persisted pair is out of sync; the first
    /// real edit reconciles it.
    pub fn resume(ctx: Context, set: OptionSet, variants: Vec<Variant>) -> Self {
        let committed = Fingerprint::of(&set);
        Self { enabled: true, set, variants, committed, ..Self::new(ctx) }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn options(&self) -> &OptionSet {
        &self.set
    }

    /// The reconciled variant collection, in generator order.
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Mutable access to one variant record for user edits (price, stock,
    /// sku, active flag). These fields are outside the fingerprint, so no
    /// recompute follows.
    pub fn variant_mut(&mut self, index: usize) -> Option<&mut Variant> {
        self.variants.get_mut(index)
    }

    /// Handle for submitting edits from collaborators (form bindings, the
    /// commit observer).
    pub fn sender(&self) -> EditSender {
        EditSender {
            queue: Rc::clone(&self.queue),
            in_flight: Rc::clone(&self.in_flight),
            dropped: Rc::clone(&self.dropped),
        }
    }

    /// Push an edit onto the queue. Same semantics as [`EditSender::submit`].
    pub fn submit(&mut self, edit: Edit) -> bool {
        self.sender().submit(edit)
    }

    /// Register the collaborator notified after each committed recompute
    /// (the table renderer). Runs inside the in-flight window: edits it
    /// submits are dropped.
    pub fn observe(&mut self, observer: impl FnMut(&[Variant]) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Consume the queue, one command at a time.
    pub fn settle(&mut self) -> SettleReport {
        let mut report = SettleReport::default();
        loop {
            let Some(edit) = self.queue.borrow_mut().pop_front() else { break };
            report.processed += 1;
            self.step(edit, &mut report);
        }
        report.coalesced = self.dropped.replace(0);
        report
    }

    fn step(&mut self, edit: Edit, report: &mut SettleReport) {
        let applied = match edit {
            Edit::DisableFeature => {
                if self.enabled {
                    self.enabled = false;
                    self.set = OptionSet::new();
                    self.variants.clear();
                    self.committed = Fingerprint::default();
                    debug!("variation feature disabled, options and variants cleared");
                }
                return;
            }
            Edit::EnableFeature => {
                if self.enabled {
                    debug!("variation feature already enabled");
                    return;
                }
                self.enabled = true;
                self.set = OptionSet::seeded();
                self.variants.clear();
                self.committed = Fingerprint::of(&self.set);
                debug!("variation feature enabled, seeded one empty option");
                return;
            }
            edit if !self.enabled => {
                report.ignored += 1;
                debug!(?edit, "variation feature off, option edit ignored");
                return;
            }
            Edit::AddOption => {
                self.set.add_option();
                Ok(())
            }
            Edit::RemoveOption { option } => self.set.remove_option(option),
            Edit::RenameOption { option, name } => self.set.rename_option(option, name),
            Edit::AddValue { option, value } => self.set.add_value(option, value).map(|_| ()),
            Edit::RemoveValue { option, value } => self.set.remove_value(option, value),
            Edit::AdoptCatalogEntry { option, entry } => self.set.adopt_catalog_entry(option, &entry),
        };
        if let Err(err) = applied {
            report.errors.push(err);
            debug!(%err, "edit rejected");
            return;
        }
        self.recompute_if_changed(report);
    }

    /// The guard proper: fingerprint check, then the pipeline.
    fn recompute_if_changed(&mut self, report: &mut SettleReport) {
        let fingerprint = Fingerprint::of(&self.set);
        if fingerprint == self.committed {
            report.skipped_unchanged += 1;
            debug!("fingerprint unchanged, recompute skipped");
            return;
        }

        let started = Instant::now();
        let generated = generate(self.set.options());
        let generate_elapsed = started.elapsed();

        let combinations = match generated {
            Generated::Suspended => {
                // Some option has no values yet: keep the previous variants
                // and do not commit, so completing the set always recomputes.
                report.suspended += 1;
                debug!("generation suspended, variants preserved");
                return;
            }
            Generated::Empty => Vec::new(),
            Generated::Combinations(combinations) => combinations,
        };

        self.in_flight.set(true);
        let reconcile_started = Instant::now();
        let (variants, stats) = reconcile(&self.variants, &combinations, &self.ctx);
        let reconcile_elapsed = reconcile_started.elapsed();

        self.variants = variants;
        self.committed = fingerprint;
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.variants);
        }
        self.in_flight.set(false);

        report.recomputed += 1;
        report.recomputes.push(RecomputeMetrics {
            total: started.elapsed(),
            generate: generate_elapsed,
            reconcile: reconcile_elapsed,
            combinations: combinations.len(),
            stats,
        });
        debug!(
            combinations = combinations.len(),
            carried = stats.carried,
            created = stats.created,
            dropped = stats.dropped,
            "recompute committed"
        );
    }
}
