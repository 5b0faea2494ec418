use crate::engine::{Generated, Synchronizer, generate, reconcile};
use crate::model::{OptionSet, Variant, VariationOption};
use serde::Serialize;
use thiserror::Error;

/// Read-only fields of the owning product, consumed by synthesis defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    /// Product code used as the sku base; `None` falls back to `"PROD"`.
    pub base_code: Option<String>,
    /// Default price for newly synthesized variants.
    pub base_price: f64,
}

/// One-shot derivation: expand `set` and synthesize every variant fresh.
///
/// Equivalent to reconciling against an empty previous collection. Returns an
/// empty list when the set is empty or generation is suspended; use a
/// [`Synchronizer`](crate::Synchronizer) when previous user edits must
/// survive.
///
/// ```
/// use optweave::{Context, derive_variants};
///
/// let set = optweave::options! { "Color" => ["Red", "Blue"] };
/// let ctx = Context { base_code: Some("ABC".into()), base_price: 10.0 };
/// let variants = derive_variants(&set, &ctx);
/// assert_eq!(variants[0].sku, "ABC-RED");
/// assert_eq!(variants[1].title, "Blue");
/// ```
pub fn derive_variants(set: &OptionSet, ctx: &Context) -> Vec<Variant> {
    match generate(set.options()) {
        Generated::Combinations(combinations) => reconcile(&[], &combinations, ctx).0,
        Generated::Empty | Generated::Suspended => Vec::new(),
    }
}

bitflags::bitflags! {
    /// What is missing from a submission attempt.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SubmitProblems: u32 {
        /// Variation feature on but the option list is empty.
        const NO_OPTIONS        = 1 << 0;
        /// Variation feature on but the variant list is empty.
        const NO_VARIANTS       = 1 << 1;
        /// Variants exist but none has a sku and value references.
        const NOTHING_SELLABLE  = 1 << 2;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("variations are enabled but the product is incomplete: {0:?}")]
    Incomplete(SubmitProblems),
}

/// The variation part of the product save body.
///
/// Variants are pre-filtered to those worth persisting: non-empty sku and
/// non-empty value references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitPayload {
    pub options: Vec<VariationOption>,
    pub variants: Vec<Variant>,
}

/// Validate and assemble the submission payload for the current state.
///
/// With the feature off this succeeds with an empty payload; with it on, an
/// empty option list or variant list blocks submission.
pub fn submit_payload(sync: &Synchronizer) -> Result<SubmitPayload, SubmitError> {
    if !sync.is_enabled() {
        return Ok(SubmitPayload { options: Vec::new(), variants: Vec::new() });
    }

    let mut problems = SubmitProblems::empty();
    if sync.options().is_empty() {
        problems |= SubmitProblems::NO_OPTIONS;
    }
    if sync.variants().is_empty() {
        problems |= SubmitProblems::NO_VARIANTS;
    }

    let sellable: Vec<Variant> = sync
        .variants()
        .iter()
        .filter(|v| !v.sku.trim().is_empty() && !v.value_refs.is_empty())
        .cloned()
        .collect();
    if !sync.variants().is_empty() && sellable.is_empty() {
        problems |= SubmitProblems::NOTHING_SELLABLE;
    }

    if !problems.is_empty() {
        return Err(SubmitError::Incomplete(problems));
    }
    Ok(SubmitPayload { options: sync.options().options().to_vec(), variants: sellable })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Edit;

    fn ctx() -> Context {
        Context { base_code: Some("ABC".into()), base_price: 10.0 }
    }

    fn sync_with_colors() -> Synchronizer {
        let mut sync = Synchronizer::new(ctx());
        sync.submit(Edit::EnableFeature);
        sync.submit(Edit::RenameOption { option: 0, name: "Color".into() });
        sync.submit(Edit::AddValue { option: 0, value: "Red".into() });
        sync.submit(Edit::AddValue { option: 0, value: "Blue".into() });
        sync.settle();
        sync
    }

    #[test]
    fn payload_contains_options_and_sellable_variants() {
        let sync = sync_with_colors();
        let payload = submit_payload(&sync).unwrap();
        assert_eq!(payload.options.len(), 1);
        assert_eq!(payload.variants.len(), 2);
    }

    #[test]
    fn variants_without_sku_are_filtered_out() {
        let mut sync = sync_with_colors();
        sync.variant_mut(0).unwrap().sku.clear();
        let payload = submit_payload(&sync).unwrap();
        assert_eq!(payload.variants.len(), 1);
        assert_eq!(payload.variants[0].title, "Blue");
    }

    #[test]
    fn enabled_but_empty_is_rejected() {
        let mut sync = Synchronizer::new(ctx());
        sync.submit(Edit::EnableFeature);
        sync.submit(Edit::RemoveOption { option: 0 });
        sync.settle();
        let err = submit_payload(&sync).unwrap_err();
        let SubmitError::Incomplete(problems) = err;
        assert!(problems.contains(SubmitProblems::NO_OPTIONS));
        assert!(problems.contains(SubmitProblems::NO_VARIANTS));
    }

    #[test]
    fn all_skus_blank_is_rejected() {
        let mut sync = sync_with_colors();
        sync.variant_mut(0).unwrap().sku.clear();
        sync.variant_mut(1).unwrap().sku = "  ".into();
        let err = submit_payload(&sync).unwrap_err();
        assert_eq!(err, SubmitError::Incomplete(SubmitProblems::NOTHING_SELLABLE));
    }

    #[test]
    fn disabled_feature_submits_an_empty_payload() {
        let sync = Synchronizer::new(ctx());
        let payload = submit_payload(&sync).unwrap();
        assert!(payload.options.is_empty());
        assert!(payload.variants.is_empty());
    }
}
