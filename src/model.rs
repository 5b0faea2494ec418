//! Variation option model.
//!
//! This module holds the user-edited side of the engine: a set of named
//! options ("Color", "Size"), each with an ordered list of distinct values,
//! plus the persisted per-combination record ([`Variant`]).
//!
//! The model is deliberately inert: every operation here only mutates the
//! option set and reports what happened. Deciding *when* to regenerate the
//! variant collection is the reducer's job (see `engine/guard.rs`); the model
//! never recomputes anything on its own.
//!
//! ## Reference identity
//!
//! Each value is tagged with an insertion `slot` that is unique within its
//! option for the lifetime of that option. Slots are never renumbered and
//! never reused: removing `Red` and then adding `Green` gives `Green` a fresh
//! slot, so a stored variant reference to the old `Red` can only ever go
//! stale, never silently point at `Green`. The option coordinate of a
//! [`ValueRef`](crate::ValueRef) stays positional (see `lib.rs`).

use crate::ValueRef;
use crate::catalog::BulkOption;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Edit against an option or value index that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("option index {0} out of range")]
    OptionIndex(usize),
    #[error("value index {1} out of range for option {0}")]
    ValueIndex(usize, usize),
}

/// One concrete choice within an option (e.g. `Red` within `Color`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionValue {
    pub value: String,
    #[serde(default)]
    pub display_order: i32,
    /// Insertion slot; unique within the owning option, never reused.
    #[serde(default)]
    pub slot: u32,
}

/// A named axis of variation with an ordered list of distinct values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariationOption {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub values: Vec<OptionValue>,
    #[serde(default)]
    next_slot: u32,
}

impl VariationOption {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Look up a value by its insertion slot.
    pub fn value_at_slot(&self, slot: u32) -> Option<&OptionValue> {
        self.values.iter().find(|v| v.slot == slot)
    }

    fn claim_slot(&mut self) -> u32 {
        // Never hand out a slot at or below one already in use, even when
        // the counter went missing in deserialization.
        let floor = self.values.iter().map(|v| v.slot + 1).max().unwrap_or(0);
        let slot = self.next_slot.max(floor);
        self.next_slot = slot + 1;
        slot
    }
}

/// The persisted, user-editable record corresponding to one combination.
///
/// Variants are created only by reconciliation, never directly by the user.
/// Once created, `sku`, `price`, `stock` and `is_active` belong to the user
/// and are carried verbatim across regenerations for as long as the
/// combination's canonical key survives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub sku: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub title: String,
    /// The combination this variant represents, in option-declaration order.
    #[serde(default)]
    pub value_refs: Vec<ValueRef>,
}

fn default_true() -> bool {
    true
}

/// Ordered collection of variation options.
///
/// All mutation goes through the named operations below so that slot
/// accounting stays correct; the inner vector is exposed read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet {
    options: Vec<VariationOption>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set with exactly one empty, unnamed option — the shape the feature
    /// toggle seeds when variations are switched on.
    pub fn seeded() -> Self {
        let mut set = Self::new();
        set.add_option();
        set
    }

    pub fn options(&self) -> &[VariationOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Append a new empty option; returns its index.
    pub fn add_option(&mut self) -> usize {
        let index = self.options.len();
        self.options.push(VariationOption { display_order: index as i32, ..VariationOption::default() });
        index
    }

    pub fn remove_option(&mut self, option: usize) -> Result<(), EditError> {
        if option >= self.options.len() {
            return Err(EditError::OptionIndex(option));
        }
        self.options.remove(option);
        Ok(())
    }

    pub fn rename_option(&mut self, option: usize, name: impl Into<String>) -> Result<(), EditError> {
        let opt = self.options.get_mut(option).ok_or(EditError::OptionIndex(option))?;
        opt.name = name.into().trim().to_string();
        Ok(())
    }

    /// Add a value to an option.
    ///
    /// Returns `Ok(false)` without touching the set when the trimmed value is
    /// empty or already present in that option (case-sensitive exact match):
    /// duplicate entry is suppressed, not rejected.
    pub fn add_value(&mut self, option: usize, value: impl Into<String>) -> Result<bool, EditError> {
        let opt = self.options.get_mut(option).ok_or(EditError::OptionIndex(option))?;
        let value = value.into().trim().to_string();
        if value.is_empty() || opt.values.iter().any(|v| v.value == value) {
            return Ok(false);
        }
        let display_order = opt.values.len() as i32;
        let slot = opt.claim_slot();
        opt.values.push(OptionValue { value, display_order, slot });
        Ok(true)
    }

    /// Remove a value by its position in the option's value list.
    ///
    /// Remaining values keep their slots and display order untouched.
    pub fn remove_value(&mut self, option: usize, value: usize) -> Result<(), EditError> {
        let opt = self.options.get_mut(option).ok_or(EditError::OptionIndex(option))?;
        if value >= opt.values.len() {
            return Err(EditError::ValueIndex(option, value));
        }
        opt.values.remove(value);
        Ok(())
    }

    /// Rename an option and replace its values from a bulk catalog entry.
    ///
    /// This is how a catalog lookup result enters the system: as one edit,
    /// not as a call the engine makes itself. Replacement values are inserted
    /// through [`OptionSet::add_value`], so they continue the option's slot
    /// sequence rather than restarting it.
    pub fn adopt_catalog_entry(&mut self, option: usize, entry: &BulkOption) -> Result<(), EditError> {
        self.rename_option(option, entry.name.clone())?;
        self.options[option].values.clear();
        for value in &entry.values {
            self.add_value(option, value.clone())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_set() -> OptionSet {
        crate::options! { "Color" => ["Red", "Blue"] }
    }

    #[test]
    fn add_value_suppresses_duplicates() {
        let mut set = color_set();
        assert_eq!(set.add_value(0, "Red"), Ok(false));
        assert_eq!(set.add_value(0, "red"), Ok(true)); // case-sensitive
        assert_eq!(set.add_value(0, "   "), Ok(false));
        assert_eq!(set.options()[0].values.len(), 3);
    }

    #[test]
    fn slots_are_never_reused() {
        let mut set = color_set();
        let blue_slot = set.options()[0].values[1].slot;
        set.remove_value(0, 0).unwrap(); // drop Red
        set.add_value(0, "Green").unwrap();
        let green = set.options()[0].values.last().unwrap();
        assert_ne!(green.slot, 0);
        assert_ne!(green.slot, blue_slot);
        assert_eq!(set.options()[0].value_at_slot(blue_slot).map(|v| v.value.as_str()), Some("Blue"));
    }

    #[test]
    fn remove_keeps_sibling_slots() {
        let mut set = crate::options! { "Size" => ["S", "M", "L"] };
        let slots: Vec<u32> = set.options()[0].values.iter().map(|v| v.slot).collect();
        set.remove_value(0, 1).unwrap(); // drop M
        let remaining: Vec<u32> = set.options()[0].values.iter().map(|v| v.slot).collect();
        assert_eq!(remaining, vec![slots[0], slots[2]]);
    }

    #[test]
    fn out_of_range_edits_are_errors() {
        let mut set = color_set();
        assert_eq!(set.remove_option(5), Err(EditError::OptionIndex(5)));
        assert_eq!(set.remove_value(0, 9), Err(EditError::ValueIndex(0, 9)));
        assert_eq!(set.add_value(3, "X"), Err(EditError::OptionIndex(3)));
    }

    #[test]
    fn adopt_catalog_entry_replaces_values() {
        let mut set = color_set();
        let entry = BulkOption { name: "Material".into(), values: vec!["Cotton".into(), "Wool".into()] };
        set.adopt_catalog_entry(0, &entry).unwrap();
        let opt = &set.options()[0];
        assert_eq!(opt.name, "Material");
        let values: Vec<&str> = opt.values.iter().map(|v| v.value.as_str()).collect();
        assert_eq!(values, vec!["Cotton", "Wool"]);
        // fresh values continue the slot sequence from before the swap
        assert!(opt.values.iter().all(|v| v.slot >= 2));
    }
}
