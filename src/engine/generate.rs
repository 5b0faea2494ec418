//! Cartesian combination generator.
//!
//! Expands an option set into every combination of one value per option.
//! Output order is the display order of the variant table and must be stable
//! and reproducible for identical input: the first option varies slowest and
//! the last varies fastest, exactly like nested loops.
//!
//! ```text
//! Color: [Red, Blue]   Size: [S, M]
//!
//! (Red, S)  (Red, M)  (Blue, S)  (Blue, M)
//! ```
//!
//! The generator never decides what happens to the existing variant
//! collection; it only reports one of three shapes and leaves the decision to
//! the reducer.

use crate::model::VariationOption;
use crate::{Combination, Pick, ValueRef};

/// Outcome of expanding an option set.
#[derive(Debug, Clone, PartialEq)]
pub enum Generated {
    /// No options at all: the variant collection should be emptied.
    Empty,
    /// At least one option has no values yet. Generation is suspended and the
    /// caller must leave the existing variants untouched, not clear them.
    Suspended,
    /// Every option has at least one value: the full cartesian product, of
    /// length `Π value_count(option)`.
    Combinations(Vec<Combination>),
}

/// Expand `options` into the cartesian product of their values.
pub fn generate(options: &[VariationOption]) -> Generated {
    if options.is_empty() {
        return Generated::Empty;
    }
    if options.iter().any(|o| o.values.is_empty()) {
        return Generated::Suspended;
    }

    let capacity = options.iter().map(|o| o.values.len()).product();
    let mut out = Vec::with_capacity(capacity);
    let mut path = Vec::with_capacity(options.len());
    expand(options, 0, &mut path, &mut out);
    Generated::Combinations(out)
}

/// Depth-first expansion: append one value per option in option order and
/// emit the accumulated path at full depth.
fn expand(options: &[VariationOption], depth: usize, path: &mut Vec<Pick>, out: &mut Vec<Combination>) {
    if depth == options.len() {
        out.push(Combination { picks: path.clone() });
        return;
    }
    for value in &options[depth].values {
        path.push(Pick {
            value_ref: ValueRef { option: depth, slot: value.slot },
            text: value.value.clone(),
        });
        expand(options, depth + 1, path, out);
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::keys::CanonicalKey;

    fn texts(generated: &Generated) -> Vec<Vec<String>> {
        match generated {
            Generated::Combinations(combos) => {
                combos.iter().map(|c| c.picks.iter().map(|p| p.text.clone()).collect()).collect()
            }
            other => panic!("expected combinations, got {other:?}"),
        }
    }

    #[test]
    fn empty_set_yields_empty() {
        assert_eq!(generate(&[]), Generated::Empty);
    }

    #[test]
    fn option_without_values_suspends() {
        let mut set = crate::options! { "Color" => ["Red"] };
        set.add_option();
        assert_eq!(generate(set.options()), Generated::Suspended);
    }

    #[test]
    fn first_option_varies_slowest() {
        let set = crate::options! {
            "Color" => ["Red", "Blue"],
            "Size"  => ["S", "M"],
        };
        assert_eq!(
            texts(&generate(set.options())),
            vec![
                vec!["Red".to_string(), "S".to_string()],
                vec!["Red".to_string(), "M".to_string()],
                vec!["Blue".to_string(), "S".to_string()],
                vec!["Blue".to_string(), "M".to_string()],
            ]
        );
    }

    #[test]
    fn count_is_product_of_value_counts_and_keys_are_distinct() {
        let set = crate::options! {
            "Color"    => ["Red", "Blue"],
            "Size"     => ["S", "M", "L"],
            "Material" => ["Cotton", "Wool"],
        };
        let Generated::Combinations(combos) = generate(set.options()) else {
            panic!("expected combinations");
        };
        assert_eq!(combos.len(), 2 * 3 * 2);
        let mut keys: Vec<CanonicalKey> = combos.iter().map(CanonicalKey::of_combination).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), combos.len());
    }

    #[test]
    fn output_is_reproducible() {
        let set = crate::options! {
            "Color" => ["Red", "Blue"],
            "Size"  => ["S", "M"],
        };
        assert_eq!(generate(set.options()), generate(set.options()));
    }
}
