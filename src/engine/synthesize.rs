//! Deterministic sku/title naming for new variants.
//!
//! Only the reconciler calls this, and only for combinations that have no
//! surviving match: names of carried variants are user-owned and never
//! regenerated.
//!
//! ```text
//! base "ABC", (Color=Red, Size=S) ──▶ sku "ABC-RED-S", title "Red / S"
//! ```

use crate::Combination;

/// Sku base used when the owning product has no code yet.
pub const DEFAULT_BASE_CODE: &str = "PROD";

/// Human-facing name: the value display strings joined with `" / "`, in
/// option-declaration order.
pub fn title(combination: &Combination) -> String {
    combination.picks.iter().map(|p| p.text.as_str()).collect::<Vec<_>>().join(" / ")
}

/// Deterministic sku: `BASE-ABB-ABB-…`, one abbreviated fragment per value.
pub fn sku(base_code: Option<&str>, combination: &Combination) -> String {
    let base = match base_code {
        Some(code) if !code.trim().is_empty() => code.trim(),
        _ => DEFAULT_BASE_CODE,
    };
    let mut out = String::from(base);
    for pick in &combination.picks {
        out.push('-');
        out.push_str(&abbreviate(&pick.text));
    }
    out
}

/// First three characters of the value string, upper-cased.
///
/// Whitespace and punctuation are stripped first so free-form values cannot
/// smuggle separators into the sku ("X-L" abbreviates to "XL", not "X-L").
fn abbreviate(value: &str) -> String {
    let cleaned = regex!("[^A-Za-z0-9]+").replace_all(value, "");
    cleaned.chars().take(3).collect::<String>().to_uppercase()
}
