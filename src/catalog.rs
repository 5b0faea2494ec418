//! Bulk option catalog.
//!
//! A read-only name → values suggestion list. When the user picks a known
//! option name ("Color"), the caller looks it up here and feeds the result
//! back into the option set as a single edit
//! ([`OptionSet::adopt_catalog_entry`](crate::OptionSet::adopt_catalog_entry)).
//! The engine never queries the catalog itself.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// One catalog entry: an option name with its suggested values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkOption {
    pub name: String,
    pub values: Vec<String>,
}

/// Read-only source of bulk options.
///
/// The real application backs this with a remote endpoint; tests and the CLI
/// use the builtin list below.
pub trait BulkOptionSource {
    fn bulk_options(&self) -> &[BulkOption];

    fn lookup(&self, name: &str) -> Option<&BulkOption> {
        self.bulk_options().iter().find(|o| o.name == name)
    }
}

static BUILTIN: Lazy<Vec<BulkOption>> = Lazy::new(|| {
    let entry = |name: &str, values: &[&str]| BulkOption {
        name: name.to_string(),
        values: values.iter().map(|v| (*v).to_string()).collect(),
    };
    vec![
        entry("Color", &["Red", "Blue", "Green", "Black", "White"]),
        entry("Size", &["XS", "S", "M", "L", "XL"]),
        entry("Material", &["Cotton", "Wool", "Leather", "Polyester"]),
    ]
});

/// The builtin catalog shipped with the crate.
pub fn builtin_catalog() -> &'static BuiltinCatalog {
    static CATALOG: BuiltinCatalog = BuiltinCatalog;
    &CATALOG
}

pub struct BuiltinCatalog;

impl BulkOptionSource for BuiltinCatalog {
    fn bulk_options(&self) -> &[BulkOption] {
        &BUILTIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_known_names() {
        let catalog = builtin_catalog();
        assert!(catalog.lookup("Size").is_some_and(|o| o.values.contains(&"M".to_string())));
        assert!(catalog.lookup("Flavor").is_none());
    }
}
