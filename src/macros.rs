#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build an [`OptionSet`](crate::OptionSet) from name/value literals.
///
/// ```
/// let set = optweave::options! {
///     "Color" => ["Red", "Blue"],
///     "Size"  => ["S", "M"],
/// };
/// assert_eq!(set.len(), 2);
/// ```
#[macro_export]
macro_rules! options {
    ( $( $name:literal => [ $($value:literal),* $(,)? ] ),* $(,)? ) => {{
        let mut set = $crate::OptionSet::new();
        $(
            let idx = set.add_option();
            let _ = set.rename_option(idx, $name);
            $( let _ = set.add_value(idx, $value); )*
        )*
        set
    }};
}
