//! Row helpers shared by the graph builder, CSV emitter and synthetic generator.
//!
//! A [`Row`] is an insertion-ordered string mapping. Key order matters: the CSV
//! emitter takes its header from the key order of the first row it sees.

use indexmap::IndexMap;

/// One tabular record, or one node/relationship row headed for a CSV file.
pub type Row = IndexMap<String, String>;

/// Layer `extras` over `base`.
///
/// Keys from `base` keep their position. Keys only present in `extras` are
/// appended in their own order. On conflict the value from `extras` wins.
///
/// # Examples
/// ```
/// use tabgraph::utils::{merge_rows, Row};
///
/// let base: Row = [("a", "1"), ("b", "2")]
///     .into_iter()
///     .map(|(k, v)| (k.to_string(), v.to_string()))
///     .collect();
/// let extras: Row = [("b", "9"), ("c", "3")]
///     .into_iter()
///     .map(|(k, v)| (k.to_string(), v.to_string()))
///     .collect();
///
/// let merged = merge_rows(&base, &extras);
/// assert_eq!(merged.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
/// assert_eq!(merged["b"], "9");
/// ```
pub fn merge_rows(base: &Row, extras: &Row) -> Row {
    let mut merged = base.clone();
    for (key, value) in extras {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Turn every `(key, value)` pair of a mapping into its own row
/// `{key_name: key, value_name: value, ..extras}`.
pub fn rekey<'a, I>(pairs: I, key_name: &str, value_name: &str, extras: &Row) -> Vec<Row>
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| {
            let mut row = Row::with_capacity(2 + extras.len());
            row.insert(key_name.to_string(), key.clone());
            row.insert(value_name.to_string(), value.clone());
            merge_rows(&row, extras)
        })
        .collect()
}

/// Build a [`Row`] from string-ish pairs. Mostly useful in tests and fixtures.
pub fn row_from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Row
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
