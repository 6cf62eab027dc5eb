//! Value indexing for attribute nodes.
//!
//! For one [`NodeSpec`], every distinct value found in any of its columns gets a
//! node identifier `{id_prefix}{n}`. Values are sorted before numbering, so the
//! same record set always produces the same mapping.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::graph_catalog::{GraphExportError, NodeSpec, Result};
use crate::utils::Row;

/// Deterministic value → identifier mapping for one node type.
///
/// Iteration follows sorted value order, which is also numbering order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueIndex {
    ids: BTreeMap<String, String>,
}

impl ValueIndex {
    /// Number `values` in sorted order starting at `start`.
    ///
    /// Fails with `InvalidConfig` if the numbers would run past `i64::MAX`.
    pub fn number<I, S>(values: I, prefix: &str, start: i64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let distinct: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        let ids = distinct
            .into_iter()
            .enumerate()
            .map(|(i, value)| -> Result<(String, String)> {
                let n = i64::try_from(i)
                    .ok()
                    .and_then(|i| start.checked_add(i))
                    .ok_or_else(|| {
                        GraphExportError::invalid_config_with_context(
                            format!("`id_start` {} leaves no room for value {}", start, i + 1),
                            format!("ids with prefix `{}`", prefix),
                        )
                    })?;
                Ok((value, format!("{}{}", prefix, n)))
            })
            .collect::<Result<_>>()?;
        Ok(ValueIndex { ids })
    }

    pub fn get(&self, value: &str) -> Option<&str> {
        self.ids.get(value).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// `(value, id)` pairs in numbering order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.ids.iter()
    }
}

impl<'a> IntoIterator for &'a ValueIndex {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

/// Fetch `column` from `record`, failing with `MissingField` if absent.
pub(crate) fn field<'r>(
    record: &'r Row,
    column: &str,
    row: usize,
    spec: &NodeSpec,
) -> Result<&'r str> {
    record.get(column).map(String::as_str).ok_or_else(|| {
        GraphExportError::missing_field_with_context(
            column,
            format!("record {} while indexing {}", row, spec.node_type),
        )
    })
}

/// Collect the distinct values of all of `node_spec`'s columns and number them.
///
/// All columns of one spec share a single numbering. Every record must carry
/// every column of the spec.
pub fn build_index(records: &[Row], node_spec: &NodeSpec) -> Result<ValueIndex> {
    let mut values = BTreeSet::new();
    for column in node_spec.column_names() {
        for (i, record) in records.iter().enumerate() {
            values.insert(field(record, column, i, node_spec)?);
        }
    }

    let index = ValueIndex::number(values, &node_spec.id_prefix, node_spec.id_start)?;
    debug!(
        "Indexed {} distinct value(s) for {} across {} column(s)",
        index.len(),
        node_spec.node_type,
        node_spec.columns.len()
    );
    Ok(index)
}
