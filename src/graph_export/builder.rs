//! Record set → node and relationship rows.
//!
//! Output follows the bulk-import header conventions:
//!
//! - nodes: `value`, `id:ID`, `:LABEL`
//! - relationships: `:START_ID`, `:TYPE`, `:END_ID`
//!
//! Node order is record nodes first, then attribute nodes grouped by spec in
//! schema order, each group in index order. Relationships are grouped by spec,
//! then by column, then by record.

use std::io::Read;
use std::path::Path;

use log::{info, warn};

use super::csv_emitter::write_graph_csv;
use super::indexer::{build_index, field, ValueIndex};
use super::records::read_records;
use crate::graph_catalog::{GraphExportError, NodeSpec, Result};
use crate::utils::{rekey, Row};

pub const DEFAULT_RECORD_TYPE: &str = "Record";

pub const VALUE_FIELD: &str = "value";
pub const NODE_ID_FIELD: &str = "id:ID";
pub const LABEL_FIELD: &str = ":LABEL";
pub const START_ID_FIELD: &str = ":START_ID";
pub const TYPE_FIELD: &str = ":TYPE";
pub const END_ID_FIELD: &str = ":END_ID";

/// Nodes and relationships derived from one record set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphOutput {
    pub nodes: Vec<Row>,
    pub relationships: Vec<Row>,
}

/// Identifier of the node standing for record `row`.
pub fn record_node_id(record_type: &str, row: usize) -> String {
    format!("{}-{}", record_type, row)
}

/// One node per record. The `value` of a record node is the record type itself.
pub fn build_record_nodes(records: &[Row], record_type: &str) -> Vec<Row> {
    (0..records.len())
        .map(|i| {
            let mut node = Row::with_capacity(3);
            node.insert(VALUE_FIELD.to_string(), record_type.to_string());
            node.insert(NODE_ID_FIELD.to_string(), record_node_id(record_type, i));
            node.insert(LABEL_FIELD.to_string(), record_type.to_string());
            node
        })
        .collect()
}

/// One node per indexed value, labeled with the spec's node type.
pub fn build_attribute_nodes(index: &ValueIndex, node_spec: &NodeSpec) -> Vec<Row> {
    let mut label = Row::with_capacity(1);
    label.insert(LABEL_FIELD.to_string(), node_spec.node_type.clone());
    rekey(index, &node_spec.value_field_name, NODE_ID_FIELD, &label)
}

/// One edge per (column, record) pair from the record node to the value node.
pub fn build_relationships(
    records: &[Row],
    record_type: &str,
    index: &ValueIndex,
    node_spec: &NodeSpec,
) -> Result<Vec<Row>> {
    let mut relationships = Vec::with_capacity(node_spec.columns.len() * records.len());
    for column in &node_spec.columns {
        for (i, record) in records.iter().enumerate() {
            let value = field(record, &column.column_name, i, node_spec)?;
            let end_id = index.get(value).ok_or_else(|| {
                GraphExportError::missing_field_with_context(
                    value,
                    format!(
                        "{} index, record {} column {}",
                        node_spec.node_type, i, column.column_name
                    ),
                )
            })?;

            let mut rel = Row::with_capacity(3);
            rel.insert(START_ID_FIELD.to_string(), record_node_id(record_type, i));
            rel.insert(TYPE_FIELD.to_string(), column.relationship_label.clone());
            rel.insert(END_ID_FIELD.to_string(), end_id.to_string());
            relationships.push(rel);
        }
    }
    Ok(relationships)
}

/// Build the full node and relationship lists for `records`.
///
/// Fails with `MissingField` if any record lacks a column named by any spec;
/// nothing is returned in that case.
pub fn build_dataset(
    records: &[Row],
    node_specs: &[NodeSpec],
    record_type: &str,
) -> Result<GraphOutput> {
    if records.is_empty() {
        warn!("No records to convert; the graph will have no nodes");
    }

    let mut output = GraphOutput {
        nodes: build_record_nodes(records, record_type),
        relationships: Vec::new(),
    };

    for node_spec in node_specs {
        let index = build_index(records, node_spec)?;
        output
            .nodes
            .extend(build_attribute_nodes(&index, node_spec));
        output.relationships.extend(build_relationships(
            records,
            record_type,
            &index,
            node_spec,
        )?);
        info!(
            "{}: {} node(s), {} relationship(s)",
            node_spec.node_type,
            index.len(),
            node_spec.columns.len() * records.len()
        );
    }

    Ok(output)
}

/// Records together with the graph derived from them.
#[derive(Debug, Clone)]
pub struct DataSet {
    pub records: Vec<Row>,
    pub graph: GraphOutput,
}

impl DataSet {
    pub fn new(records: Vec<Row>, node_specs: &[NodeSpec], record_type: &str) -> Result<Self> {
        let graph = build_dataset(&records, node_specs, record_type)?;
        Ok(DataSet { records, graph })
    }

    /// Read delimited records with a header row and build their graph.
    pub fn from_csv<R: Read>(
        reader: R,
        delimiter: u8,
        node_specs: &[NodeSpec],
        record_type: &str,
    ) -> Result<Self> {
        let records = read_records(reader, delimiter)?;
        info!("Read {} record(s)", records.len());
        DataSet::new(records, node_specs, record_type)
    }

    /// Write `{prefix}.nodes` and `{prefix}.relationships`.
    pub fn to_graph_csv<P: AsRef<Path>>(&self, prefix: P, delimiter: u8) -> Result<()> {
        write_graph_csv(&self.graph, prefix, delimiter)
    }
}
