//! Declarative node schema.
//!
//! A schema is a list of [`NodeSpec`]s. Each one says which record columns feed a
//! node type and which relationship label links a record to the value found in
//! each column:
//!
//! ```json
//! [
//!   { "node_type": "Name",
//!     "columns": [ { "colname": "forename", "rel_type": "FORNAME" },
//!                  { "colname": "surname",  "rel_type": "SURNAME" } ],
//!     "id_prefix": "Name-" }
//! ]
//! ```
//!
//! `valname`, `id_prefix` and `id_start` are optional. `node_type`, `columns`,
//! `colname` and `rel_type` are required and have no default.
//!
//! Record nodes always carry their value under `value`, and every node shares
//! one file with one header. A `valname` other than `value` therefore makes the
//! graph export fail with `SchemaMismatch` before anything is written.
//!
//! Schema files may also be written in YAML; both are parsed into the same
//! generic [`serde_json::Value`] tree before conversion.

use std::fs;
use std::path::Path;

use log::debug;
use serde_json::{Map, Value};

use super::errors::{GraphExportError, Result};

pub const DEFAULT_VALUE_FIELD: &str = "value";
pub const DEFAULT_ID_PREFIX: &str = "node";
pub const DEFAULT_ID_START: i64 = 0;

/// One source column and the relationship type linking a record to its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub column_name: String,
    pub relationship_label: String,
}

impl ColumnSpec {
    pub fn new(column_name: impl Into<String>, relationship_label: impl Into<String>) -> Self {
        ColumnSpec {
            column_name: column_name.into(),
            relationship_label: relationship_label.into(),
        }
    }

    /// Build from a `{colname, rel_type}` mapping.
    pub fn from_value(obj: &Value) -> Result<Self> {
        let map = as_object(obj, "column spec")?;
        Ok(ColumnSpec::new(
            required_str(map, "colname", "column spec")?,
            required_str(map, "rel_type", "column spec")?,
        ))
    }
}

/// How one node type is derived from the columns of a record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSpec {
    /// Always upper case; normalized once in [`NodeSpec::new`].
    pub node_type: String,
    pub columns: Vec<ColumnSpec>,
    pub value_field_name: String,
    pub id_prefix: String,
    pub id_start: i64,
}

impl NodeSpec {
    /// Create a spec with default value field, id prefix and id start.
    pub fn new(node_type: &str, columns: Vec<ColumnSpec>) -> Self {
        NodeSpec {
            node_type: node_type.to_uppercase(),
            columns,
            value_field_name: DEFAULT_VALUE_FIELD.to_string(),
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            id_start: DEFAULT_ID_START,
        }
    }

    pub fn with_value_field(mut self, value_field_name: impl Into<String>) -> Self {
        self.value_field_name = value_field_name.into();
        self
    }

    pub fn with_id_prefix(mut self, id_prefix: impl Into<String>) -> Self {
        self.id_prefix = id_prefix.into();
        self
    }

    pub fn with_id_start(mut self, id_start: i64) -> Self {
        self.id_start = id_start;
        self
    }

    /// Build from a generic nested mapping.
    pub fn from_value(obj: &Value) -> Result<Self> {
        let map = as_object(obj, "node spec")?;
        let node_type = required_str(map, "node_type", "node spec")?;
        let context = format!("node spec `{}`", node_type);

        let columns = match map.get("columns") {
            None => {
                return Err(GraphExportError::missing_field_with_context(
                    "columns", context,
                ))
            }
            Some(Value::Array(items)) => items
                .iter()
                .map(ColumnSpec::from_value)
                .collect::<Result<Vec<_>>>()?,
            Some(other) => {
                return Err(GraphExportError::invalid_config_with_context(
                    format!("`columns` must be a list, got {}", other),
                    context,
                ))
            }
        };

        let mut spec = NodeSpec::new(&node_type, columns);
        if let Some(valname) = optional_str(map, "valname", &context)? {
            spec.value_field_name = valname;
        }
        if let Some(prefix) = optional_str(map, "id_prefix", &context)? {
            spec.id_prefix = prefix;
        }
        match map.get("id_start") {
            None | Some(Value::Null) => {}
            Some(v) => {
                spec.id_start = v.as_i64().ok_or_else(|| {
                    GraphExportError::invalid_config_with_context(
                        format!("`id_start` must be an integer, got {}", v),
                        context.clone(),
                    )
                })?;
            }
        }
        Ok(spec)
    }

    /// Build a schema from a sequence of mappings, preserving order.
    pub fn from_values(objs: &Value) -> Result<Vec<Self>> {
        match objs {
            Value::Array(items) => items.iter().map(NodeSpec::from_value).collect(),
            other => Err(GraphExportError::invalid_config_with_context(
                format!("schema must be a list of node specs, got {}", other),
                "schema root",
            )),
        }
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.column_name.as_str())
    }
}

/// Parse schema text as YAML (`yaml == true`) or JSON.
pub fn parse_node_specs(content: &str, yaml: bool) -> Result<Vec<NodeSpec>> {
    let value: Value = if yaml {
        serde_yaml::from_str(content).map_err(|e| GraphExportError::ConfigParseError {
            error: e.to_string(),
        })?
    } else {
        serde_json::from_str(content).map_err(|e| GraphExportError::ConfigParseError {
            error: e.to_string(),
        })?
    };
    NodeSpec::from_values(&value)
}

/// Load a schema file. `.yaml`/`.yml` files are read as YAML, everything else as JSON.
pub fn load_node_specs<P: AsRef<Path>>(path: P) -> Result<Vec<NodeSpec>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| GraphExportError::ConfigReadError {
        error: format!("{}: {}", path.display(), e),
    })?;
    let yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let specs = parse_node_specs(&content, yaml)?;
    debug!(
        "Loaded {} node spec(s) from {}",
        specs.len(),
        path.display()
    );
    Ok(specs)
}

fn as_object<'a>(obj: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    obj.as_object().ok_or_else(|| {
        GraphExportError::invalid_config_with_context(
            format!("expected a mapping, got {}", obj),
            what.to_string(),
        )
    })
}

fn required_str(map: &Map<String, Value>, key: &str, context: &str) -> Result<String> {
    match map.get(key) {
        None | Some(Value::Null) => Err(GraphExportError::missing_field_with_context(
            key, context,
        )),
        Some(v) => scalar_to_string(v, key, context),
    }
}

fn optional_str(map: &Map<String, Value>, key: &str, context: &str) -> Result<Option<String>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => scalar_to_string(v, key, context).map(Some),
    }
}

fn scalar_to_string(v: &Value, key: &str, context: &str) -> Result<String> {
    match v {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(GraphExportError::invalid_config_with_context(
            format!("`{}` must be a string, got {}", key, other),
            context.to_string(),
        )),
    }
}
