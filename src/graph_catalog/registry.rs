//! Predefined schemas and schema reference resolution.
//!
//! A schema reference on the command line is either a path to a JSON/YAML schema
//! file or the name of a predefined schema. Files win when both match.

use std::collections::HashMap;
use std::path::Path;

use log::{debug, info};

use super::errors::{GraphExportError, Result};
use super::node_spec::{load_node_specs, ColumnSpec, NodeSpec};

/// Name of the schema matching the synthetic household records.
pub const RANDOM_PROPERTY_SCHEMA: &str = "rp";

lazy_static::lazy_static! {
    static ref PREDEFINED_SCHEMAS: HashMap<&'static str, Vec<NodeSpec>> = {
        let mut m = HashMap::new();

        // forename/surname/address rows produced by `synthetic::generate_people`
        m.insert(RANDOM_PROPERTY_SCHEMA, vec![
            NodeSpec::new("Name", vec![
                ColumnSpec::new("forename", "FORNAME"),
                ColumnSpec::new("surname", "SURNAME"),
            ])
            .with_id_prefix("Name-"),
            NodeSpec::new("Address", vec![
                ColumnSpec::new("address", "LIVE_AT"),
            ])
            .with_id_prefix("Address-"),
        ]);

        m
    };
}

/// Look up a predefined schema by name.
pub fn predefined_schema(name: &str) -> Option<Vec<NodeSpec>> {
    PREDEFINED_SCHEMAS.get(name).cloned()
}

/// Names of all predefined schemas, sorted.
pub fn predefined_schema_names() -> Vec<&'static str> {
    let mut names: Vec<_> = PREDEFINED_SCHEMAS.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Resolve a schema reference to node specs.
///
/// An existing file is loaded; otherwise the reference is looked up among the
/// predefined schemas.
pub fn resolve_node_specs(reference: &str) -> Result<Vec<NodeSpec>> {
    let path = Path::new(reference);
    if path.is_file() {
        info!("Loading schema from file {}", path.display());
        return load_node_specs(path);
    }

    match predefined_schema(reference) {
        Some(specs) => {
            debug!("Using predefined schema `{}`", reference);
            Ok(specs)
        }
        None => Err(GraphExportError::UnknownSchema {
            reference: reference.to_string(),
        }),
    }
}
