pub mod errors;
pub mod node_spec;
pub mod registry;

pub use errors::{GraphExportError, Result};
pub use node_spec::{load_node_specs, parse_node_specs, ColumnSpec, NodeSpec};
pub use registry::{predefined_schema, resolve_node_specs, RANDOM_PROPERTY_SCHEMA};
