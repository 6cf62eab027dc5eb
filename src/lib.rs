//! Tabgraph - tabular records to bulk-import graph files
//!
//! This crate converts delimited records into a node file and a relationship file
//! for a bulk graph importer:
//! - Declarative node schemas mapping record columns to node types
//! - Deterministic value indexing and node/relationship emission
//! - Streaming CSV output with atomic file replacement
//! - Synthetic household/person records for testing the conversion

pub mod utils;

pub mod config;
pub mod graph_catalog;
pub mod graph_export;
pub mod synthetic;
