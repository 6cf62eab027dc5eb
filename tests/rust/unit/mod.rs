//! Unit tests - exercise the public API without external services
//!
//! These tests write real files into temporary directories.

mod test_graph_export;
mod test_schema_files;
mod test_synthetic_pipeline;
