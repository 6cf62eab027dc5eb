//! Conversion of tabular records into bulk-import node and relationship files.

pub mod builder;
pub mod csv_emitter;
pub mod indexer;
pub mod records;

pub use builder::{build_dataset, DataSet, GraphOutput, DEFAULT_RECORD_TYPE};
pub use csv_emitter::{write_graph_csv, write_rows, write_rows_atomically};
pub use indexer::{build_index, ValueIndex};
pub use records::read_records;
