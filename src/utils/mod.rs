pub mod rows;

pub use rows::{merge_rows, rekey, Row};
