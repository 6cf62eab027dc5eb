//! Tabular input: a delimited file with a header row, one [`Row`] per line.

use std::io::Read;

use csv::ReaderBuilder;

use crate::graph_catalog::Result;
use crate::utils::Row;

/// Read every record of `reader`, keyed by header name in header order.
///
/// Rows with a different field count than the header are a CSV error.
pub fn read_records<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Row>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        records.push(row);
    }
    Ok(records)
}
