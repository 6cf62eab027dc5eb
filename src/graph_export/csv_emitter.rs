//! Streaming CSV emission of uniformly shaped rows.
//!
//! The header is the key order of the first row. Every later row must carry
//! exactly the same key set; its values are written in header order.

use std::borrow::Borrow;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use log::{debug, info};
use tempfile::{Builder, NamedTempFile};

use super::builder::GraphOutput;
use crate::graph_catalog::{GraphExportError, Result};
use crate::utils::Row;

pub const NODES_SUFFIX: &str = "nodes";
pub const RELATIONSHIPS_SUFFIX: &str = "relationships";

/// Write `rows` as delimited text, returning the number of data rows written.
///
/// Rows are consumed one at a time. `context` only appears in error messages.
pub fn write_rows<W, I, B>(writer: W, rows: I, delimiter: u8, context: &str) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = B>,
    B: Borrow<Row>,
{
    let mut rows = rows.into_iter();
    let first = rows.next().ok_or_else(|| GraphExportError::EmptyInput {
        context: context.to_string(),
    })?;

    let first: &Row = first.borrow();
    let header: Vec<String> = first.keys().cloned().collect();
    let mut csv_writer = WriterBuilder::new().delimiter(delimiter).from_writer(writer);
    csv_writer.write_record(&header)?;
    csv_writer.write_record(first.values())?;

    let mut written = 1;
    for row in rows {
        let row: &Row = row.borrow();
        if row.len() != header.len() || !header.iter().all(|key| row.contains_key(key)) {
            return Err(GraphExportError::schema_mismatch(written, &header, row.keys()));
        }
        csv_writer.write_record(header.iter().map(|key| &row[key]))?;
        written += 1;
    }

    csv_writer.flush()?;
    debug!("Wrote {} row(s) for {}", written, context);
    Ok(written)
}

/// `{prefix}.{suffix}`, keeping any directory part of `prefix`.
pub fn output_path<P: AsRef<Path>>(prefix: P, suffix: &str) -> PathBuf {
    let mut path: OsString = prefix.as_ref().as_os_str().to_owned();
    path.push(".");
    path.push(suffix);
    PathBuf::from(path)
}

/// A temporary file next to `target`, to be renamed over it once complete.
///
/// On unix it is opened with mode `0o666` so the persisted file gets the
/// umask-derived mode a plain create would, not the temp-file default `0o600`.
fn staging_file(target: &Path) -> Result<NamedTempFile> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    Ok(builder.tempfile_in(dir)?)
}

fn persist(staged: NamedTempFile, target: &Path) -> Result<()> {
    staged.persist(target).map_err(|e| e.error)?;
    Ok(())
}

/// Write rows to `path` through a temporary file so a failure never leaves a
/// truncated file behind.
pub fn write_rows_atomically<P, I, B>(path: P, rows: I, delimiter: u8) -> Result<usize>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = B>,
    B: Borrow<Row>,
{
    let path = path.as_ref();
    let mut staged = staging_file(path)?;
    let written = write_rows(
        staged.as_file_mut(),
        rows,
        delimiter,
        &path.display().to_string(),
    )?;
    persist(staged, path)?;
    Ok(written)
}

/// Write `{prefix}.nodes` and `{prefix}.relationships`.
///
/// Neither file is replaced unless both were written completely.
pub fn write_graph_csv<P: AsRef<Path>>(
    graph: &GraphOutput,
    prefix: P,
    delimiter: u8,
) -> Result<()> {
    let nodes_path = output_path(&prefix, NODES_SUFFIX);
    let relationships_path = output_path(&prefix, RELATIONSHIPS_SUFFIX);

    let mut staged_nodes = staging_file(&nodes_path)?;
    let node_count = write_rows(
        staged_nodes.as_file_mut(),
        &graph.nodes,
        delimiter,
        &nodes_path.display().to_string(),
    )?;

    let mut staged_relationships = staging_file(&relationships_path)?;
    let relationship_count = write_rows(
        staged_relationships.as_file_mut(),
        &graph.relationships,
        delimiter,
        &relationships_path.display().to_string(),
    )?;

    persist(staged_nodes, &nodes_path)?;
    persist(staged_relationships, &relationships_path)?;
    info!(
        "Wrote {} node(s) to {} and {} relationship(s) to {}",
        node_count,
        nodes_path.display(),
        relationship_count,
        relationships_path.display()
    );
    Ok(())
}
