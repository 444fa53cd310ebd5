//! JSON export of loaded tables.
//!
//! A [`RowTable`] serializes as a JSON array of objects, one object per row,
//! with 2-space indentation. An object's keys follow the table's column order;
//! absent cells are omitted from their object entirely, never emitted as
//! `null`. JSON objects being naturally heterogeneous, tables whose rows carry
//! different column sets need no special handling on output.

use std::fs;
use std::path::{Path, PathBuf};

use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;

use crate::error::{ExtractError, ExtractResult};
use crate::ingestion::batch::{self, BatchOptions, SourceFile};
use crate::types::{RowTable, Value};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int64(i) => serializer.serialize_i64(*i),
            Value::Float64(f) => serializer.serialize_f64(*f),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Utf8(s) => serializer.serialize_str(s),
        }
    }
}

impl Serialize for RowTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&RowObject {
                columns: &self.columns,
                cells: row,
            })?;
        }
        seq.end()
    }
}

/// One row rendered as a JSON object; absent cells produce no entry.
struct RowObject<'a> {
    columns: &'a [String],
    cells: &'a [Option<Value>],
}

impl Serialize for RowObject<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (name, cell) in self.columns.iter().zip(self.cells.iter()) {
            if let Some(value) = cell {
                map.serialize_entry(name, value)?;
            }
        }
        map.end()
    }
}

/// Encode a table as a JSON array of row-objects with 2-space indentation.
pub fn serialize(table: &RowTable) -> ExtractResult<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(table)?)
}

/// Output destination for a source file: `<out_dir>/<stem>.json`.
pub fn output_path(out_dir: impl AsRef<Path>, source: &SourceFile) -> PathBuf {
    out_dir
        .as_ref()
        .join(format!("{}.json", source.provenance()))
}

/// Write a table to `dest` as JSON, creating the parent directory if needed.
pub fn write_table(table: &RowTable, dest: impl AsRef<Path>) -> ExtractResult<()> {
    let dest = dest.as_ref();
    let bytes = serialize(table)?;
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| ExtractError::write(dest, e))?;
    }
    fs::write(dest, bytes).map_err(|e| ExtractError::write(dest, e))
}

/// Outcome of one [`export_batch`] run.
#[derive(Debug)]
pub struct ExportReport {
    /// Destination paths written successfully, in input order.
    pub written: Vec<PathBuf>,
    /// Number of source files attempted.
    pub attempted: usize,
    /// Number of source files fully extracted (loaded and written).
    pub succeeded: usize,
    /// Per-file failures, load and write alike, in input order.
    pub failures: Vec<ExtractError>,
}

impl ExportReport {
    /// Render the final tally line, e.g. `8/10 files extracted successfully`.
    pub fn summary(&self) -> String {
        format!(
            "{}/{} files extracted successfully",
            self.succeeded, self.attempted
        )
    }
}

/// Per-file export mode: for each source, load the spreadsheet, optionally tag
/// it, and write one JSON file named after the source into `out_dir`.
///
/// Both load and write failures are isolated per file: the failure is reported
/// to the observer, recorded in the report, and the remaining files still
/// process. The only aggregate signal is the success-vs-attempted tally.
pub fn export_batch(
    sources: &[SourceFile],
    out_dir: impl AsRef<Path>,
    options: &BatchOptions,
) -> ExportReport {
    let out_dir = out_dir.as_ref();
    let mut report = ExportReport {
        written: Vec::with_capacity(sources.len()),
        attempted: sources.len(),
        succeeded: 0,
        failures: Vec::new(),
    };

    for source in sources {
        let table = match batch::load_and_tag(source, options) {
            Ok(table) => table,
            Err(e) => {
                batch::notify_failure(options, &source.path, &e);
                report.failures.push(e);
                continue;
            }
        };
        batch::notify_loaded(options, source, &table);

        let dest = output_path(out_dir, source);
        match write_table(&table, &dest) {
            Ok(()) => {
                if let Some(obs) = options.observer.as_ref() {
                    let ctx = crate::ingestion::ExtractContext {
                        path: source.path.clone(),
                    };
                    obs.on_written(&ctx, &dest);
                }
                report.succeeded += 1;
                report.written.push(dest);
            }
            Err(e) => {
                batch::notify_failure(options, &source.path, &e);
                report.failures.push(e);
            }
        }
    }

    if let Some(obs) = options.observer.as_ref() {
        obs.on_summary(report.succeeded, report.attempted);
    }
    report
}
