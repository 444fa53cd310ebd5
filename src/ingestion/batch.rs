//! Batch ingestion of an ordered list of source spreadsheets.
//!
//! The batch loader is fault-tolerant per item: a missing or malformed file is
//! reported and skipped, and the remaining files still load. There are no
//! retries and no resumable state; re-running the whole batch is the only
//! recovery path.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{ExtractError, ExtractResult};
use crate::types::{Batch, RowTable, Value};

use super::excel;
use super::observability::{ExtractContext, ExtractObserver, TableStats};

/// Column name used for the provenance tag unless overridden.
pub const DEFAULT_TAG_COLUMN: &str = "Source_Province";

/// One input spreadsheet, identified by its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path to the spreadsheet file.
    pub path: PathBuf,
}

impl SourceFile {
    /// Create a source file from a path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Provenance label for rows loaded from this file: the file's base name
    /// with directory and extension stripped (`ETL/Gauteng.xlsx` -> `Gauteng`).
    pub fn provenance(&self) -> String {
        self.path
            .file_stem()
            .or_else(|| self.path.file_name())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Options controlling batch ingestion behavior.
///
/// Use [`Default`] for common cases: provenance tagging on, default tag
/// column, no observer.
#[derive(Clone)]
pub struct BatchOptions {
    /// Whether to add the provenance column to every loaded table.
    pub tag: bool,
    /// Column name used for the provenance tag.
    pub tag_column: String,
    /// Optional observer for per-file progress lines and the final tally.
    pub observer: Option<Arc<dyn ExtractObserver>>,
}

impl fmt::Debug for BatchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchOptions")
            .field("tag", &self.tag)
            .field("tag_column", &self.tag_column)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            tag: true,
            tag_column: DEFAULT_TAG_COLUMN.to_string(),
            observer: None,
        }
    }
}

/// Load one source spreadsheet into a [`RowTable`].
///
/// Fails when the file is missing, unreadable, or not a valid workbook; the
/// error carries the offending path and the underlying cause. Read-only, no
/// other side effects.
pub fn load_one(source: &SourceFile) -> ExtractResult<RowTable> {
    excel::read_first_sheet(&source.path).map_err(|kind| ExtractError::load(&source.path, kind))
}

/// Add or overwrite the provenance column on every row of `table`.
///
/// The tag value is [`SourceFile::provenance`]. If the table already has a
/// column named `column`, its cells are overwritten; this mirrors the registry
/// exports, which never carry a real column by that name. Pure function; a
/// zero-row table passes through with only the column added. Applying the same
/// tag twice leaves the table unchanged after the first application.
pub fn tag(table: RowTable, source: &SourceFile, column: &str) -> RowTable {
    table.with_column(column, Value::Utf8(source.provenance()))
}

/// Load an ordered list of source files into a [`Batch`].
///
/// Files load strictly in input order, one at a time. A file that fails to
/// load is reported to the observer, recorded in [`Batch::failures`], and
/// skipped; it never aborts the rest of the batch. When `options.tag` is set,
/// every loaded table gains the provenance column before it is appended.
pub fn load_batch(sources: &[SourceFile], options: &BatchOptions) -> Batch {
    let mut batch = Batch {
        tables: Vec::with_capacity(sources.len()),
        attempted: sources.len(),
        succeeded: 0,
        failures: Vec::new(),
    };

    for source in sources {
        match load_and_tag(source, options) {
            Ok(table) => {
                notify_loaded(options, source, &table);
                batch.succeeded += 1;
                batch.tables.push(table);
            }
            Err(e) => {
                notify_failure(options, &source.path, &e);
                batch.failures.push(e);
            }
        }
    }

    if let Some(obs) = options.observer.as_ref() {
        obs.on_summary(batch.succeeded, batch.attempted);
    }
    batch
}

pub(crate) fn load_and_tag(source: &SourceFile, options: &BatchOptions) -> ExtractResult<RowTable> {
    let table = load_one(source)?;
    if options.tag {
        Ok(tag(table, source, &options.tag_column))
    } else {
        Ok(table)
    }
}

pub(crate) fn notify_loaded(options: &BatchOptions, source: &SourceFile, table: &RowTable) {
    if let Some(obs) = options.observer.as_ref() {
        let ctx = ExtractContext {
            path: source.path.clone(),
        };
        obs.on_loaded(
            &ctx,
            TableStats {
                rows: table.row_count(),
                columns: table.columns.len(),
            },
        );
    }
}

pub(crate) fn notify_failure(options: &BatchOptions, path: &Path, error: &ExtractError) {
    if let Some(obs) = options.observer.as_ref() {
        let ctx = ExtractContext {
            path: path.to_path_buf(),
        };
        obs.on_failure(&ctx, error);
    }
}
