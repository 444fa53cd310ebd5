//! Core data model types for extraction.
//!
//! This crate loads spreadsheet files into in-memory [`RowTable`]s. Columns are
//! discovered from each file's header row rather than declared up front, so two
//! tables loaded from different registries may carry different column sets.

use crate::error::ExtractError;

/// A single scalar cell value in a [`RowTable`].
///
/// Absent cells are represented as `None` at the table level (see
/// [`RowTable::rows`]), never as a `Value` variant. An absent cell is omitted
/// from JSON output entirely.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

/// In-memory table loaded from one spreadsheet.
///
/// `columns` holds the header names in discovery order; every row in `rows` is
/// aligned with `columns`, with `None` marking an absent cell.
#[derive(Debug, Clone, PartialEq)]
pub struct RowTable {
    /// Column names in header order.
    pub columns: Vec<String>,
    /// Row-major cell storage, each row aligned with `columns`.
    pub rows: Vec<Vec<Option<Value>>>,
}

impl RowTable {
    /// Create a table from columns and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<Value>>>) -> Self {
        Self { columns, rows }
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the index of a column by name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Return a table with `name` set to `value` on every row.
    ///
    /// If the column already exists its cells are overwritten in place;
    /// otherwise the column is appended after the discovered columns. A table
    /// with zero rows gains the column but no cells.
    pub fn with_column(mut self, name: &str, value: Value) -> Self {
        let idx = match self.column_index(name) {
            Some(idx) => idx,
            None => {
                self.columns.push(name.to_string());
                for row in &mut self.rows {
                    row.push(None);
                }
                self.columns.len() - 1
            }
        };
        for row in &mut self.rows {
            row[idx] = Some(value.clone());
        }
        self
    }
}

/// Ordered collection of tables produced by one batch ingestion run.
///
/// Tables appear in the same relative order as the input source list, with
/// failed sources skipped. `tables.len() <= attempted` always holds, with
/// equality exactly when `failures` is empty.
#[derive(Debug)]
pub struct Batch {
    /// Successfully loaded tables, in input order.
    pub tables: Vec<RowTable>,
    /// Number of source files attempted.
    pub attempted: usize,
    /// Number of source files loaded successfully.
    pub succeeded: usize,
    /// Per-file failures, in input order. Each error names its source path.
    pub failures: Vec<ExtractError>,
}

impl Batch {
    /// Render the final tally line, e.g. `3/4 files extracted successfully`.
    pub fn summary(&self) -> String {
        format!(
            "{}/{} files extracted successfully",
            self.succeeded, self.attempted
        )
    }

    /// Merge all tables into one by column union.
    ///
    /// The combined column order is discovery order across tables: all of the
    /// first table's columns, then columns the second table adds, and so on.
    /// A row lacking one of the combined columns gets an absent cell there.
    pub fn concat(&self) -> RowTable {
        let mut columns: Vec<String> = Vec::new();
        for table in &self.tables {
            for col in &table.columns {
                if !columns.contains(col) {
                    columns.push(col.clone());
                }
            }
        }

        let total_rows = self.tables.iter().map(RowTable::row_count).sum();
        let mut rows: Vec<Vec<Option<Value>>> = Vec::with_capacity(total_rows);
        for table in &self.tables {
            // Source column index for each combined column, per table.
            let projection: Vec<Option<usize>> =
                columns.iter().map(|c| table.column_index(c)).collect();
            for row in &table.rows {
                let out: Vec<Option<Value>> = projection
                    .iter()
                    .map(|idx| idx.and_then(|i| row[i].clone()))
                    .collect();
                rows.push(out);
            }
        }

        RowTable::new(columns, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::{Batch, RowTable, Value};

    fn table_ab() -> RowTable {
        RowTable::new(
            vec!["A".to_string(), "B".to_string()],
            vec![
                vec![Some(Value::Int64(1)), Some(Value::Utf8("x".to_string()))],
                vec![Some(Value::Int64(2)), None],
            ],
        )
    }

    #[test]
    fn with_column_appends_new_column_on_every_row() {
        let t = table_ab().with_column("Source_Province", Value::Utf8("Gauteng".to_string()));
        assert_eq!(t.columns, vec!["A", "B", "Source_Province"]);
        for row in &t.rows {
            assert_eq!(row[2], Some(Value::Utf8("Gauteng".to_string())));
        }
    }

    #[test]
    fn with_column_overwrites_existing_column_in_place() {
        let t = table_ab().with_column("B", Value::Bool(true));
        assert_eq!(t.columns, vec!["A", "B"]);
        assert_eq!(t.rows[0][1], Some(Value::Bool(true)));
        assert_eq!(t.rows[1][1], Some(Value::Bool(true)));
    }

    #[test]
    fn with_column_on_empty_table_adds_column_only() {
        let t = RowTable::new(vec!["A".to_string()], vec![])
            .with_column("Source_Province", Value::Utf8("Limpopo".to_string()));
        assert_eq!(t.columns, vec!["A", "Source_Province"]);
        assert_eq!(t.row_count(), 0);
    }

    #[test]
    fn concat_unions_columns_and_fills_absent_cells() {
        let other = RowTable::new(
            vec!["A".to_string(), "C".to_string()],
            vec![vec![Some(Value::Int64(3)), Some(Value::Bool(false))]],
        );
        let batch = Batch {
            tables: vec![table_ab(), other],
            attempted: 2,
            succeeded: 2,
            failures: vec![],
        };

        let merged = batch.concat();
        assert_eq!(merged.columns, vec!["A", "B", "C"]);
        assert_eq!(merged.row_count(), 3);
        // Row from the second table has no B cell.
        assert_eq!(merged.rows[2][1], None);
        assert_eq!(merged.rows[2][2], Some(Value::Bool(false)));
        // Rows from the first table have no C cell.
        assert_eq!(merged.rows[0][2], None);
    }

    #[test]
    fn summary_renders_tally() {
        let batch = Batch {
            tables: vec![table_ab()],
            attempted: 2,
            succeeded: 1,
            failures: vec![],
        };
        assert_eq!(batch.summary(), "1/2 files extracted successfully");
    }
}
