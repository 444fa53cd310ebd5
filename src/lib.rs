//! `schools-etl` converts a fixed set of per-region spreadsheet files (South
//! African public school registries) into JSON records, one output file per
//! input spreadsheet, optionally tagging each row with its source region.
//!
//! The primary entrypoints are [`ingestion::load_batch`] (in-memory batch
//! mode) and [`export::export_batch`] (per-file JSON output mode). Both walk
//! the source list in order and isolate per-file failures: one missing or
//! malformed registry never aborts the rest of the run.
//!
//! ## Data model
//!
//! Each spreadsheet loads into a [`types::RowTable`] whose columns are
//! discovered from the sheet's header row. Registries differ in which columns
//! they carry, so tables are column-heterogeneous; combining them is a schema
//! union, never an intersection. An absent cell is omitted from its JSON
//! object entirely (JSON's heterogeneous objects carry the union for free).
//!
//! ## Quick examples
//!
//! Per-file mode: one `<Province>.json` per registry, plus a tally.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use schools_etl::export::export_batch;
//! use schools_etl::ingestion::{BatchOptions, StdErrObserver};
//! use schools_etl::registry::registry_sources;
//!
//! let sources = registry_sources("ETL");
//! let opts = BatchOptions {
//!     observer: Some(Arc::new(StdErrObserver)),
//!     ..Default::default()
//! };
//! let report = export_batch(&sources, "public/data", &opts);
//! println!("{}", report.summary());
//! ```
//!
//! Batch mode: all registries in memory, merged into one combined table.
//!
//! ```no_run
//! use schools_etl::ingestion::{load_batch, BatchOptions};
//! use schools_etl::registry::registry_sources;
//!
//! let batch = load_batch(&registry_sources("ETL"), &BatchOptions::default());
//! let combined = batch.concat();
//! println!("{} ({} rows total)", batch.summary(), combined.row_count());
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: batch loader, provenance tagging, and observers
//! - [`export`]: JSON serialization and per-file output
//! - [`registry`]: the fixed province source list
//! - [`types`]: row-table and batch types
//! - [`error`]: error types used across extraction

pub mod error;
pub mod export;
pub mod ingestion;
pub mod registry;
pub mod types;

pub use error::{ExtractError, ExtractResult, LoadErrorKind};
