//! Batch ingestion entrypoints and implementations.
//!
//! Most callers should use [`load_batch`] (from [`batch`]) which:
//!
//! - loads each source spreadsheet in input order into a [`crate::types::RowTable`]
//! - optionally tags every row with a provenance column
//! - isolates per-file failures so one bad file never aborts the batch
//! - optionally reports per-file outcomes to an [`ExtractObserver`]
//!
//! Single-file access is available via [`load_one`] and
//! [`excel::read_first_sheet`].

pub mod batch;
pub mod excel;
pub mod observability;

pub use batch::{load_batch, load_one, tag, BatchOptions, SourceFile, DEFAULT_TAG_COLUMN};
pub use observability::{
    CompositeObserver, ExtractContext, ExtractObserver, FileObserver, StdErrObserver, TableStats,
};
