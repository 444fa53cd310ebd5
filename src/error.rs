use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Error type returned by extraction functions.
///
/// Load and write failures always carry the path of the offending file, so a
/// batch report can name the source that was skipped.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A source spreadsheet could not be loaded.
    #[error("failed to load {}: {}", .path.display(), .source)]
    Load {
        /// Path of the source file that failed.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: LoadErrorKind,
    },

    /// An output JSON file could not be written.
    #[error("failed to write {}: {}", .path.display(), .source)]
    Write {
        /// Destination path that failed.
        path: PathBuf,
        /// Underlying I/O cause.
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding failed.
    #[error("json encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ExtractError {
    /// Wrap a load failure with the source file path.
    pub fn load(path: impl Into<PathBuf>, source: impl Into<LoadErrorKind>) -> Self {
        Self::Load {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Wrap a write failure with the destination path.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

/// Underlying cause of a [`ExtractError::Load`] failure.
#[derive(Debug, Error)]
pub enum LoadErrorKind {
    /// The file is missing, unreadable, or not a valid workbook. Plain I/O
    /// failures surface here too; calamine wraps them as workbook errors.
    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    /// The workbook contains no sheets at all.
    #[error("workbook has no sheets")]
    NoSheets,

    /// The first sheet has no non-empty rows, so no header row exists.
    #[error("sheet '{sheet}' has no non-empty rows (no header row found)")]
    NoHeaderRow {
        /// Name of the sheet that was scanned.
        sheet: String,
    },
}
