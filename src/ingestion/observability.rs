use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ExtractError;

/// Context about one extraction attempt.
#[derive(Debug, Clone)]
pub struct ExtractContext {
    /// The source file path being extracted.
    pub path: PathBuf,
}

/// Minimal stats reported when a source file loads successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStats {
    /// Number of loaded rows.
    pub rows: usize,
    /// Number of discovered columns.
    pub columns: usize,
}

/// Observer interface for per-file extraction outcomes.
///
/// Implementors can record metrics, print progress lines, or append to a log.
/// All methods default to no-ops.
pub trait ExtractObserver: Send + Sync {
    /// Called when a source file loads successfully.
    fn on_loaded(&self, _ctx: &ExtractContext, _stats: TableStats) {}

    /// Called when a table has been written to its output destination.
    fn on_written(&self, _ctx: &ExtractContext, _dest: &Path) {}

    /// Called when loading or writing a file fails. The file is skipped, not fatal.
    fn on_failure(&self, _ctx: &ExtractContext, _error: &ExtractError) {}

    /// Called once at the end of a batch with the final tally.
    fn on_summary(&self, _succeeded: usize, _attempted: usize) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ExtractObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn ExtractObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ExtractObserver for CompositeObserver {
    fn on_loaded(&self, ctx: &ExtractContext, stats: TableStats) {
        for o in &self.observers {
            o.on_loaded(ctx, stats);
        }
    }

    fn on_written(&self, ctx: &ExtractContext, dest: &Path) {
        for o in &self.observers {
            o.on_written(ctx, dest);
        }
    }

    fn on_failure(&self, ctx: &ExtractContext, error: &ExtractError) {
        for o in &self.observers {
            o.on_failure(ctx, error);
        }
    }

    fn on_summary(&self, succeeded: usize, attempted: usize) {
        for o in &self.observers {
            o.on_summary(succeeded, attempted);
        }
    }
}

/// Logs extraction events to stderr, one line per file plus the final tally.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl ExtractObserver for StdErrObserver {
    fn on_loaded(&self, ctx: &ExtractContext, stats: TableStats) {
        eprintln!(
            "[extract][ok] path={} rows={} columns={}",
            ctx.path.display(),
            stats.rows,
            stats.columns
        );
    }

    fn on_written(&self, ctx: &ExtractContext, dest: &Path) {
        eprintln!(
            "[extract][written] path={} dest={}",
            ctx.path.display(),
            dest.display()
        );
    }

    fn on_failure(&self, ctx: &ExtractContext, error: &ExtractError) {
        eprintln!("[extract][skipped] path={} err={}", ctx.path.display(), error);
    }

    fn on_summary(&self, succeeded: usize, attempted: usize) {
        eprintln!("[extract] {succeeded}/{attempted} files extracted successfully");
    }
}

/// Appends extraction events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl ExtractObserver for FileObserver {
    fn on_loaded(&self, ctx: &ExtractContext, stats: TableStats) {
        self.append_line(&format!(
            "{} ok path={} rows={} columns={}",
            unix_ts(),
            ctx.path.display(),
            stats.rows,
            stats.columns
        ));
    }

    fn on_written(&self, ctx: &ExtractContext, dest: &Path) {
        self.append_line(&format!(
            "{} written path={} dest={}",
            unix_ts(),
            ctx.path.display(),
            dest.display()
        ));
    }

    fn on_failure(&self, ctx: &ExtractContext, error: &ExtractError) {
        self.append_line(&format!(
            "{} skipped path={} err={}",
            unix_ts(),
            ctx.path.display(),
            error
        ));
    }

    fn on_summary(&self, succeeded: usize, attempted: usize) {
        self.append_line(&format!(
            "{} summary {succeeded}/{attempted} files extracted successfully",
            unix_ts()
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
