//! # Append-Only Sample Log
//!
//! File-backed `SampleSink`. One sample per line, `'0'`/`'1'` symbols, `\n`
//! terminated.
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: a sample is flushed and synced before `append` returns,
//!   so a crash loses at most the sample being written.
//! - **INVARIANT-2**: existing content is never rewritten. Reopening a log
//!   appends after what is already there.
//! - **INVARIANT-3**: at most one writer per log. The file carries an
//!   exclusive `fs2` lock for the lifetime of the writer.
//! - **INVARIANT-4**: only samples of the configured width are written.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use shared_types::{format_line, BitVector};
use tracing::{debug, warn};

use crate::error::LogError;
use crate::ports::SampleSink;

/// Exclusive, durable writer for one sample log.
#[derive(Debug)]
pub struct AppendOnlySampleLog {
    file: File,
    path: PathBuf,
    width: usize,
    persisted: u64,
}

impl AppendOnlySampleLog {
    /// Open (or create) the log at `path` for appending.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns `LogError::AlreadyLocked` if another writer holds the log.
    pub fn open(path: impl AsRef<Path>, width: usize) -> Result<Self, LogError> {
        let path = path.as_ref().to_path_buf();
        let open_err = |source| LogError::Open {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(open_err)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(open_err)?;

        if file.try_lock_exclusive().is_err() {
            return Err(LogError::AlreadyLocked { path });
        }

        debug!("[bv-03] Opened sample log {}", path.display());
        Ok(Self {
            file,
            path,
            width,
            persisted: 0,
        })
    }

    /// Location of the log on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SampleSink for AppendOnlySampleLog {
    fn append(&mut self, sample: &BitVector) -> Result<(), LogError> {
        sample.expect_width(self.width)?;
        self.file
            .write_all(format_line(sample).as_bytes())
            .map_err(LogError::Write)?;
        self.file.flush().map_err(LogError::Write)?;
        self.file.sync_data().map_err(LogError::Write)?;
        self.persisted += 1;
        Ok(())
    }

    fn persisted(&self) -> u64 {
        self.persisted
    }
}

impl Drop for AppendOnlySampleLog {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!(
                "[bv-03] Failed to release lock on {}: {}",
                self.path.display(),
                e
            );
        }
    }
}
