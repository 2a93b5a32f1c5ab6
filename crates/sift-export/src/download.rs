//! Download hand-off for exported CSV.
//!
//! An export stages its payload in a temporary file (the [`DownloadHandle`]),
//! hands that handle to a [`DownloadHost`], and then schedules the handle's
//! release after a delay. The host may still be reading the staged file
//! right after `deliver` returns, so the release is deferred rather than
//! immediate.

use std::ffi::OsStr;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use sift_core::{Record, Result, Row, SiftError, RECORD_COLUMNS};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::csv::{encode_payload, to_csv, CSV_MIME_TYPE};

/// Rows plus the column order to export them in. Consumed by [`export_csv`].
#[derive(Debug, Clone, Default)]
pub struct ExportRequest {
    pub rows: Vec<Row>,
    /// Empty means "derive from the first row".
    pub columns: Vec<String>,
}

impl ExportRequest {
    #[must_use]
    pub fn new(rows: Vec<Row>, columns: Vec<String>) -> Self {
        Self { rows, columns }
    }

    /// Request for a set of records in the canonical record column order.
    #[must_use]
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        Self {
            rows: records.into_iter().map(Record::to_row).collect(),
            columns: RECORD_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

/// Per-export settings.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Name the host should save the download under.
    pub filename: String,
    /// How long the staged payload outlives the hand-off.
    pub release_delay: Duration,
}

/// A staged, typed payload awaiting pickup by a host.
#[derive(Debug)]
pub struct DownloadHandle {
    file: NamedTempFile,
    mime_type: &'static str,
    len: usize,
}

impl DownloadHandle {
    /// Write `payload` to a fresh temporary file.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Io`] if the file cannot be created or written.
    pub fn stage(payload: &[u8], mime_type: &'static str) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("sift-download-")
            .suffix(".csv")
            .tempfile()?;
        file.write_all(payload)?;
        file.flush()?;
        debug!(path = %file.path().display(), bytes = payload.len(), "staged download");
        Ok(Self {
            file,
            mime_type,
            len: payload.len(),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    /// Payload size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Delete the staged file.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Io`] if the file cannot be removed.
    pub fn release(self) -> Result<()> {
        let path = self.file.path().to_path_buf();
        self.file.close()?;
        debug!(path = %path.display(), "released download");
        Ok(())
    }
}

/// Something that can take a staged download and deliver it under a name.
pub trait DownloadHost {
    /// Deliver the payload behind `handle` as `filename`. Returns where it
    /// ended up.
    ///
    /// # Errors
    ///
    /// Any error means the download did not happen.
    fn deliver(&self, handle: &DownloadHandle, filename: &str) -> Result<PathBuf>;
}

/// Highest `(n)` suffix tried before giving up on a taken name.
const MAX_NAME_SUFFIX: u32 = 999;

/// Delivers downloads by copying them into a directory.
///
/// Existing files are never overwritten: if `name.csv` is taken the
/// download is saved as `name (1).csv`, then `name (2).csv`, and so on.
#[derive(Debug, Clone)]
pub struct DirectoryHost {
    dir: PathBuf,
}

impl DirectoryHost {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadHost for DirectoryHost {
    fn deliver(&self, handle: &DownloadHandle, filename: &str) -> Result<PathBuf> {
        if filename.is_empty() || Path::new(filename).file_name() != Some(OsStr::new(filename)) {
            return Err(SiftError::Export(format!(
                "refusing to deliver to non-plain file name '{filename}'"
            )));
        }
        fs::create_dir_all(&self.dir)?;
        let name = Path::new(filename);
        let stem = name.file_stem().and_then(OsStr::to_str).unwrap_or(filename);
        let ext = name.extension().and_then(OsStr::to_str);

        for n in 0..=MAX_NAME_SUFFIX {
            let candidate = match (n, ext) {
                (0, _) => filename.to_string(),
                (_, Some(ext)) => format!("{stem} ({n}).{ext}"),
                (_, None) => format!("{stem} ({n})"),
            };
            let target = self.dir.join(&candidate);
            let mut out = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&target)
            {
                Ok(file) => file,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };
            io::copy(&mut fs::File::open(handle.path())?, &mut out)?;
            if n > 0 {
                debug!(
                    requested = filename,
                    saved_as = %candidate,
                    "name taken; renamed download"
                );
            }
            return Ok(target);
        }
        Err(SiftError::Export(format!(
            "no free name for '{filename}' in {}",
            self.dir.display()
        )))
    }
}

/// A pending release of a [`DownloadHandle`] running on a timer thread.
///
/// Dropping this detaches the timer; the release still happens unless the
/// process exits first. Call [`ScheduledRelease::wait`] before exiting.
#[derive(Debug)]
pub struct ScheduledRelease {
    staged: PathBuf,
    join: Option<JoinHandle<Result<()>>>,
}

impl ScheduledRelease {
    /// Release `handle` once `delay` has elapsed.
    #[must_use]
    pub fn schedule(handle: DownloadHandle, delay: Duration) -> Self {
        let staged = handle.path().to_path_buf();
        let spawned = thread::Builder::new()
            .name("sift-release".to_string())
            .spawn(move || {
                thread::sleep(delay);
                handle.release()
            });
        match spawned {
            Ok(join) => Self {
                staged,
                join: Some(join),
            },
            Err(e) => {
                // The closure, and the handle with it, was dropped: the
                // temp file is already gone.
                warn!(error = %e, "could not start release timer; released immediately");
                Self { staged, join: None }
            }
        }
    }

    /// Path of the staged payload this release will delete.
    #[must_use]
    pub fn staged_path(&self) -> &Path {
        &self.staged
    }

    /// Block until the release has run.
    ///
    /// # Errors
    ///
    /// Returns the release error, or [`SiftError::Export`] if the timer
    /// thread panicked.
    pub fn wait(mut self) -> Result<()> {
        match self.join.take() {
            Some(join) => join
                .join()
                .map_err(|_| SiftError::Export("release timer panicked".to_string()))?,
            None => Ok(()),
        }
    }
}

/// Outcome of a successful export.
#[derive(Debug)]
pub struct ExportReceipt {
    pub filename: String,
    pub delivered_to: PathBuf,
    /// Payload size including the byte-order mark.
    pub bytes: usize,
    pub release: ScheduledRelease,
}

/// Render `request` as CSV, stage it, and hand it to `host`.
///
/// On success the staged handle is released after
/// `options.release_delay`. If the host fails, the handle is released at
/// once and the host's error is returned.
///
/// # Errors
///
/// Staging and delivery errors from the environment.
pub fn export_csv<H: DownloadHost + ?Sized>(
    host: &H,
    request: ExportRequest,
    options: &ExportOptions,
) -> Result<ExportReceipt> {
    let csv = to_csv(&request.rows, &request.columns);
    let payload = encode_payload(&csv);
    let handle = DownloadHandle::stage(&payload, CSV_MIME_TYPE)?;
    let bytes = handle.len();

    match host.deliver(&handle, &options.filename) {
        Ok(delivered_to) => {
            debug!(
                filename = %options.filename,
                rows = request.rows.len(),
                bytes,
                delay_ms = options.release_delay.as_millis() as u64,
                "download handed off"
            );
            Ok(ExportReceipt {
                filename: options.filename.clone(),
                delivered_to,
                bytes,
                release: ScheduledRelease::schedule(handle, options.release_delay),
            })
        }
        Err(e) => {
            if let Err(release_err) = handle.release() {
                warn!(error = %release_err, "failed to release staged download");
            }
            Err(e)
        }
    }
}
