//! # sift-export
//!
//! CSV export for sift result rows.
//!
//! - [`csv`] — cell stringification, field escaping, and `to_csv`
//! - [`filename`] — `<prefix>_<query>_<YYYYMMDD-HHMMSS>.csv` names
//! - [`download`] — staged download handles, hosts, and deferred release

pub mod csv;
pub mod download;
pub mod filename;

pub use csv::{cell_to_string, encode_payload, escape_field, needs_quotes, to_csv, CSV_MIME_TYPE};
pub use download::{
    export_csv, DirectoryHost, DownloadHandle, DownloadHost, ExportOptions, ExportReceipt,
    ExportRequest, ScheduledRelease,
};
pub use filename::{export_filename, export_filename_now, DEFAULT_EMPTY_QUERY_TOKEN};
