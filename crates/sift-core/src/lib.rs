//! # sift-core
//!
//! Core types shared by the sift crates:
//! - [`Record`] and [`RecordId`] — the searchable entity
//! - [`Row`] — an ordered column → value mapping used for export
//! - [`default_records`] — the compiled-in record collection
//! - Error hierarchy ([`SiftError`])
//! - Configuration ([`SiftConfig`])

pub mod config;
pub mod dataset;
pub mod error;
pub mod record;

pub use config::{ExportSettings, SiftConfig};
pub use dataset::default_records;
pub use error::{Result, SiftError};
pub use record::{canonical_number, format_score, Record, RecordId, Row, RECORD_COLUMNS};
