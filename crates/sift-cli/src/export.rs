//! Glue between CLI commands and the CSV exporter.

use std::path::PathBuf;

use anyhow::{Context, Result};
use sift_core::{ExportSettings, Record};
use sift_export::{
    export_csv, export_filename_now, DirectoryHost, ExportOptions, ExportReceipt, ExportRequest,
};

/// Exports rows into a directory using names and delays from config.
pub struct Exporter {
    settings: ExportSettings,
    host: DirectoryHost,
}

impl Exporter {
    /// `out` overrides `settings.output_dir`.
    pub fn new(settings: &ExportSettings, out: Option<PathBuf>) -> Self {
        let dir = out.unwrap_or_else(|| settings.output_dir.clone());
        Self {
            settings: settings.clone(),
            host: DirectoryHost::new(dir),
        }
    }

    /// Export the items of a query result.
    pub fn results(
        &self,
        query: &str,
        items: &[Record],
        columns: &[String],
    ) -> Result<ExportReceipt> {
        self.export(&self.settings.results_prefix, query, items, columns)
    }

    /// Export the whole collection.
    pub fn records(&self, records: &[Record], columns: &[String]) -> Result<ExportReceipt> {
        self.export(&self.settings.records_prefix, "", records, columns)
    }

    fn export(
        &self,
        prefix: &str,
        query: &str,
        items: &[Record],
        columns: &[String],
    ) -> Result<ExportReceipt> {
        let mut request = ExportRequest::from_records(items);
        if !columns.is_empty() {
            request.columns = columns.to_vec();
        }
        let options = ExportOptions {
            filename: export_filename_now(prefix, query, &self.settings.empty_query_token),
            release_delay: self.settings.release_delay(),
        };
        tracing::info!(filename = %options.filename, rows = items.len(), "exporting");
        export_csv(&self.host, request, &options).context("export failed")
    }
}
