//! CsvSink - appends structured rows to a delimited file
//!
//! Column order is fixed once: either recovered from an existing file's
//! header row, or derived from the first record written. The fixed
//! columns `timestamp`, `tag`, `step` always come first.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::{Path, PathBuf};

use contracts::{MetricRecord, MetricSink, TrainlogError};
use tracing::debug;

use crate::format;
use crate::sinks::file::{open_for_logging, parse_overwrite_param, require_path_param};

/// Columns present in every row, ahead of the metric keys
const FIXED_COLUMNS: [&str; 3] = ["timestamp", "tag", "step"];

/// Sink that writes one CSV row per metric record
///
/// A record whose key set does not match the established header fails
/// with `SchemaMismatch`; nothing is written for that call.
pub struct CsvSink {
    name: String,
    path: PathBuf,
    writer: Option<csv::Writer<File>>,
    /// Full column order, fixed columns included. `None` until the
    /// header is recovered or the first record arrives.
    header: Option<Vec<String>>,
    /// Whether the header row is already present in the file
    header_written: bool,
}

impl CsvSink {
    /// Create a new CsvSink
    ///
    /// Creates missing parent directories. When the file exists and
    /// `overwrite` is false, its header row is read back to pin the
    /// column order and new rows are appended.
    pub fn create(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        overwrite: bool,
        verbose: bool,
    ) -> Result<Self, TrainlogError> {
        let name = name.into();
        let path = path.into();

        if !verbose {
            return Ok(Self {
                name,
                path,
                writer: None,
                header: None,
                header_written: false,
            });
        }

        let header = if path.is_file() && !overwrite {
            read_existing_header(&name, &path)?
        } else {
            None
        };

        let file = open_for_logging(&path, overwrite)?;
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        let header_written = header.is_some();

        Ok(Self {
            name,
            path,
            writer: Some(writer),
            header,
            header_written,
        })
    }

    /// Create from params map (for factory)
    ///
    /// Recognized params: `path` (required), `overwrite` (bool, default false).
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
        verbose: bool,
    ) -> Result<Self, TrainlogError> {
        let name = name.into();
        let path = require_path_param(&name, params)?;
        let overwrite = parse_overwrite_param(&name, params)?;
        Self::create(name, path, overwrite, verbose)
    }

    /// Target path of this sink
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_schema(&self, header: &[String], metrics: &MetricRecord) -> Result<(), TrainlogError> {
        let expected: HashSet<&str> = header
            .iter()
            .skip(FIXED_COLUMNS.len())
            .map(String::as_str)
            .collect();
        let got: HashSet<&str> = metrics.keys().collect();
        if expected == got {
            return Ok(());
        }
        Err(TrainlogError::schema_mismatch(
            &self.name,
            header.iter().skip(FIXED_COLUMNS.len()).cloned().collect(),
            metrics.keys().map(String::from).collect(),
        ))
    }
}

impl MetricSink for CsvSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn log(&mut self, tag: &str, step: u64, metrics: &MetricRecord) -> Result<(), TrainlogError> {
        if self.writer.is_none() {
            return Ok(());
        }

        // Fix the column order on the first record
        if self.header.is_none() {
            let mut header: Vec<String> =
                FIXED_COLUMNS.iter().map(|c| c.to_string()).collect();
            header.extend(metrics.keys().map(String::from));
            self.header = Some(header);
        }

        let header = self.header.clone().unwrap_or_default();
        self.check_schema(&header, metrics)?;

        let writer = match self.writer.as_mut() {
            Some(writer) => writer,
            None => return Ok(()),
        };

        if !self.header_written {
            writer
                .write_record(&header)
                .map_err(|e| TrainlogError::sink_write(&self.name, e.to_string()))?;
            self.header_written = true;
        }

        let mut row = Vec::with_capacity(header.len());
        row.push(format::timestamp_utc_millis());
        row.push(tag.to_string());
        row.push(step.to_string());
        for column in header.iter().skip(FIXED_COLUMNS.len()) {
            // check_schema guarantees every column is present
            let cell = metrics.get(column).map(|v| v.to_string()).unwrap_or_default();
            row.push(cell);
        }

        writer
            .write_record(&row)
            .map_err(|e| TrainlogError::sink_write(&self.name, e.to_string()))?;
        writer
            .flush()
            .map_err(|e| TrainlogError::sink_write(&self.name, e.to_string()))?;
        Ok(())
    }

    fn info(&mut self, _message: &str) -> Result<(), TrainlogError> {
        // CSV rows have no free-text form
        Ok(())
    }

    fn close(&mut self) -> Result<(), TrainlogError> {
        if let Some(mut writer) = self.writer.take() {
            writer
                .flush()
                .map_err(|e| TrainlogError::sink_write(&self.name, e.to_string()))?;
            debug!(sink = %self.name, path = %self.path.display(), "CsvSink closed");
        }
        Ok(())
    }
}

/// Read just the header row of an existing CSV file
///
/// An empty file yields `None` (the header is derived from the first
/// record instead).
fn read_existing_header(name: &str, path: &Path) -> Result<Option<Vec<String>>, TrainlogError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| TrainlogError::sink_creation(name, e.to_string()))?;
    let headers = reader
        .headers()
        .map_err(|e| TrainlogError::sink_creation(name, e.to_string()))?;

    if headers.is_empty() {
        return Ok(None);
    }
    Ok(Some(headers.iter().map(String::from).collect()))
}
