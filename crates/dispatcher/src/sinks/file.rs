//! FileSink - appends formatted lines to a text file

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use contracts::{MetricRecord, MetricSink, TrainlogError};
use tracing::debug;

use crate::format;

/// Sink that writes formatted metric lines to a file
///
/// Non-verbose construction performs no filesystem work at all; the
/// handle stays unopened and every operation is a no-op.
pub struct FileSink {
    name: String,
    path: PathBuf,
    file: Option<File>,
}

impl FileSink {
    /// Create a new FileSink
    ///
    /// Creates missing parent directories. Opens in truncate mode when
    /// `overwrite` is set or the file does not exist yet, else in
    /// append mode.
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
                file: None,
            });
        }

        let file = open_for_logging(&path, overwrite)?;
        Ok(Self {
            name,
            path,
            file: Some(file),
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

    fn write_line(&mut self, line: &str) -> Result<(), TrainlogError> {
        let file = match self.file.as_mut() {
            Some(file) => file,
            None => return Ok(()),
        };
        writeln!(file, "{line}").map_err(|e| TrainlogError::sink_write(&self.name, e.to_string()))
    }
}

impl MetricSink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn log(&mut self, tag: &str, step: u64, metrics: &MetricRecord) -> Result<(), TrainlogError> {
        self.write_line(&format::format_log_line(tag, step, metrics))
    }

    fn info(&mut self, message: &str) -> Result<(), TrainlogError> {
        self.write_line(&format::format_info_line(message))
    }

    fn close(&mut self) -> Result<(), TrainlogError> {
        if let Some(mut file) = self.file.take() {
            file.flush()
                .map_err(|e| TrainlogError::sink_write(&self.name, e.to_string()))?;
            debug!(sink = %self.name, path = %self.path.display(), "FileSink closed");
        }
        Ok(())
    }
}

/// Open `path` for line logging, creating parent directories
pub(crate) fn open_for_logging(path: &Path, overwrite: bool) -> Result<File, TrainlogError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = if overwrite || !path.is_file() {
        File::create(path)?
    } else {
        OpenOptions::new().append(true).open(path)?
    };
    Ok(file)
}

pub(crate) fn require_path_param(
    name: &str,
    params: &HashMap<String, String>,
) -> Result<PathBuf, TrainlogError> {
    params
        .get("path")
        .map(PathBuf::from)
        .ok_or_else(|| TrainlogError::sink_creation(name, "missing required param 'path'"))
}

pub(crate) fn parse_overwrite_param(
    name: &str,
    params: &HashMap<String, String>,
) -> Result<bool, TrainlogError> {
    match params.get("overwrite") {
        None => Ok(false),
        Some(raw) => raw.parse::<bool>().map_err(|_| {
            TrainlogError::sink_creation(name, format!("invalid 'overwrite' param: {raw:?}"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_sink_writes_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("train.log");

        let mut sink = FileSink::create("file", &path, true, true).unwrap();
        let metrics = MetricRecord::new().with("loss", 0.25);
        sink.log("train", 3, &metrics).unwrap();
        sink.info("epoch done").unwrap();
        sink.close().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("train -- step: 3  loss: 0.2500"));
        assert!(lines[1].ends_with("] epoch done"));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a/b/c/train.log");

        let _sink = FileSink::create("file", &path, false, true).unwrap();
        assert!(path.parent().unwrap().is_dir());
        assert!(path.is_file());
    }

    #[test]
    fn test_append_vs_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("train.log");

        let mut sink = FileSink::create("file", &path, false, true).unwrap();
        sink.info("first").unwrap();
        sink.close().unwrap();

        // overwrite=false appends to the existing file
        let mut sink = FileSink::create("file", &path, false, true).unwrap();
        sink.info("second").unwrap();
        sink.close().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);

        // overwrite=true truncates
        let mut sink = FileSink::create("file", &path, true, true).unwrap();
        sink.info("third").unwrap();
        sink.close().unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("third"));
    }

    #[test]
    fn test_non_verbose_touches_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("quiet/train.log");

        let mut sink = FileSink::create("file", &path, true, false).unwrap();
        sink.log("train", 0, &MetricRecord::new().with("loss", 1.0))
            .unwrap();
        sink.info("ignored").unwrap();
        sink.close().unwrap();

        assert!(!path.exists());
        assert!(!path.parent().unwrap().exists());
    }

    #[test]
    fn test_close_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("train.log");

        let mut sink = FileSink::create("file", &path, true, true).unwrap();
        sink.close().unwrap();
        sink.close().unwrap();
    }

    #[test]
    fn test_from_params_requires_path() {
        let params = HashMap::new();
        let err = FileSink::from_params("file", &params, true).unwrap_err();
        assert!(matches!(err, TrainlogError::SinkCreation { .. }));
    }

    #[test]
    fn test_from_params_rejects_bad_overwrite() {
        let params = HashMap::from([
            ("path".to_string(), "unused.log".to_string()),
            ("overwrite".to_string(), "yes".to_string()),
        ]);
        let err = FileSink::from_params("file", &params, true).unwrap_err();
        assert!(matches!(err, TrainlogError::SinkCreation { .. }));
    }
}
