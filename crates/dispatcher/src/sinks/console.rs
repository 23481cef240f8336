//! ConsoleSink - writes formatted lines to stdout

use std::io::{self, Write};

use contracts::{MetricRecord, MetricSink, TrainlogError};
use tracing::debug;

use crate::format;

/// Sink that prints formatted metric lines to stdout
pub struct ConsoleSink {
    name: String,
    verbose: bool,
}

impl ConsoleSink {
    /// Create a new ConsoleSink
    pub fn new(name: impl Into<String>, verbose: bool) -> Self {
        Self {
            name: name.into(),
            verbose,
        }
    }

    fn write_line(&self, line: &str) -> Result<(), TrainlogError> {
        let mut out = io::stdout().lock();
        writeln!(out, "{line}").map_err(|e| TrainlogError::sink_write(&self.name, e.to_string()))
    }
}

impl MetricSink for ConsoleSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn log(&mut self, tag: &str, step: u64, metrics: &MetricRecord) -> Result<(), TrainlogError> {
        if !self.verbose {
            return Ok(());
        }
        self.write_line(&format::format_log_line(tag, step, metrics))
    }

    fn info(&mut self, message: &str) -> Result<(), TrainlogError> {
        if !self.verbose {
            return Ok(());
        }
        self.write_line(&format::format_info_line(message))
    }

    fn close(&mut self) -> Result<(), TrainlogError> {
        debug!(sink = %self.name, "ConsoleSink closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_sink_log() {
        let mut sink = ConsoleSink::new("stdout", true);
        let metrics = MetricRecord::new().with("loss", 0.5);

        assert!(sink.log("train", 1, &metrics).is_ok());
        assert!(sink.info("hello").is_ok());
        assert!(sink.close().is_ok());
    }

    #[test]
    fn test_console_sink_name() {
        let sink = ConsoleSink::new("my_console", true);
        assert_eq!(sink.name(), "my_console");
    }

    #[test]
    fn test_non_verbose_is_noop() {
        let mut sink = ConsoleSink::new("quiet", false);
        assert!(sink.log("train", 1, &MetricRecord::new()).is_ok());
        assert!(sink.info("ignored").is_ok());
    }
}
