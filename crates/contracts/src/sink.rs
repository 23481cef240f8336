//! MetricSink trait - Dispatcher output interface
//!
//! Defines the abstract interface for sinks. All sink operations are
//! direct blocking I/O on the caller's thread; there are no suspension
//! points and no internal locking.

use crate::{MetricRecord, TrainlogError};

/// Metric output trait
///
/// All sink implementations must implement this trait. `Send` so a
/// dispatcher can live in the process-wide slot of `dispatcher::global`.
pub trait MetricSink: Send {
    /// Sink name (used for logging/counters)
    fn name(&self) -> &str;

    /// Emit one metric record for `tag` at `step`
    ///
    /// # Errors
    /// Returns write error (should include context)
    fn log(&mut self, tag: &str, step: u64, metrics: &MetricRecord) -> Result<(), TrainlogError>;

    /// Emit a free-text status line
    ///
    /// Sinks with no notion of free text (CSV, tensorboard) implement
    /// this as a no-op.
    fn info(&mut self, message: &str) -> Result<(), TrainlogError>;

    /// Close the sink, releasing its underlying resource
    fn close(&mut self) -> Result<(), TrainlogError>;
}
