//! TensorboardSink - forwards scalar metrics to tensorboard event files
//!
//! The event writer is created lazily on the first `log` call so that
//! call's step can be handed to the backend as the purge boundary
//! (resume-from-earlier-step semantics).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use contracts::{MetricRecord, MetricSink, TrainlogError};
use tensorboard_rs::summary_writer::SummaryWriter;
use tracing::debug;

/// Scalar time-series backend
///
/// Seam between the sink and the event-file writer; tests substitute a
/// recording fake.
pub trait ScalarWriter: Send {
    /// Open a writer under `dir`, discarding points at or beyond
    /// `purge_step` where the backend supports it
    fn open(dir: &Path, purge_step: u64) -> Result<Self, TrainlogError>
    where
        Self: Sized;

    /// Record one scalar point
    fn add_scalar(&mut self, tag: &str, value: f32, step: usize);

    /// Flush pending event data
    fn flush(&mut self);
}

/// Production backend wrapping `tensorboard_rs::SummaryWriter`
///
/// tensorboard-rs has no native purge support; the boundary is traced
/// and the fresh event file written per run covers the restart case.
pub struct TbWriter {
    inner: SummaryWriter,
}

impl ScalarWriter for TbWriter {
    fn open(dir: &Path, purge_step: u64) -> Result<Self, TrainlogError> {
        debug!(dir = %dir.display(), purge_step, "opening tensorboard event writer");
        Ok(Self {
            inner: SummaryWriter::new(dir),
        })
    }

    fn add_scalar(&mut self, tag: &str, value: f32, step: usize) {
        self.inner.add_scalar(tag, value, step);
    }

    fn flush(&mut self) {
        let _ = self.inner.flush();
    }
}

/// Sink that records each metric as a scalar at `<tag>/<key>`
///
/// `info` is a no-op: event files have no free-text form.
pub struct TensorboardSink<W: ScalarWriter = TbWriter> {
    name: String,
    dir: PathBuf,
    verbose: bool,
    writer: Option<W>,
}

impl<W: ScalarWriter> TensorboardSink<W> {
    /// Create a new TensorboardSink writing event files under `dir`
    ///
    /// Creates the directory if absent.
    pub fn create(
        name: impl Into<String>,
        dir: impl Into<PathBuf>,
        verbose: bool,
    ) -> Result<Self, TrainlogError> {
        let name = name.into();
        let dir = dir.into();

        if verbose && !dir.is_dir() {
            fs::create_dir_all(&dir)?;
        }

        Ok(Self {
            name,
            dir,
            verbose,
            writer: None,
        })
    }

    /// Create from params map (for factory)
    ///
    /// Recognized params: `dir` (required).
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
        verbose: bool,
    ) -> Result<Self, TrainlogError> {
        let name = name.into();
        let dir = params
            .get("dir")
            .map(PathBuf::from)
            .ok_or_else(|| TrainlogError::sink_creation(&name, "missing required param 'dir'"))?;
        Self::create(name, dir, verbose)
    }

    /// Event-file directory of this sink
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl<W: ScalarWriter> MetricSink for TensorboardSink<W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn log(&mut self, tag: &str, step: u64, metrics: &MetricRecord) -> Result<(), TrainlogError> {
        if !self.verbose {
            return Ok(());
        }

        // Deferred until the first record so this step can serve as the
        // purge boundary for points left over from a previous run
        if self.writer.is_none() {
            self.writer = Some(W::open(&self.dir, step)?);
        }
        let writer = match self.writer.as_mut() {
            Some(writer) => writer,
            None => return Ok(()),
        };

        for (key, value) in metrics.iter() {
            match value.as_scalar() {
                Some(scalar) => {
                    writer.add_scalar(&format!("{tag}/{key}"), scalar as f32, step as usize);
                }
                None => {
                    debug!(sink = %self.name, key, "skipping non-scalar metric");
                }
            }
        }
        writer.flush();
        Ok(())
    }

    fn info(&mut self, _message: &str) -> Result<(), TrainlogError> {
        // Event files have no notion of free-text log lines
        Ok(())
    }

    fn close(&mut self) -> Result<(), TrainlogError> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush();
            debug!(sink = %self.name, dir = %self.dir.display(), "TensorboardSink closed");
        }
        Ok(())
    }
}
