//! Sink implementations
//!
//! Contains ConsoleSink, FileSink, CsvSink, and (feature-gated)
//! TensorboardSink.

mod console;
mod csv;
mod file;
#[cfg(feature = "tensorboard")]
mod tensorboard;

pub use self::console::ConsoleSink;
pub use self::csv::CsvSink;
pub use self::file::FileSink;
#[cfg(feature = "tensorboard")]
pub use self::tensorboard::{ScalarWriter, TbWriter, TensorboardSink};
