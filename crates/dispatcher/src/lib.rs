//! # Dispatcher
//!
//! 指标分发模块。
//!
//! 负责：
//! - 接收一次逻辑日志调用 (`log` / `info`)
//! - Fan-out 到多个 sinks (console / file / csv / tensorboard)
//! - 进程级全局便捷入口 (`global`)

pub mod dispatcher;
pub mod error;
pub mod format;
pub mod global;
pub mod metrics;
pub mod sinks;

pub use contracts::{MetricRecord, MetricSink, MetricValue};
pub use dispatcher::{
    create_dispatcher, from_blueprint, Dispatcher, DispatcherBuilder, DispatcherConfig,
};
pub use error::DispatcherError;
pub use metrics::SinkCounters;
pub use sinks::{ConsoleSink, CsvSink, FileSink};
#[cfg(feature = "tensorboard")]
pub use sinks::{ScalarWriter, TbWriter, TensorboardSink};
