//! Dispatcher - fans one logical log call out to all configured sinks

use tracing::{debug, error, info, instrument};

use contracts::{LoggerBlueprint, MetricRecord, MetricSink, SinkConfig, SinkType};

use crate::error::DispatcherError;
use crate::metrics::SinkCounters;
use crate::sinks::{ConsoleSink, CsvSink, FileSink};

/// Dispatcher configuration
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Sink configurations
    pub sinks: Vec<SinkConfig>,
}

/// Builder for creating a Dispatcher
pub struct DispatcherBuilder {
    config: DispatcherConfig,
}

impl DispatcherBuilder {
    /// Create a new DispatcherBuilder
    pub fn new(config: DispatcherConfig) -> Self {
        Self { config }
    }

    /// Build the dispatcher, constructing every configured sink
    #[instrument(
        name = "dispatcher_builder_build",
        skip(self),
        fields(sink_count = self.config.sinks.len())
    )]
    pub fn build(self) -> Result<Dispatcher, DispatcherError> {
        let mut sinks = Vec::with_capacity(self.config.sinks.len());
        for sink_config in &self.config.sinks {
            sinks.push(create_sink(sink_config)?);
        }
        Ok(Dispatcher::with_sinks(sinks))
    }
}

/// Create a sink from configuration
#[instrument(
    name = "dispatcher_create_sink",
    skip(config),
    fields(sink = %config.name, sink_type = ?config.sink_type)
)]
fn create_sink(config: &SinkConfig) -> Result<Box<dyn MetricSink>, DispatcherError> {
    match config.sink_type {
        SinkType::Console => Ok(Box::new(ConsoleSink::new(&config.name, config.verbose))),
        SinkType::File => {
            let sink = FileSink::from_params(&config.name, &config.params, config.verbose)
                .map_err(|e| DispatcherError::sink_creation(&config.name, e.to_string()))?;
            Ok(Box::new(sink))
        }
        SinkType::Csv => {
            let sink = CsvSink::from_params(&config.name, &config.params, config.verbose)
                .map_err(|e| DispatcherError::sink_creation(&config.name, e.to_string()))?;
            Ok(Box::new(sink))
        }
        #[cfg(feature = "tensorboard")]
        SinkType::Tensorboard => {
            use crate::sinks::{TbWriter, TensorboardSink};
            let sink =
                TensorboardSink::<TbWriter>::from_params(&config.name, &config.params, config.verbose)
                    .map_err(|e| DispatcherError::sink_creation(&config.name, e.to_string()))?;
            Ok(Box::new(sink))
        }
        #[cfg(not(feature = "tensorboard"))]
        SinkType::Tensorboard => Err(DispatcherError::sink_creation(
            &config.name,
            "tensorboard support not compiled in (enable the `tensorboard` feature)",
        )),
    }
}

struct SinkEntry {
    sink: Box<dyn MetricSink>,
    counters: SinkCounters,
}

/// The Dispatcher that fans calls out to its owned sinks
///
/// Sinks are invoked in configuration order; the first failing sink
/// aborts the remaining fan-out and the error propagates. Dropping a
/// dispatcher that was never closed closes all sinks (errors are
/// traced, not propagated).
pub struct Dispatcher {
    sinks: Vec<SinkEntry>,
    closed: bool,
}

impl Dispatcher {
    /// Create a dispatcher from already-constructed sinks
    pub fn with_sinks(sinks: Vec<Box<dyn MetricSink>>) -> Self {
        info!(sinks = sinks.len(), "Dispatcher created");
        Self {
            sinks: sinks
                .into_iter()
                .map(|sink| SinkEntry {
                    sink,
                    counters: SinkCounters::new(),
                })
                .collect(),
            closed: false,
        }
    }

    /// Number of owned sinks
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Counters for all sinks, in configuration order
    pub fn counters(&self) -> Vec<(String, SinkCounters)> {
        self.sinks
            .iter()
            .map(|entry| (entry.sink.name().to_string(), entry.counters))
            .collect()
    }

    /// Fan one metric record out to every sink, in order
    pub fn log(
        &mut self,
        tag: &str,
        step: u64,
        metrics: &MetricRecord,
    ) -> Result<(), DispatcherError> {
        for entry in &mut self.sinks {
            match entry.sink.log(tag, step, metrics) {
                Ok(()) => entry.counters.inc_records(),
                Err(e) => {
                    entry.counters.inc_failures();
                    return Err(e.into());
                }
            }
        }
        Ok(())
    }

    /// Fan one info line out to every sink, in order
    pub fn info(&mut self, message: &str) -> Result<(), DispatcherError> {
        for entry in &mut self.sinks {
            match entry.sink.info(message) {
                Ok(()) => entry.counters.inc_infos(),
                Err(e) => {
                    entry.counters.inc_failures();
                    return Err(e.into());
                }
            }
        }
        Ok(())
    }

    /// Close every sink, in order
    ///
    /// The dispatcher is considered closed even when a sink fails;
    /// `Drop` will not retry.
    #[instrument(name = "dispatcher_close", skip(self))]
    pub fn close(&mut self) -> Result<(), DispatcherError> {
        self.closed = true;
        for entry in &mut self.sinks {
            entry.sink.close()?;
        }
        debug!("Dispatcher closed");
        Ok(())
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        for entry in &mut self.sinks {
            if let Err(e) = entry.sink.close() {
                error!(sink = %entry.sink.name(), error = %e, "close failed on drop");
            }
        }
    }
}

/// Convenience function to create a dispatcher from sink configs
#[instrument(name = "dispatcher_create", skip(sink_configs))]
pub fn create_dispatcher(sink_configs: Vec<SinkConfig>) -> Result<Dispatcher, DispatcherError> {
    let config = DispatcherConfig {
        sinks: sink_configs,
    };
    DispatcherBuilder::new(config).build()
}

/// Create a dispatcher from a loaded blueprint
pub fn from_blueprint(blueprint: &LoggerBlueprint) -> Result<Dispatcher, DispatcherError> {
    create_dispatcher(blueprint.sinks.clone())
}
