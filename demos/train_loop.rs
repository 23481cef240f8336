//! Train Loop Demo
//!
//! Builds a dispatcher from an inline sink list (or a TOML/JSON config
//! passed as the first argument) and runs a small fake training loop.
//!
//! Run with: cargo run --bin train_loop

use anyhow::Result;
use config_loader::ConfigLoader;
use contracts::{LoggerBlueprint, MetricRecord, SinkConfig};
use dispatcher::from_blueprint;
use observability::{LogFormat, ObservabilityConfig};

fn main() -> Result<()> {
    observability::init_with_config(ObservabilityConfig {
        log_format: LogFormat::Compact,
        default_log_level: "info".to_string(),
    })?;

    let blueprint = if let Some(path) = std::env::args().nth(1) {
        tracing::info!(path = %path, "Loading logger config");
        ConfigLoader::load_from_path(std::path::Path::new(&path))?
    } else {
        default_blueprint()
    };

    let mut logger = from_blueprint(&blueprint)?;

    for epoch in 0..10u64 {
        for step in 0..5u64 {
            let global_step = epoch * 5 + step;
            let metrics = MetricRecord::new()
                .with("lr", 0.001 / (global_step as f64 + 1.0))
                .with("loss", 100.0 / (global_step as f64 + 1.0));
            logger.log("train", global_step, &metrics)?;
        }
        logger.info(&format!("Completed epoch {epoch}"))?;
    }

    for (name, counters) in logger.counters() {
        tracing::info!(
            sink = %name,
            records = counters.records_logged,
            infos = counters.infos_logged,
            failures = counters.failure_count,
            "sink totals"
        );
    }

    logger.close()?;
    Ok(())
}

fn default_blueprint() -> LoggerBlueprint {
    LoggerBlueprint {
        version: Default::default(),
        sinks: vec![
            SinkConfig::console("stdout"),
            SinkConfig::file("train_log", "output/train.log").overwrite(true),
            SinkConfig::csv("metrics", "output/metrics.csv"),
        ],
    }
}
