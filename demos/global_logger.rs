//! Global Logger Demo
//!
//! Shows the process-wide convenience layer: install a dispatcher once,
//! then call `global::log` / `global::info` from anywhere.
//!
//! Run with: cargo run --bin global_logger

use anyhow::Result;
use contracts::{MetricRecord, SinkConfig};
use dispatcher::{create_dispatcher, global};

fn main() -> Result<()> {
    observability::init()?;

    let dispatcher = create_dispatcher(vec![
        SinkConfig::console("stdout"),
        SinkConfig::file("train_log", "output/global.log").overwrite(true),
    ])?;
    global::init(dispatcher)?;

    train_one_epoch(0)?;
    global::info("epoch 0 done")?;

    global::shutdown()?;
    Ok(())
}

fn train_one_epoch(epoch: u64) -> Result<()> {
    for step in 0..5u64 {
        let metrics = MetricRecord::new()
            .with("loss", 1.0 / (step as f64 + 1.0))
            .with("epoch", epoch as i64);
        global::log("train", step, &metrics)?;
    }
    Ok(())
}
