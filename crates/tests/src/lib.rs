//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - 配置 -> Dispatcher -> 落盘 的 e2e 测试

#[cfg(test)]
mod contract_tests {
    use contracts::{MetricRecord, MetricValue};

    #[test]
    fn test_contracts_compile() {
        // 验证 contracts crate 可编译
        let _ = contracts::ConfigVersion::V1;
    }

    #[test]
    fn test_record_builder_surface() {
        let record = MetricRecord::new()
            .with("loss", 0.5)
            .with("epoch", 2i64)
            .with("phase", "warmup");
        assert_eq!(record.get("loss"), Some(&MetricValue::Float(0.5)));
        assert_eq!(record.keys().count(), 3);
    }
}

#[cfg(test)]
mod observability_tests {
    use observability::{init_with_config, LogFormat, ObservabilityConfig};

    #[test]
    fn test_tracing_init_once() {
        let first = init_with_config(ObservabilityConfig {
            log_format: LogFormat::Compact,
            default_log_level: "warn".to_string(),
        });
        assert!(first.is_ok());

        // a second subscriber in the same process is rejected, not a panic
        assert!(observability::init().is_err());
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::fs;

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::MetricRecord;
    use dispatcher::from_blueprint;
    use tempfile::tempdir;

    /// End-to-end test: TOML config -> Dispatcher -> files on disk
    ///
    /// 验证完整的数据流：
    /// 1. ConfigLoader 解析 sink 配置
    /// 2. Dispatcher 将每次 log 调用分发到所有 sinks
    /// 3. file sink 与 csv sink 的落盘内容一致对齐
    #[test]
    fn test_e2e_config_to_disk() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("output/train.log");
        let csv_path = dir.path().join("output/metrics.csv");

        let config = format!(
            r#"
[[sinks]]
name = "train_log"
sink_type = "file"
[sinks.params]
path = "{}"
overwrite = "true"

[[sinks]]
name = "metrics"
sink_type = "csv"
[sinks.params]
path = "{}"
"#,
            log_path.display(),
            csv_path.display()
        );

        let blueprint = ConfigLoader::load_from_str(&config, ConfigFormat::Toml).unwrap();
        let mut dispatcher = from_blueprint(&blueprint).unwrap();
        assert_eq!(dispatcher.sink_count(), 2);

        // A small training loop: 2 epochs x 5 steps
        for epoch in 0..2u64 {
            for step in 0..5u64 {
                let global_step = epoch * 5 + step;
                let metrics = MetricRecord::new()
                    .with("lr", 0.001 / (global_step as f64 + 1.0))
                    .with("loss", 100.0 / (global_step as f64 + 1.0));
                dispatcher.log("train", global_step, &metrics).unwrap();
            }
            dispatcher.info(&format!("Completed epoch {epoch}")).unwrap();
        }
        dispatcher.close().unwrap();

        // text log: 10 metric lines + 2 info lines
        let log_content = fs::read_to_string(&log_path).unwrap();
        assert_eq!(log_content.lines().count(), 12);
        assert!(log_content.contains("train -- step: 0  lr: 0.0010  loss: 100.0000"));
        assert!(log_content.contains("] Completed epoch 1"));

        // csv: header + 10 rows, info lines do not appear
        let csv_content = fs::read_to_string(&csv_path).unwrap();
        let mut lines = csv_content.lines();
        assert_eq!(lines.next(), Some("timestamp,tag,step,lr,loss"));
        assert_eq!(lines.count(), 10);
    }

    /// Resumed run: csv header recovery + file append across instances
    #[test]
    fn test_e2e_resume_appends() {
        let dir = tempdir().unwrap();
        let csv_path = dir.path().join("metrics.csv");
        let csv_param = csv_path.display().to_string();

        let first_run = vec![contracts::SinkConfig::csv("metrics", &csv_param)];
        let mut dispatcher = dispatcher::create_dispatcher(first_run).unwrap();
        dispatcher
            .log("train", 0, &MetricRecord::new().with("loss", 2.0).with("lr", 0.1))
            .unwrap();
        dispatcher.close().unwrap();

        // restart with keys in a different order; rows stay aligned to the
        // header the first run established
        let second_run = vec![contracts::SinkConfig::csv("metrics", &csv_param)];
        let mut dispatcher = dispatcher::create_dispatcher(second_run).unwrap();
        dispatcher
            .log("train", 1, &MetricRecord::new().with("lr", 0.05).with("loss", 1.0))
            .unwrap();
        dispatcher.close().unwrap();

        let content = fs::read_to_string(&csv_path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "timestamp,tag,step,loss,lr");
        assert!(lines[1].ends_with(",2,0.1"));
        assert!(lines[2].ends_with(",1,0.05"));
    }

    /// Non-verbose sinks leave the filesystem untouched end to end
    #[test]
    fn test_e2e_silent_run() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("quiet/train.log");

        let configs = vec![
            contracts::SinkConfig::file("train_log", log_path.display().to_string())
                .verbose(false),
        ];
        let mut dispatcher = dispatcher::create_dispatcher(configs).unwrap();
        dispatcher
            .log("train", 0, &MetricRecord::new().with("loss", 1.0))
            .unwrap();
        dispatcher.close().unwrap();

        assert!(!log_path.exists());
        assert!(!dir.path().join("quiet").exists());
    }
}
