//! 配置校验模块
//!
//! 校验规则：
//! - sink name 非空且唯一
//! - file / csv sink 必须带 `path` 参数
//! - tensorboard sink 必须带 `dir` 参数
//! - `overwrite` 参数 (若存在) 必须是布尔值

use std::collections::HashSet;

use contracts::{LoggerBlueprint, SinkConfig, SinkType, TrainlogError};

/// 校验 LoggerBlueprint 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(blueprint: &LoggerBlueprint) -> Result<(), TrainlogError> {
    validate_sink_names(blueprint)?;
    for (idx, sink) in blueprint.sinks.iter().enumerate() {
        validate_sink_params(idx, sink)?;
    }
    Ok(())
}

/// 校验 sink name 非空且全局唯一
fn validate_sink_names(blueprint: &LoggerBlueprint) -> Result<(), TrainlogError> {
    let mut seen = HashSet::new();
    for (idx, sink) in blueprint.sinks.iter().enumerate() {
        if sink.name.is_empty() {
            return Err(TrainlogError::config_validation(
                format!("sinks[{idx}].name"),
                "sink name cannot be empty",
            ));
        }
        if !seen.insert(&sink.name) {
            return Err(TrainlogError::config_validation(
                format!("sinks[{idx}].name"),
                format!("duplicate sink name '{}'", sink.name),
            ));
        }
    }
    Ok(())
}

/// 校验类型特定参数
fn validate_sink_params(idx: usize, sink: &SinkConfig) -> Result<(), TrainlogError> {
    match sink.sink_type {
        SinkType::Console => {}
        SinkType::File | SinkType::Csv => {
            if !sink.params.contains_key("path") {
                return Err(TrainlogError::config_validation(
                    format!("sinks[{idx}].params.path"),
                    "file/csv sinks require a 'path' param",
                ));
            }
        }
        SinkType::Tensorboard => {
            if !sink.params.contains_key("dir") {
                return Err(TrainlogError::config_validation(
                    format!("sinks[{idx}].params.dir"),
                    "tensorboard sinks require a 'dir' param",
                ));
            }
        }
    }

    if let Some(raw) = sink.params.get("overwrite") {
        if raw.parse::<bool>().is_err() {
            return Err(TrainlogError::config_validation(
                format!("sinks[{idx}].params.overwrite"),
                format!("must be 'true' or 'false', got {raw:?}"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::ConfigVersion;

    fn blueprint(sinks: Vec<SinkConfig>) -> LoggerBlueprint {
        LoggerBlueprint {
            version: ConfigVersion::V1,
            sinks,
        }
    }

    #[test]
    fn test_valid_blueprint_passes() {
        let bp = blueprint(vec![
            SinkConfig::console("stdout"),
            SinkConfig::file("log", "out/train.log"),
            SinkConfig::csv("csv", "out/metrics.csv").overwrite(true),
            SinkConfig::tensorboard("tb", "out/runs"),
        ]);
        assert!(validate(&bp).is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let bp = blueprint(vec![SinkConfig::console("")]);
        let err = validate(&bp).unwrap_err();
        assert!(matches!(err, TrainlogError::ConfigValidation { .. }));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let bp = blueprint(vec![
            SinkConfig::console("out"),
            SinkConfig::file("out", "train.log"),
        ]);
        let err = validate(&bp).unwrap_err();
        assert!(matches!(err, TrainlogError::ConfigValidation { .. }));
    }

    #[test]
    fn test_missing_path_rejected() {
        let mut sink = SinkConfig::file("log", "train.log");
        sink.params.remove("path");
        let err = validate(&blueprint(vec![sink])).unwrap_err();
        assert!(matches!(err, TrainlogError::ConfigValidation { .. }));
    }

    #[test]
    fn test_missing_dir_rejected() {
        let mut sink = SinkConfig::tensorboard("tb", "runs");
        sink.params.remove("dir");
        let err = validate(&blueprint(vec![sink])).unwrap_err();
        assert!(matches!(err, TrainlogError::ConfigValidation { .. }));
    }

    #[test]
    fn test_bad_overwrite_rejected() {
        let mut sink = SinkConfig::csv("csv", "m.csv");
        sink.params
            .insert("overwrite".to_string(), "yes".to_string());
        let err = validate(&blueprint(vec![sink])).unwrap_err();
        assert!(matches!(err, TrainlogError::ConfigValidation { .. }));
    }
}
