//! LoggerBlueprint - Config Loader output
//!
//! Describes the full set of output sinks a training run logs to.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete logger configuration blueprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerBlueprint {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Output sink configurations, in fan-out order
    pub sinks: Vec<SinkConfig>,
}

/// Sink output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Sink name
    pub name: String,

    /// Sink type
    pub sink_type: SinkType,

    /// When false the sink is constructed inert: no resource is opened
    /// and every operation is a no-op
    #[serde(default = "default_verbose")]
    pub verbose: bool,

    /// Type-specific parameters (`path`, `overwrite`, `dir`)
    #[serde(default)]
    pub params: HashMap<String, String>,
}

fn default_verbose() -> bool {
    true
}

impl SinkConfig {
    /// Config for a console sink
    pub fn console(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sink_type: SinkType::Console,
            verbose: true,
            params: HashMap::new(),
        }
    }

    /// Config for a file sink writing to `path`
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sink_type: SinkType::File,
            verbose: true,
            params: HashMap::from([("path".to_string(), path.into())]),
        }
    }

    /// Config for a CSV sink writing to `path`
    pub fn csv(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sink_type: SinkType::Csv,
            verbose: true,
            params: HashMap::from([("path".to_string(), path.into())]),
        }
    }

    /// Config for a tensorboard sink writing event files under `dir`
    pub fn tensorboard(name: impl Into<String>, dir: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sink_type: SinkType::Tensorboard,
            verbose: true,
            params: HashMap::from([("dir".to_string(), dir.into())]),
        }
    }

    /// Set the overwrite flag (file/csv sinks)
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.params
            .insert("overwrite".to_string(), overwrite.to_string());
        self
    }

    /// Set the verbosity flag
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Sink type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkType {
    /// Formatted lines to stdout
    Console,
    /// Formatted lines appended to a text file
    File,
    /// Structured rows appended to a delimited file
    Csv,
    /// Scalars forwarded to tensorboard event files
    Tensorboard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_defaults_on() {
        let config: SinkConfig =
            serde_json::from_str(r#"{ "name": "out", "sink_type": "console" }"#).unwrap();
        assert!(config.verbose);
        assert!(config.params.is_empty());
    }

    #[test]
    fn test_sink_type_snake_case() {
        let config: SinkConfig = serde_json::from_str(
            r#"{ "name": "tb", "sink_type": "tensorboard", "params": { "dir": "runs" } }"#,
        )
        .unwrap();
        assert_eq!(config.sink_type, SinkType::Tensorboard);
        assert_eq!(config.params.get("dir").map(String::as_str), Some("runs"));
    }

    #[test]
    fn test_builder_helpers() {
        let config = SinkConfig::csv("metrics", "out/m.csv")
            .overwrite(true)
            .verbose(false);
        assert_eq!(config.sink_type, SinkType::Csv);
        assert!(!config.verbose);
        assert_eq!(
            config.params.get("overwrite").map(String::as_str),
            Some("true")
        );
    }
}
