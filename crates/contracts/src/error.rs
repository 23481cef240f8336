//! Layered error definitions
//!
//! Categorized by source: config / sink / global state / io

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum TrainlogError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Sink Errors =====
    /// Sink creation error
    #[error("failed to create sink '{sink_name}': {message}")]
    SinkCreation { sink_name: String, message: String },

    /// Sink write error
    #[error("sink '{sink_name}' write error: {message}")]
    SinkWrite { sink_name: String, message: String },

    /// CSV record keys do not match the established header
    #[error("sink '{sink_name}' schema mismatch: header columns {expected:?}, record keys {got:?}")]
    SchemaMismatch {
        sink_name: String,
        expected: Vec<String>,
        got: Vec<String>,
    },

    // ===== Global State Errors =====
    /// The global dispatcher was initialized twice
    #[error("global dispatcher has already been initialized")]
    AlreadyInitialized,

    /// A global log/info call arrived before init
    #[error("global dispatcher not initialized, call init() first")]
    NotInitialized,

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl TrainlogError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create sink creation error
    pub fn sink_creation(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkCreation {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }

    /// Create sink write error
    pub fn sink_write(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkWrite {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }

    /// Create schema mismatch error
    pub fn schema_mismatch(
        sink_name: impl Into<String>,
        expected: Vec<String>,
        got: Vec<String>,
    ) -> Self {
        Self::SchemaMismatch {
            sink_name: sink_name.into(),
            expected,
            got,
        }
    }
}
