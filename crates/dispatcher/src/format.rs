//! Shared line formatting for the text sinks
//!
//! Console and file output share one format by composition:
//! `[<utc ts, ms>] <tag> -- step: <step>  <k1>: <v1>  <k2>: <v2>`
//! with two spaces between fields.

use chrono::Utc;
use contracts::{MetricRecord, MetricValue};

/// UTC timestamp with millisecond precision, `YYYY-MM-DD HH:MM:SS.mmm`
pub fn timestamp_utc_millis() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// Presentation form of a metric value for text sinks
///
/// Floats use 4 decimal places, or 4-significant-digit scientific
/// notation when `|v| < 0.0001`. Other values use their plain form.
pub fn format_value(value: &MetricValue) -> String {
    match value {
        MetricValue::Float(v) => format_float(*v),
        MetricValue::Int(v) => v.to_string(),
        MetricValue::Text(v) => v.clone(),
    }
}

fn format_float(v: f64) -> String {
    if v.abs() < 1e-4 {
        format_scientific(v)
    } else {
        format!("{v:.4}")
    }
}

/// `{:.4e}` renders `5e-5`; normalize the exponent to a signed two-digit
/// form (`5.0000e-05`) so downstream tooling can parse a fixed shape.
fn format_scientific(v: f64) -> String {
    let raw = format!("{v:.4e}");
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exponent.abs())
        }
        None => raw,
    }
}

/// One metric record as a text line (without trailing newline)
pub fn format_log_line(tag: &str, step: u64, metrics: &MetricRecord) -> String {
    let mut line = format!("[{}] {} -- step: {}", timestamp_utc_millis(), tag, step);
    for (key, value) in metrics.iter() {
        line.push_str("  ");
        line.push_str(key);
        line.push_str(": ");
        line.push_str(&format_value(value));
    }
    line
}

/// One free-text message as a text line (without trailing newline)
pub fn format_info_line(message: &str) -> String {
    format!("[{}] {}", timestamp_utc_millis(), message)
}
