//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Data Model
//! - A metric record is an ordered `key -> MetricValue` mapping
//! - `tag` names a logical metric stream (e.g. "train"), `step` is a
//!   caller-supplied ordinal within that stream (not enforced monotonic)

mod blueprint;
mod error;
mod record;
mod sink;

pub use blueprint::*;
pub use error::*;
pub use record::{MetricRecord, MetricValue};
pub use sink::MetricSink;
