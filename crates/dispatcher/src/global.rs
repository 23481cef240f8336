//! Process-wide convenience layer
//!
//! Holds at most one Dispatcher in a global slot. `init` installs it,
//! `log`/`info` delegate to it, and `shutdown` closes it and empties
//! the slot so tests (or a subsequent run) can initialize again.

use std::sync::{Mutex, MutexGuard, PoisonError};

use contracts::{MetricRecord, TrainlogError};

use crate::dispatcher::Dispatcher;
use crate::error::DispatcherError;

static GLOBAL_DISPATCHER: Mutex<Option<Dispatcher>> = Mutex::new(None);

fn slot() -> MutexGuard<'static, Option<Dispatcher>> {
    // A poisoned slot still holds a usable Option
    GLOBAL_DISPATCHER
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Install `dispatcher` as the process-wide default
///
/// # Errors
/// `AlreadyInitialized` when a dispatcher is already installed and
/// `shutdown` has not been called since.
pub fn init(dispatcher: Dispatcher) -> Result<(), TrainlogError> {
    let mut guard = slot();
    if guard.is_some() {
        return Err(TrainlogError::AlreadyInitialized);
    }
    tracing::info!(sinks = dispatcher.sink_count(), "global dispatcher installed");
    *guard = Some(dispatcher);
    Ok(())
}

/// Whether a global dispatcher is currently installed
pub fn is_initialized() -> bool {
    slot().is_some()
}

/// Log one metric record through the global dispatcher
///
/// # Errors
/// `NotInitialized` before `init`.
pub fn log(tag: &str, step: u64, metrics: &MetricRecord) -> Result<(), DispatcherError> {
    match slot().as_mut() {
        Some(dispatcher) => dispatcher.log(tag, step, metrics),
        None => Err(TrainlogError::NotInitialized.into()),
    }
}

/// Log one info line through the global dispatcher
///
/// # Errors
/// `NotInitialized` before `init`.
pub fn info(message: &str) -> Result<(), DispatcherError> {
    match slot().as_mut() {
        Some(dispatcher) => dispatcher.info(message),
        None => Err(TrainlogError::NotInitialized.into()),
    }
}

/// Close and remove the global dispatcher
///
/// Idempotent: calling without an installed dispatcher is a no-op.
/// After shutdown, `init` may be called again.
pub fn shutdown() -> Result<(), DispatcherError> {
    let taken = slot().take();
    match taken {
        Some(mut dispatcher) => {
            dispatcher.close()?;
            tracing::info!("global dispatcher shut down");
            Ok(())
        }
        None => Ok(()),
    }
}
