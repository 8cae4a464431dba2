//! `tracing` subscriber installation for hosts embedding the engine.
//!
//! The engine itself only emits events through the `tracing` macros. Native
//! hosts and tests that want to see them call [`init`] once at startup.

use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("a global tracing subscriber is already installed: {0}")]
    AlreadyInstalled(String),
}

/// Install a `tracing_subscriber::fmt` subscriber as the global default.
///
/// # Errors
///
/// Returns `AlreadyInstalled` when another subscriber was set first; the
/// existing subscriber keeps receiving events.
pub fn init() -> Result<(), LoggingError> {
    tracing_subscriber::fmt()
        .with_target(false)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInstalled(e.to_string()))?;
    info!(version = env!("CARGO_PKG_VERSION"), "puzzle engine logging initialised");
    Ok(())
}
