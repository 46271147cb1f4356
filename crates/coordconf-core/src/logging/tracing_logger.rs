//! Logger that forwards to `tracing`

use super::traits::Logger;

/// Forwards every message to the `tracing` crate under the `coordconf` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "coordconf", "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "coordconf", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "coordconf", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "coordconf", "{}", message);
    }
}
