//! Logger backed by the `tracing` ecosystem.

use cursendus_core::Logger;

/// Forwards engine messages to `tracing` under the `cursendus` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "cursendus", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "cursendus", "{message}");
    }
}
