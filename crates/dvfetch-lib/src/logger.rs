//! Logging collaborator injected into the fetcher.
//!
//! The library never installs a subscriber itself. The default [`TracingLogger`]
//! forwards to whatever `tracing` subscriber the binary (or a test) set up.

pub trait FetchLogger: Send + Sync {
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl FetchLogger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "dataverse", "{}", message);
    }

    fn warning(&self, message: &str) {
        tracing::warn!(target: "dataverse", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "dataverse", "{}", message);
    }
}

/// Drops every message; used when the caller asked for quiet operation.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentLogger;

impl FetchLogger for SilentLogger {
    fn info(&self, _message: &str) {}

    fn warning(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}
