//! Diagnostics sinks that receive deprecation notices

use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use thiserror::Error;

use super::DeprecationNotice;

/// Log target used by [`LogSink`] and [`TracingSink`]
pub const DEPRECATION_TARGET: &str = "vault_sdk::deprecation";

/// Failure reported by a sink while emitting a notice
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticsError {
    /// The sink cannot accept notices in its current state
    #[error("Diagnostics sink unavailable: {0}")]
    Unavailable(String),

    /// The sink rejected this particular notice
    #[error("Diagnostics sink rejected notice: {0}")]
    Rejected(String),
}

/// Destination for deprecation notices.
///
/// Implementations must be safe to call from several threads at once.
#[cfg_attr(test, mockall::automock)]
pub trait DiagnosticsSink: Send + Sync {
    /// Deliver one notice
    fn emit(&self, notice: &DeprecationNotice) -> Result<(), DiagnosticsError>;
}

/// Sink writing notices through the `log` facade at warn level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticsSink for LogSink {
    fn emit(&self, notice: &DeprecationNotice) -> Result<(), DiagnosticsError> {
        log::warn!(target: DEPRECATION_TARGET, "{}", notice.message());
        Ok(())
    }
}

/// Sink writing notices as structured `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn emit(&self, notice: &DeprecationNotice) -> Result<(), DiagnosticsError> {
        tracing::warn!(
            target: DEPRECATION_TARGET,
            subject = %notice.subject_name,
            removal_version = %notice.removal_version,
            replacement = notice.replacement_reference.as_deref().unwrap_or(""),
            "{}",
            notice.message()
        );
        Ok(())
    }
}

/// Sink that discards every notice
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl DiagnosticsSink for SilentSink {
    fn emit(&self, _notice: &DeprecationNotice) -> Result<(), DiagnosticsError> {
        Ok(())
    }
}

/// Sink keeping every notice in memory, in emission order
#[derive(Debug, Default)]
pub struct CollectingSink {
    notices: Mutex<Vec<DeprecationNotice>>,
}

impl CollectingSink {
    /// Create an empty collecting sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all notices received so far
    pub fn notices(&self) -> Vec<DeprecationNotice> {
        match self.notices.lock() {
            Ok(notices) => notices.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of notices received so far
    pub fn len(&self) -> usize {
        match self.notices.lock() {
            Ok(notices) => notices.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    /// Whether no notice has been received
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove and return all notices received so far
    pub fn drain(&self) -> Vec<DeprecationNotice> {
        match self.notices.lock() {
            Ok(mut notices) => std::mem::take(&mut *notices),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl DiagnosticsSink for CollectingSink {
    fn emit(&self, notice: &DeprecationNotice) -> Result<(), DiagnosticsError> {
        let mut notices = self
            .notices
            .lock()
            .map_err(|_| DiagnosticsError::Unavailable("notice buffer poisoned".to_string()))?;
        notices.push(notice.clone());
        Ok(())
    }
}

/// Process-wide default sink
static DEFAULT_SINK: Lazy<Arc<dyn DiagnosticsSink>> = Lazy::new(|| Arc::new(LogSink));

/// Shared handle to the default [`LogSink`]
pub fn default_sink() -> Arc<dyn DiagnosticsSink> {
    Arc::clone(&DEFAULT_SINK)
}
