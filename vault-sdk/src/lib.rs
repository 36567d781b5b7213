//! # Vault SDK
//!
//! Shared building blocks for clients of the Vault secrets API.
//!
//! This crate provides:
//!
//! - A closed taxonomy of typed failures for Vault responses
//! - Classification of failed responses by status code
//! - Deprecation marking for operations scheduled for removal
//! - Configuration management utilities
//!
//! ## Architecture
//!
//! - `VaultError`: one variant per documented API-server condition, plus a fallback
//! - `classify`: status code, message and error list to `VaultError`
//! - `mark` / `Deprecated`: wraps an operation so each call reports a notice
//! - `DiagnosticsSink`: where deprecation notices go
//!
//! Retry decisions are left to callers; they can match on the returned variant.

// Re-export error handling
pub mod error;
pub use error::mapping::{classify, parse_error_response, raise_for_error, ClassificationInput};
pub use error::{Result, VaultError};

// Re-export deprecation marking
pub mod deprecation;
pub use deprecation::{
    mark, Deprecated, DeprecationNotice, DiagnosticsSink, Documented, OperationDoc,
};

// Re-export configuration management
pub mod config;
pub use config::{ConfigProvider, SdkConfig, ServiceConfig};

// Utility module for common functionality
mod util;

#[cfg(test)]
mod tests;
