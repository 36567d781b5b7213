//! Error handling for the Vault SDK
//!
//! This module provides the closed set of failures a Vault response can be
//! classified into:
//! - One variant per documented API-server condition (400, 401, 403, ...)
//! - A single fallback for every other status code
//! - Convenient Result type alias
//!
//! Classification itself lives in [`mapping`].

use thiserror::Error;

use crate::util::sanitize_for_logging;

pub mod mapping;

/// Result type for Vault SDK operations
pub type Result<T> = std::result::Result<T, VaultError>;

/// Typed failure derived from a Vault HTTP response
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    /// 400: the request was malformed or failed validation
    #[error("{}", describe("Invalid request", .message, .errors))]
    InvalidRequest {
        message: Option<String>,
        errors: Vec<String>,
    },

    /// 401: missing or invalid client token
    #[error("{}", describe("Unauthorized", .message, .errors))]
    Unauthorized {
        message: Option<String>,
        errors: Vec<String>,
    },

    /// 403: the token lacks permission for the path
    #[error("{}", describe("Forbidden", .message, .errors))]
    Forbidden {
        message: Option<String>,
        errors: Vec<String>,
    },

    /// 404: nothing is mounted or stored at the path
    #[error("{}", describe("Invalid path", .message, .errors))]
    InvalidPath {
        message: Option<String>,
        errors: Vec<String>,
    },

    /// 429: request rate quota exceeded
    #[error("{}", describe("Rate limit exceeded", .message, .errors))]
    RateLimitExceeded {
        message: Option<String>,
        errors: Vec<String>,
    },

    /// 500: internal server error
    #[error("{}", describe("Internal server error", .message, .errors))]
    InternalServerError {
        message: Option<String>,
        errors: Vec<String>,
    },

    /// 501: the backend store has not been initialized
    #[error("{}", describe("Service not initialized", .message, .errors))]
    ServiceNotInitialized {
        message: Option<String>,
        errors: Vec<String>,
    },

    /// 503: the service is sealed or under maintenance
    #[error("{}", describe("Service unavailable", .message, .errors))]
    ServiceUnavailable {
        message: Option<String>,
        errors: Vec<String>,
    },

    /// Any other status code. Only the message is kept.
    #[error("{}", describe("Unexpected failure", .message, &[]))]
    UnexpectedFailure { message: Option<String> },
}

impl VaultError {
    /// The message returned by the service, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            VaultError::InvalidRequest { message, .. }
            | VaultError::Unauthorized { message, .. }
            | VaultError::Forbidden { message, .. }
            | VaultError::InvalidPath { message, .. }
            | VaultError::RateLimitExceeded { message, .. }
            | VaultError::InternalServerError { message, .. }
            | VaultError::ServiceNotInitialized { message, .. }
            | VaultError::ServiceUnavailable { message, .. }
            | VaultError::UnexpectedFailure { message } => message.as_deref(),
        }
    }

    /// Structured error list returned by the service.
    ///
    /// Always empty for [`VaultError::UnexpectedFailure`].
    pub fn errors(&self) -> &[String] {
        match self {
            VaultError::InvalidRequest { errors, .. }
            | VaultError::Unauthorized { errors, .. }
            | VaultError::Forbidden { errors, .. }
            | VaultError::InvalidPath { errors, .. }
            | VaultError::RateLimitExceeded { errors, .. }
            | VaultError::InternalServerError { errors, .. }
            | VaultError::ServiceNotInitialized { errors, .. }
            | VaultError::ServiceUnavailable { errors, .. } => errors,
            VaultError::UnexpectedFailure { .. } => &[],
        }
    }

    /// The status code this variant is produced for
    pub fn status_code(&self) -> Option<u16> {
        match self {
            VaultError::InvalidRequest { .. } => Some(400),
            VaultError::Unauthorized { .. } => Some(401),
            VaultError::Forbidden { .. } => Some(403),
            VaultError::InvalidPath { .. } => Some(404),
            VaultError::RateLimitExceeded { .. } => Some(429),
            VaultError::InternalServerError { .. } => Some(500),
            VaultError::ServiceNotInitialized { .. } => Some(501),
            VaultError::ServiceUnavailable { .. } => Some(503),
            VaultError::UnexpectedFailure { .. } => None,
        }
    }

    /// Stable name of the variant for log lines and metric labels
    pub fn kind(&self) -> &'static str {
        match self {
            VaultError::InvalidRequest { .. } => "invalid_request",
            VaultError::Unauthorized { .. } => "unauthorized",
            VaultError::Forbidden { .. } => "forbidden",
            VaultError::InvalidPath { .. } => "invalid_path",
            VaultError::RateLimitExceeded { .. } => "rate_limit_exceeded",
            VaultError::InternalServerError { .. } => "internal_server_error",
            VaultError::ServiceNotInitialized { .. } => "service_not_initialized",
            VaultError::ServiceUnavailable { .. } => "service_unavailable",
            VaultError::UnexpectedFailure { .. } => "unexpected_failure",
        }
    }
}

/// Render a variant as `Kind: message (error, error)`
fn describe(kind: &str, message: &Option<String>, errors: &[String]) -> String {
    let mut out = kind.to_string();

    if let Some(message) = message {
        out.push_str(": ");
        out.push_str(&sanitize_for_logging(message));
    }

    if !errors.is_empty() {
        let joined = errors
            .iter()
            .map(|e| sanitize_for_logging(e))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(" ({})", joined));
    }

    out
}
