//! Status code classification for Vault responses
//!
//! This module converts the status code, message and error list of a failed
//! response into a [`VaultError`]. The mapping is a flat table; every code
//! without an entry becomes [`VaultError::UnexpectedFailure`].

use reqwest::StatusCode;
use serde::Deserialize;

use super::{Result, VaultError};
use crate::config::{SdkConfig, MIN_MESSAGE_LEN};
use crate::util::truncate_string;

/// Everything needed to classify one failed response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationInput {
    /// HTTP status code
    pub status_code: i64,

    /// Message returned by the service
    pub message: Option<String>,

    /// Structured error list returned by the service
    pub errors: Option<Vec<String>>,
}

/// Error body shape returned by the Vault API
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Option<Vec<String>>,
}

impl ClassificationInput {
    /// Create an input carrying only a status code
    pub fn new(status_code: i64) -> Self {
        Self {
            status_code,
            message: None,
            errors: None,
        }
    }

    /// Attach the service message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach the structured error list
    pub fn with_errors<I, S>(mut self, errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.errors = Some(errors.into_iter().map(Into::into).collect());
        self
    }

    /// Build an input from a raw response status and body.
    ///
    /// When the body is a JSON object with an `errors` array, that array is
    /// attached and no message is kept. Otherwise the body, truncated to
    /// `max_message_len` (never below [`MIN_MESSAGE_LEN`]), becomes the message.
    pub fn from_body(status: StatusCode, body: &str, max_message_len: usize) -> Self {
        let errors = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.errors);

        let trimmed = body.trim();
        let message = if errors.is_some() || trimmed.is_empty() {
            None
        } else {
            Some(truncate_string(trimmed, max_message_len.max(MIN_MESSAGE_LEN)))
        };

        Self {
            status_code: i64::from(status.as_u16()),
            message,
            errors,
        }
    }

    /// Classify this input
    pub fn classify(self) -> VaultError {
        classify(self.status_code, self.message, self.errors)
    }
}

/// Map a status code, message and error list to the matching [`VaultError`]
pub fn classify(
    status_code: i64,
    message: Option<String>,
    errors: Option<Vec<String>>,
) -> VaultError {
    let errors = errors.unwrap_or_default();

    let error = match status_code {
        400 => VaultError::InvalidRequest { message, errors },
        401 => VaultError::Unauthorized { message, errors },
        403 => VaultError::Forbidden { message, errors },
        404 => VaultError::InvalidPath { message, errors },
        429 => VaultError::RateLimitExceeded { message, errors },
        500 => VaultError::InternalServerError { message, errors },
        501 => VaultError::ServiceNotInitialized { message, errors },
        503 => VaultError::ServiceUnavailable { message, errors },
        _ => VaultError::UnexpectedFailure { message },
    };

    log::debug!("Classified status {} as {}", status_code, error.kind());
    error
}

/// Classify a failed response and return it as an `Err`
pub fn raise_for_error<T>(
    status_code: i64,
    message: Option<String>,
    errors: Option<Vec<String>>,
) -> Result<T> {
    Err(classify(status_code, message, errors))
}

/// Read the body of a failed response and classify it
pub async fn parse_error_response(response: reqwest::Response, config: &SdkConfig) -> VaultError {
    let status = response.status();

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            log::warn!("Failed to read error response body for status {}: {}", status, e);
            String::new()
        }
    };

    ClassificationInput::from_body(status, &body, config.max_message_len).classify()
}
