//! Tests for error classification
//!
//! These tests verify that every status code maps to the expected failure.

#[cfg(test)]
mod tests {
    use crate::error::mapping::{self, ClassificationInput};
    use crate::error::{Result, VaultError};

    fn sample_errors() -> Vec<String> {
        vec![
            "missing client token".to_string(),
            "permission denied".to_string(),
        ]
    }

    fn expected_for(code: i64, message: Option<String>, errors: Vec<String>) -> VaultError {
        match code {
            400 => VaultError::InvalidRequest { message, errors },
            401 => VaultError::Unauthorized { message, errors },
            403 => VaultError::Forbidden { message, errors },
            404 => VaultError::InvalidPath { message, errors },
            429 => VaultError::RateLimitExceeded { message, errors },
            500 => VaultError::InternalServerError { message, errors },
            501 => VaultError::ServiceNotInitialized { message, errors },
            503 => VaultError::ServiceUnavailable { message, errors },
            _ => unreachable!("not a documented code: {}", code),
        }
    }

    #[test]
    fn test_documented_codes_keep_message_and_errors() {
        for code in [400, 401, 403, 404, 429, 500, 501, 503] {
            let error = mapping::classify(code, Some("boom".to_string()), Some(sample_errors()));

            assert_eq!(error, expected_for(code, Some("boom".to_string()), sample_errors()));
            assert_eq!(error.status_code(), Some(code as u16));
            assert_eq!(error.message(), Some("boom"));
            assert_eq!(error.errors(), sample_errors().as_slice());
        }
    }

    #[test]
    fn test_variant_names() {
        let kinds: Vec<&str> = [400, 401, 403, 404, 429, 500, 501, 503, 302]
            .into_iter()
            .map(|code| mapping::classify(code, None, None).kind())
            .collect();

        assert_eq!(
            kinds,
            vec![
                "invalid_request",
                "unauthorized",
                "forbidden",
                "invalid_path",
                "rate_limit_exceeded",
                "internal_server_error",
                "service_not_initialized",
                "service_unavailable",
                "unexpected_failure",
            ]
        );
    }

    #[test]
    fn test_secret_not_found() {
        let error = mapping::classify(404, Some("secret not found".to_string()), Some(vec![]));

        assert_eq!(
            error,
            VaultError::InvalidPath {
                message: Some("secret not found".to_string()),
                errors: vec![],
            }
        );
        assert_eq!(error.kind(), "invalid_path");
    }

    #[test]
    fn test_bare_status_code() {
        let error = mapping::classify(503, None, None);

        assert_eq!(
            error,
            VaultError::ServiceUnavailable {
                message: None,
                errors: vec![],
            }
        );
        assert_eq!(error.message(), None);
        assert!(error.errors().is_empty());
        assert_eq!(error.to_string(), "Service unavailable");
    }

    #[test]
    fn test_unexpected_status_keeps_message_only() {
        let error = mapping::classify(599, Some("weird".to_string()), Some(sample_errors()));

        assert_eq!(
            error,
            VaultError::UnexpectedFailure {
                message: Some("weird".to_string())
            }
        );
        assert_eq!(error.status_code(), None);
        assert_eq!(error.to_string(), "Unexpected failure: weird");
    }

    #[test]
    fn test_classification_is_pure() {
        let first = mapping::classify(429, Some("slow down".to_string()), Some(sample_errors()));
        let second = mapping::classify(429, Some("slow down".to_string()), Some(sample_errors()));

        assert_eq!(first, second);
    }

    #[test]
    fn test_classification_input() {
        let error = ClassificationInput::new(403)
            .with_message("1 error occurred")
            .with_errors(["permission denied"])
            .classify();

        assert!(matches!(error, VaultError::Forbidden { .. }));
        assert_eq!(error.errors(), ["permission denied".to_string()].as_slice());
    }

    #[test]
    fn test_display_includes_errors_and_redacts_tokens() {
        let error = mapping::classify(
            400,
            Some("bad token hvs.ABCdef123".to_string()),
            Some(vec!["no handler for route".to_string(), "invalid path".to_string()]),
        );

        assert_eq!(
            error.to_string(),
            "Invalid request: bad token [REDACTED] (no handler for route, invalid path)"
        );
    }

    #[test]
    fn test_raise_for_error_propagates() {
        fn read_secret(status: i64) -> Result<String> {
            mapping::raise_for_error(status, Some("denied".to_string()), None)?;
            Ok("unreachable".to_string())
        }

        let error = read_secret(401).unwrap_err();
        assert!(matches!(error, VaultError::Unauthorized { .. }));
    }

    #[test]
    fn test_callers_can_branch_on_kind() {
        // Typical backoff decision made by a caller, outside the SDK
        fn should_back_off(error: &VaultError) -> bool {
            matches!(
                error,
                VaultError::RateLimitExceeded { .. } | VaultError::ServiceUnavailable { .. }
            )
        }

        assert!(should_back_off(&mapping::classify(429, None, None)));
        assert!(should_back_off(&mapping::classify(503, None, None)));
        assert!(!should_back_off(&mapping::classify(401, None, None)));
        assert!(!should_back_off(&mapping::classify(403, None, None)));
    }
}
