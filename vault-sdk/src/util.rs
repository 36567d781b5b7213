//! Utility module for common functionality
//!
//! String helpers shared by response classification and diagnostics.

use once_cell::sync::Lazy;
use regex::Regex;

/// Patterns for credentials the service may echo back in error text
static SENSITIVE_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"Bearer [A-Za-z0-9\-_.]+", "Bearer [REDACTED]"),
        (r"hv[sbr]\.[A-Za-z0-9\-_]+", "[REDACTED]"),
        (r"(?i)x-vault-token[=:]\s*[^\s&]+", "X-Vault-Token=[REDACTED]"),
        (r"password[=:]\s*[^\s&]+", "password=[REDACTED]"),
        (r"secret_id[=:]\s*[^\s&]+", "secret_id=[REDACTED]"),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
    .collect()
});

/// Truncate a string to at most `max_len` characters, adding ellipsis if truncated
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Sanitize a string for logging (remove token and credential patterns)
pub fn sanitize_for_logging(s: &str) -> String {
    let mut result = s.to_string();
    for (re, replacement) in SENSITIVE_PATTERNS.iter() {
        result = re.replace_all(&result, *replacement).to_string();
    }
    result
}
