//! Configuration management for the Vault SDK
//!
//! This module provides utilities for loading and validating SDK settings,
//! with support for environment variables.

use std::collections::HashMap;
use std::env;
use std::fmt::{self, Debug};
use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::deprecation::{DiagnosticsSink, LogSink, SilentSink, TracingSink};

/// Result type for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The key has no value in any source
    #[error("Configuration key not found: {0}")]
    Missing(String),

    /// The value could not be parsed or is out of range
    #[error("Invalid configuration value for key {key}: {reason}")]
    Invalid { key: String, reason: String },
}

impl ConfigError {
    fn invalid(key: &str, reason: impl fmt::Display) -> Self {
        ConfigError::Invalid {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Base trait for configuration providers
pub trait ConfigProvider: Send + Sync {
    /// Get a string configuration value
    fn get_string(&self, key: &str) -> Result<String>;
}

/// Extension methods for configuration providers
pub trait ConfigProviderExt: ConfigProvider {
    /// Get an integer configuration value
    fn get_int(&self, key: &str) -> Result<i64> {
        self.get(key)
    }

    /// Get a boolean configuration value
    fn get_bool(&self, key: &str) -> Result<bool> {
        let value = self.get_string(key)?;
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Ok(true),
            "false" | "no" | "0" | "off" => Ok(false),
            _ => Err(ConfigError::invalid(key, format!("not a boolean: {}", value))),
        }
    }

    /// Get a typed configuration value by parsing from string
    fn get<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        <T as FromStr>::Err: fmt::Display,
    {
        let value = self.get_string(key)?;
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::invalid(key, e))
    }

    /// Get a typed value, falling back to `default` only when the key is absent
    fn get_or<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: FromStr,
        <T as FromStr>::Err: fmt::Display,
    {
        match self.get::<T>(key) {
            Err(ConfigError::Missing(_)) => Ok(default),
            other => other,
        }
    }

    /// Get a string configuration value with a default
    fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|_| default.to_string())
    }
}

impl<T: ConfigProvider + ?Sized> ConfigProviderExt for T {}

/// Environment variable based configuration provider
#[derive(Debug, Clone, Default)]
pub struct EnvConfigProvider {
    /// Optional prefix for environment variables
    prefix: Option<String>,

    /// Optional namespace for variables (e.g., "SDK")
    namespace: Option<String>,
}

impl EnvConfigProvider {
    /// Create a new environment variable config provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a prefix for environment variables
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set a namespace for environment variables
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Format a configuration key as an environment variable
    fn format_key(&self, key: &str) -> String {
        let mut env_key = String::new();

        if let Some(ref prefix) = self.prefix {
            env_key.push_str(prefix);
            env_key.push('_');
        }

        if let Some(ref namespace) = self.namespace {
            env_key.push_str(namespace);
            env_key.push('_');
        }

        env_key.push_str(&key.to_uppercase().replace(|c: char| !c.is_ascii_alphanumeric(), "_"));

        env_key
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        let env_key = self.format_key(key);

        env::var(&env_key).map_err(|e| match e {
            env::VarError::NotPresent => ConfigError::Missing(env_key),
            env::VarError::NotUnicode(_) => {
                ConfigError::invalid(&env_key, "environment variable is not valid unicode")
            }
        })
    }
}

/// In-memory config provider for testing or static configuration
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigProvider {
    values: HashMap<String, String>,
}

impl MemoryConfigProvider {
    /// Create a new empty memory config provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory config provider with initial values
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Set a configuration value
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: ToString,
    {
        self.values.insert(key.into(), value.to_string());
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::Missing(key.to_string()))
    }
}

/// A composite config provider that tries multiple providers in order
pub struct CompositeConfigProvider {
    providers: Vec<Box<dyn ConfigProvider>>,
}

impl CompositeConfigProvider {
    /// Create a new composite config provider
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Add a provider to the chain
    pub fn add_provider(&mut self, provider: impl ConfigProvider + 'static) {
        self.providers.push(Box::new(provider));
    }
}

impl Default for CompositeConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigProvider for CompositeConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        for provider in &self.providers {
            match provider.get_string(key) {
                Ok(value) => return Ok(value),
                Err(ConfigError::Missing(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(ConfigError::Missing(key.to_string()))
    }
}

/// Global default configuration provider, reading `VAULT_SDK_*` variables
pub static DEFAULT_PROVIDER: Lazy<Arc<EnvConfigProvider>> =
    Lazy::new(|| Arc::new(EnvConfigProvider::new().with_prefix("VAULT").with_namespace("SDK")));

/// Trait for validated configuration sections
pub trait ServiceConfig: Debug + Send + Sync {
    /// Validate this configuration
    fn validate(&self) -> Result<()>;

    /// Section name
    fn service_name(&self) -> &str;
}

/// Which diagnostics sink receives deprecation notices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// `log` facade
    #[default]
    Log,
    /// `tracing` events
    Tracing,
    /// Discard notices
    Silent,
}

impl FromStr for SinkKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "log" => Ok(SinkKind::Log),
            "tracing" => Ok(SinkKind::Tracing),
            "silent" | "none" | "off" => Ok(SinkKind::Silent),
            other => Err(format!("unknown sink kind: {}", other)),
        }
    }
}

/// Shortest allowed `max_message_len`; room for one character and an ellipsis
pub const MIN_MESSAGE_LEN: usize = 4;

/// Settings for response classification and deprecation reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkConfig {
    /// Longest response body kept as an error message
    pub max_message_len: usize,

    /// Destination of deprecation notices
    pub deprecation_sink: SinkKind,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            max_message_len: 512,
            deprecation_sink: SinkKind::Log,
        }
    }
}

impl SdkConfig {
    /// Load configuration from a config provider
    pub fn from_provider<P: ConfigProvider + ?Sized>(provider: &P) -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            max_message_len: provider.get_or("max_message_len", defaults.max_message_len)?,
            deprecation_sink: provider.get_or("deprecation_sink", defaults.deprecation_sink)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `VAULT_SDK_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_provider(DEFAULT_PROVIDER.as_ref())
    }

    /// Instantiate the configured deprecation sink
    pub fn sink(&self) -> Arc<dyn DiagnosticsSink> {
        match self.deprecation_sink {
            SinkKind::Log => Arc::new(LogSink),
            SinkKind::Tracing => Arc::new(TracingSink),
            SinkKind::Silent => Arc::new(SilentSink),
        }
    }
}

impl ServiceConfig for SdkConfig {
    fn validate(&self) -> Result<()> {
        if self.max_message_len < MIN_MESSAGE_LEN {
            return Err(ConfigError::invalid(
                "max_message_len",
                format!("must be at least {}", MIN_MESSAGE_LEN),
            ));
        }

        Ok(())
    }

    fn service_name(&self) -> &str {
        "vault_sdk"
    }
}
