//! Tests for configuration management functionality
//!
//! These tests verify that SDK settings load from the configuration providers.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env;

    use crate::config::{
        ConfigError, ConfigProvider, ConfigProviderExt, EnvConfigProvider, MemoryConfigProvider,
        SdkConfig, ServiceConfig, SinkKind,
    };
    use crate::deprecation::DeprecationNotice;

    #[test]
    fn test_memory_config_provider_typed_values() {
        let mut provider = MemoryConfigProvider::new();
        provider.set("max_message_len", "30");
        provider.set("enabled", "yes");

        assert_eq!(provider.get_int("max_message_len").unwrap(), 30);
        assert!(provider.get_bool("enabled").unwrap());
        assert_eq!(provider.get_string_or("missing", "default"), "default");
        assert_eq!(provider.get_or("missing", 60usize).unwrap(), 60);
        assert!(provider.get_int("enabled").is_err());
    }

    #[test]
    fn test_sdk_config_defaults() {
        let config = SdkConfig::from_provider(&MemoryConfigProvider::new()).unwrap();

        assert_eq!(config, SdkConfig::default());
        assert_eq!(config.max_message_len, 512);
        assert_eq!(config.deprecation_sink, SinkKind::Log);
        assert_eq!(config.service_name(), "vault_sdk");
    }

    #[test]
    fn test_sdk_config_from_values() {
        let mut values = HashMap::new();
        values.insert("max_message_len".to_string(), "64".to_string());
        values.insert("deprecation_sink".to_string(), "Tracing".to_string());
        let provider = MemoryConfigProvider::with_values(values);

        let config = SdkConfig::from_provider(&provider).unwrap();
        assert_eq!(config.max_message_len, 64);
        assert_eq!(config.deprecation_sink, SinkKind::Tracing);
    }

    #[test]
    fn test_sdk_config_rejects_bad_values() {
        let mut provider = MemoryConfigProvider::new();
        provider.set("deprecation_sink", "syslog");
        assert!(matches!(
            SdkConfig::from_provider(&provider),
            Err(ConfigError::Invalid { .. })
        ));

        let mut provider = MemoryConfigProvider::new();
        provider.set("max_message_len", "2");
        assert!(matches!(
            SdkConfig::from_provider(&provider),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_env_config_provider() {
        env::set_var("VAULT_SDK_TEST_CFG_MAX_MESSAGE_LEN", "128");
        env::set_var("VAULT_SDK_TEST_CFG_DEPRECATION_SINK", "silent");

        let provider = EnvConfigProvider::new()
            .with_prefix("VAULT_SDK")
            .with_namespace("TEST_CFG");

        assert_eq!(provider.get_string("max_message_len").unwrap(), "128");

        let config = SdkConfig::from_provider(&provider).unwrap();
        assert_eq!(config.max_message_len, 128);
        assert_eq!(config.deprecation_sink, SinkKind::Silent);

        env::remove_var("VAULT_SDK_TEST_CFG_MAX_MESSAGE_LEN");
        env::remove_var("VAULT_SDK_TEST_CFG_DEPRECATION_SINK");
    }

    #[test]
    fn test_configured_sink_accepts_notices() {
        let notice = DeprecationNotice {
            subject_name: "read_secret".to_string(),
            removal_version: "1.0.0".to_string(),
            replacement_reference: None,
            replacement_doc: None,
            emitted_at: chrono::Utc::now(),
        };

        for kind in [SinkKind::Log, SinkKind::Tracing, SinkKind::Silent] {
            let config = SdkConfig {
                deprecation_sink: kind,
                ..SdkConfig::default()
            };
            assert!(config.sink().emit(&notice).is_ok());
        }
    }

    #[test]
    fn test_sdk_config_from_env_uses_default_provider() {
        env::set_var("VAULT_SDK_MAX_MESSAGE_LEN", "96");
        env::set_var("VAULT_SDK_DEPRECATION_SINK", "tracing");

        let config = SdkConfig::from_env();

        env::remove_var("VAULT_SDK_MAX_MESSAGE_LEN");
        env::remove_var("VAULT_SDK_DEPRECATION_SINK");

        let config = config.unwrap();
        assert_eq!(config.max_message_len, 96);
        assert_eq!(config.deprecation_sink, SinkKind::Tracing);
    }

    #[test]
    fn test_sdk_config_from_json() {
        let config: SdkConfig = serde_json::from_str(
            r#"{ "max_message_len": 256, "deprecation_sink": "silent" }"#,
        )
        .unwrap();

        assert_eq!(config.max_message_len, 256);
        assert_eq!(config.deprecation_sink, SinkKind::Silent);
        assert!(config.validate().is_ok());

        let encoded = serde_json::to_value(&config).unwrap();
        assert_eq!(encoded["deprecation_sink"], "silent");

        assert!(serde_json::from_str::<SinkKind>(r#""syslog""#).is_err());
    }
}
