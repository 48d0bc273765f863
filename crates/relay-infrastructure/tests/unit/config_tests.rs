//! Configuration loading, overrides and validation

use figment::Jail;
use relay_domain::entities::AuthenticationType;
use relay_domain::error::Error;
use relay_infrastructure::config::{ConfigBuilder, ConfigLoader, ProviderConfig};

#[test]
fn defaults_without_any_source() {
    Jail::expect_with(|_jail| {
        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.orchestration.default_timeout_ms, 30_000);
        assert_eq!(config.orchestration.default_max_retries, 3);
        assert_eq!(config.circuit_breaker.auto_disable_threshold, 5);
        assert_eq!(config.admin.header, "X-Admin-Key");
        assert!(config.providers.is_empty());
        Ok(())
    });
}

#[test]
fn toml_file_then_environment_override() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "relay.toml",
            r#"
            [server]
            port = 9000

            [orchestration]
            default_max_retries = 2

            [credentials.pixabay]
            api_key = "from-file"

            [[providers]]
            id = "pixabay"
            name = "Pixabay"
            capability = "images"
            priority = 2
            authentication_type = "api_key"
            rate_limits = { per_day = 5000 }
            configuration = { key_param = "key" }
            "#,
        )?;
        jail.set_env("RELAY__SERVER__PORT", "9100");
        jail.set_env("RELAY__CREDENTIALS__PEXELS__API_KEY", "from-env");

        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.orchestration.default_max_retries, 2);
        assert_eq!(config.credentials["pixabay"]["api_key"], "from-file");
        assert_eq!(config.credentials["pexels"]["api_key"], "from-env");

        let provider = config.providers[0].clone().into_provider();
        assert_eq!(provider.priority, 2);
        assert!(provider.requires_key);
        assert_eq!(provider.authentication_type, AuthenticationType::ApiKey);
        assert_eq!(provider.rate_limits.per_day, Some(5000));
        assert_eq!(provider.configuration["key_param"], "key");
        Ok(())
    });
}

#[test]
fn explicit_missing_path_falls_back_to_defaults() {
    Jail::expect_with(|jail| {
        let path = jail.directory().join("absent.toml");
        let config = ConfigLoader::new()
            .with_config_path(&path)
            .load()
            .map_err(|e| e.to_string())?;
        assert_eq!(config.server.port, 8080);
        Ok(())
    });
}

#[test]
fn invalid_values_are_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("RELAY__SERVER__PORT", "0");
        let err = ConfigLoader::new().load().unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));

        jail.set_env("RELAY__SERVER__PORT", "8080");
        jail.set_env("RELAY__CIRCUIT_BREAKER__DEGRADED_THRESHOLD", "9");
        assert!(ConfigLoader::new().load().is_err());

        jail.set_env("RELAY__CIRCUIT_BREAKER__DEGRADED_THRESHOLD", "2");
        jail.set_env("RELAY__LOGGING__LEVEL", "loud");
        assert!(ConfigLoader::new().load().is_err());
        Ok(())
    });
}

#[test]
fn duplicate_provider_ids_are_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "relay.toml",
            r#"
            [[providers]]
            id = "a"
            name = "A"
            capability = "news"

            [[providers]]
            id = "a"
            name = "A again"
            capability = "news"
            "#,
        )?;
        let err = ConfigLoader::new().load().unwrap_err();
        assert!(err.to_string().contains("Duplicate provider id"));
        Ok(())
    });
}

#[test]
fn saved_configuration_loads_back() {
    Jail::expect_with(|jail| {
        let path = jail.directory().join("saved.toml");
        let config = ConfigBuilder::new()
            .with_admin_key("s3cret")
            .with_credential("gnews", "api_key", "g")
            .with_provider(
                ProviderConfig::new("gnews", "GNews", "news")
                    .priority(2)
                    .auth(AuthenticationType::ApiKey)
                    .configuration(serde_json::json!({"key_param": "apikey"})),
            )
            .with_provider(ProviderConfig::new("newsapi", "NewsAPI", "news"))
            .build();

        let loader = ConfigLoader::new().with_config_path(&path);
        loader
            .save_to_file(&config, &path)
            .map_err(|e| e.to_string())?;
        let loaded = loader.load().map_err(|e| e.to_string())?;

        assert_eq!(loaded.admin.key.as_deref(), Some("s3cret"));
        assert_eq!(loaded.credentials["gnews"]["api_key"], "g");
        assert_eq!(loaded.providers.len(), 2);
        assert_eq!(loaded.providers[0].configuration["key_param"], "apikey");
        assert!(loaded.providers[1].configuration.is_null());
        Ok(())
    });
}

#[test]
fn explicit_file_with_isolated_env_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("relay.toml");
    std::fs::write(
        &path,
        "[admin]\nenabled = false\n\n[http]\nuser_agent = \"relay-test\"\n",
    )
    .unwrap();

    let config = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("RELAY_ISOLATED_TEST")
        .load()
        .unwrap();

    assert!(!config.admin.enabled);
    assert_eq!(config.http.user_agent.as_deref(), Some("relay-test"));
    assert_eq!(config.http.connect_timeout_ms, 10_000);
}
