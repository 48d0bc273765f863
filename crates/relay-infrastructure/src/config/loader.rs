//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables and
//! default values, then validates the merged result.

use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use relay_domain::error::{Error, Result};

use crate::config::{AppConfig, LoggingConfig, ProviderConfig};
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    #[must_use]
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    #[must_use]
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, else the first default location found)
    /// 3. Environment variables such as `RELAY__SERVER__PORT`
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        match &self.config_path {
            Some(path) if path.exists() => {
                figment = figment.merge(Toml::file(path));
                log_config_loaded(path, true);
            }
            Some(path) => log_config_loaded(path, false),
            None => {
                if let Some(path) = Self::find_default_config_path() {
                    figment = figment.merge(Toml::file(&path));
                    log_config_loaded(&path, true);
                }
            }
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}{CONFIG_ENV_SEPARATOR}", self.env_prefix))
                .split(CONFIG_ENV_SEPARATOR),
        );

        let config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&config)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_logging_config(&config.logging)?;
    validate_server_config(config)?;
    validate_orchestration_config(config)?;
    validate_providers(&config.providers)?;
    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    parse_log_level(&config.level).map(|_| ())
}

fn validate_server_config(config: &AppConfig) -> Result<()> {
    if config.server.port == 0 {
        return Err(Error::configuration("Server port cannot be 0"));
    }
    if config.admin.header.trim().is_empty() {
        return Err(Error::configuration("Admin key header cannot be empty"));
    }
    if config.admin.key.as_deref().is_some_and(|k| k.trim().is_empty()) {
        return Err(Error::configuration(
            "Admin key cannot be blank; omit it to reject all admin requests",
        ));
    }
    Ok(())
}

fn validate_orchestration_config(config: &AppConfig) -> Result<()> {
    if config.orchestration.default_timeout_ms == 0 {
        return Err(Error::configuration("Default timeout cannot be 0"));
    }
    if config.orchestration.default_max_retries == 0 {
        return Err(Error::configuration("Default max retries cannot be 0"));
    }
    if config.http.connect_timeout_ms == 0 {
        return Err(Error::configuration("HTTP connect timeout cannot be 0"));
    }
    let breaker = &config.circuit_breaker;
    if breaker.auto_disable_threshold == 0 {
        return Err(Error::configuration(
            "Circuit breaker auto-disable threshold cannot be 0",
        ));
    }
    if breaker.degraded_threshold == 0 || breaker.degraded_threshold > breaker.auto_disable_threshold
    {
        return Err(Error::configuration(format!(
            "Degraded threshold must be between 1 and the auto-disable threshold ({})",
            breaker.auto_disable_threshold
        )));
    }
    Ok(())
}

fn validate_providers(providers: &[ProviderConfig]) -> Result<()> {
    let mut seen = HashSet::new();
    for provider in providers {
        if provider.id.trim().is_empty() || provider.capability.trim().is_empty() {
            return Err(Error::configuration(format!(
                "Provider '{}' needs a non-empty id and capability",
                provider.name
            )));
        }
        if !seen.insert(provider.id.as_str()) {
            return Err(Error::configuration(format!(
                "Duplicate provider id '{}'",
                provider.id
            )));
        }
    }
    Ok(())
}

/// Configuration builder for programmatic configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set logging configuration
    #[must_use]
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Add a provider to the seed
    #[must_use]
    pub fn with_provider(mut self, provider: ProviderConfig) -> Self {
        self.config.providers.push(provider);
        self
    }

    /// Store one credential
    #[must_use]
    pub fn with_credential(mut self, provider_id: &str, name: &str, value: &str) -> Self {
        self.config
            .credentials
            .entry(provider_id.to_string())
            .or_default()
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Set the admin key
    #[must_use]
    pub fn with_admin_key(mut self, key: impl Into<String>) -> Self {
        self.config.admin.key = Some(key.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> AppConfig {
        self.config
    }
}
