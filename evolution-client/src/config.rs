//! Configuration for the Evolution client.

use config::builder::DefaultState;
use config::{Config as ConfigLoader, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connection settings for the remote gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub api_key: String,
    /// Bound on a full request/response round trip.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Targets used by the command-line entry point.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub instance: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    /// Prefixed to `number` when it lacks one (e.g. "55").
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default = "default_text")]
    pub text: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            instance: None,
            number: None,
            country_code: None,
            text: default_text(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default values
fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}
fn default_timeout() -> u64 {
    10
}
fn default_text() -> String {
    "Test message from evolution-client".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. Environment variables (EVOLUTION__SECTION__KEY format)
    /// 2. config.toml, or the file named by EVOLUTION_CONFIG (if present)
    /// 3. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let file = std::env::var("EVOLUTION_CONFIG").unwrap_or_else(|_| "config".to_string());
        Self::load_from(&file, Self::environment())
    }

    /// Load from the named file (optional) overlaid with `environment`.
    ///
    /// Environment values stay strings until deserialized, so an API key or
    /// instance made of digits keeps its leading zeros.
    pub fn load_from(file: &str, environment: Environment) -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name(file).required(false))
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    /// `EVOLUTION__SECTION__KEY` variables.
    pub fn environment() -> Environment {
        Environment::with_prefix("EVOLUTION").separator("__")
    }

    /// Builder pre-populated with the built-in defaults.
    pub fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        ConfigLoader::builder()
            .set_default("gateway.base_url", default_base_url())?
            .set_default("gateway.timeout_secs", default_timeout() as i64)?
            .set_default("defaults.text", default_text())?
            .set_default("logging.level", default_log_level())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use std::io::Write;

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let vars: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::environment().source(Some(vars))
    }

    fn from_toml(toml: &str) -> Result<Config, ConfigError> {
        Config::builder()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_defaults() {
        let config = from_toml(
            r#"
            [gateway]
            api_key = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.gateway.base_url, "http://localhost:8080");
        assert_eq!(config.gateway.api_key, "secret");
        assert_eq!(config.gateway.timeout_secs, 10);
        assert!(config.defaults.instance.is_none());
        assert!(config.defaults.number.is_none());
        assert_eq!(config.defaults.text, "Test message from evolution-client");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_overrides() {
        let config = from_toml(
            r#"
            [gateway]
            base_url = "https://evo.example.com/"
            api_key = "secret"
            timeout_secs = 3

            [defaults]
            instance = "lucas"
            number = "554892095244"
            country_code = "55"
            text = "hello"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.gateway.base_url, "https://evo.example.com/");
        assert_eq!(config.gateway.timeout_secs, 3);
        assert_eq!(config.defaults.instance.as_deref(), Some("lucas"));
        assert_eq!(config.defaults.number.as_deref(), Some("554892095244"));
        assert_eq!(config.defaults.country_code.as_deref(), Some("55"));
        assert_eq!(config.defaults.text, "hello");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        assert!(from_toml("[gateway]\nbase_url = \"http://gw\"").is_err());
    }

    #[test]
    fn test_gateway_config_new() {
        let gateway = GatewayConfig::new("http://gw", "key");
        assert_eq!(gateway.timeout_secs, 10);
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = toml_file(
            r#"
            [gateway]
            base_url = "http://from-file"
            api_key = "file-key"
            timeout_secs = 3

            [defaults]
            instance = "file-instance"
            "#,
        );

        let config = Config::load_from(
            file.path().to_str().unwrap(),
            environment(&[
                ("EVOLUTION__GATEWAY__API_KEY", "env-key"),
                ("EVOLUTION__GATEWAY__TIMEOUT_SECS", "25"),
                ("EVOLUTION__DEFAULTS__NUMBER", "5511999999999"),
            ]),
        )
        .unwrap();

        assert_eq!(config.gateway.base_url, "http://from-file");
        assert_eq!(config.gateway.api_key, "env-key");
        assert_eq!(config.gateway.timeout_secs, 25);
        assert_eq!(config.defaults.instance.as_deref(), Some("file-instance"));
        assert_eq!(config.defaults.number.as_deref(), Some("5511999999999"));
    }

    #[test]
    fn test_environment_keeps_digit_strings_exact() {
        let config = Config::load_from(
            "does-not-exist",
            environment(&[
                ("EVOLUTION__GATEWAY__API_KEY", "00123456"),
                ("EVOLUTION__DEFAULTS__INSTANCE", "007"),
                ("EVOLUTION__DEFAULTS__NUMBER", "0011999999999999999999"),
            ]),
        )
        .unwrap();

        assert_eq!(config.gateway.api_key, "00123456");
        assert_eq!(config.defaults.instance.as_deref(), Some("007"));
        assert_eq!(
            config.defaults.number.as_deref(),
            Some("0011999999999999999999")
        );
        assert_eq!(config.gateway.base_url, "http://localhost:8080");
    }

    // Only test touching the process environment.
    #[test]
    fn test_load_reads_config_file_and_process_environment() {
        let file = toml_file(
            r#"
            [gateway]
            api_key = "file-key"
            base_url = "http://from-file"
            "#,
        );

        std::env::set_var("EVOLUTION_CONFIG", file.path());
        std::env::set_var("EVOLUTION__GATEWAY__API_KEY", "00123456");
        std::env::set_var("EVOLUTION__DEFAULTS__INSTANCE", "007");
        let loaded = Config::load();
        std::env::remove_var("EVOLUTION_CONFIG");
        std::env::remove_var("EVOLUTION__GATEWAY__API_KEY");
        std::env::remove_var("EVOLUTION__DEFAULTS__INSTANCE");

        let config = loaded.unwrap();
        assert_eq!(config.gateway.base_url, "http://from-file");
        assert_eq!(config.gateway.api_key, "00123456");
        assert_eq!(config.defaults.instance.as_deref(), Some("007"));
    }
}
