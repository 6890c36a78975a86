//! The configuration structs used to build the AppConfig, and their impls.
use std::path::Path;

use axum::http::HeaderValue;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use secrecy::SecretString;
use serde::Deserialize;
use strum_macros::AsRefStr;

use crate::config::{ConfigError, ConfigResult};

/// Prefix of the environment variables that override values from the config files.
/// Nested keys are separated with `__`, e.g. `APP_SUBSCRIBER_CONFIG__AUTH_TOKEN`.
pub const ENV_PREFIX: &str = "APP_";

// ###################################
// ->   STRUCTS
// ###################################
#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

#[derive(Deserialize, Clone, Debug)]
pub struct AppConfig {
    pub net_config: NetConfig,
    pub subscriber_config: SubscriberConfig,
    pub cors_config: CorsConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub host: [u8; 4],
    pub app_port: u16,
}

/// Where and how to reach the Subscriber API.
#[derive(Deserialize, Clone, Debug)]
pub struct SubscriberConfig {
    pub url: String,
    pub auth_token: SecretString,
    /// No explicit timeout is applied when this is missing.
    #[serde(default)]
    pub timeout_millis: Option<u64>,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

// ###################################
// ->   IMPLs
// ###################################
impl AppConfig {
    /// Layers `base.toml`, `<environment>.toml` and `APP_` prefixed environment variables,
    /// later sources override earlier ones.
    pub fn load(config_dir: impl AsRef<Path>, environment: Environment) -> ConfigResult<Self> {
        let config_dir = config_dir.as_ref();
        let environment_filename = format!("{}.toml", environment.as_ref().to_lowercase());

        let app_config = Figment::new()
            .merge(Toml::file(config_dir.join("base.toml")))
            .merge(Toml::file(config_dir.join(environment_filename)))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract::<AppConfig>()?;

        // Fail at startup rather than on the first response.
        app_config.cors_config.header_value()?;

        Ok(app_config)
    }
}

impl SubscriberConfig {
    pub fn timeout(&self) -> Option<std::time::Duration> {
        self.timeout_millis.map(std::time::Duration::from_millis)
    }
}

impl CorsConfig {
    pub fn header_value(&self) -> ConfigResult<HeaderValue> {
        HeaderValue::from_str(&self.allowed_origin)
            .map_err(|_| ConfigError::InvalidAllowedOrigin(self.allowed_origin.clone()))
    }
}

impl Environment {
    /// Reads `APP_ENVIRONMENT`, defaults to `local`.
    pub fn from_env() -> ConfigResult<Self> {
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
    }
}

// ###################################
// ->   TRY FROMs
// ###################################

impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            _ => Err(Self::Error::StringToEnvironmentFail(value)),
        }
    }
}

// ###################################
// ->   TESTS
// ###################################
