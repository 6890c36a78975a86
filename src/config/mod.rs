//! Tries to create an `AppConfig` from config files and the environment.
//! Gets initialized with `OnceLock` so it only needs to get initialized once.

mod error;
mod structs;

use std::{path::PathBuf, sync::OnceLock};
use tracing::info;

// Re-export config structs
pub use error::{ConfigError, ConfigResult};
pub use structs::{AppConfig, CorsConfig, Environment, NetConfig, SubscriberConfig, ENV_PREFIX};

/// Allocates a static `OnceLock` containing `AppConfig`.
/// This ensures configuration only gets initialized the first time we call this function.
/// Every other caller gets a &'static ref to AppConfig.
/// Panics if anything goes wrong.
pub fn get_or_init_config() -> &'static AppConfig {
    static CONFIG_INIT: OnceLock<AppConfig> = OnceLock::new();
    CONFIG_INIT.get_or_init(|| {
        info!(
            "{:<12} - Initializing the configuration",
            "get_or_init_config"
        );
        let environment = Environment::from_env()
            .unwrap_or_else(|er| panic!("Fatal Error: Failed to parse APP_ENVIRONMENT: {er}"));
        let config_dir =
            config_dir().unwrap_or_else(|er| panic!("Fatal Error: Building config: {er}"));

        AppConfig::load(config_dir, environment)
            .unwrap_or_else(|er| panic!("Fatal Error: Building config: {er}"))
    })
}

/// The `config` directory relative to the current working directory.
fn config_dir() -> ConfigResult<PathBuf> {
    Ok(std::env::current_dir()?.join("config"))
}
