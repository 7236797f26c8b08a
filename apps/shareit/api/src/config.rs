use core_config::{AppInfo, ConfigError, Environment, FromEnv, app_info};
use core_config::server::ServerConfig;
use database::PostgresConfig;

/// Complete configuration for the ShareIt API
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub postgres: PostgresConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            postgres: PostgresConfig::from_env()?,
        })
    }
}
