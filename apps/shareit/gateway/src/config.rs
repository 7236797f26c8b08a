use core_config::server::ServerConfig;
use core_config::{AppInfo, ConfigError, Environment, FromEnv, app_info, env_or_default};

/// Complete configuration for the ShareIt gateway
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    /// Base URL of the backing ShareIt API
    pub backend_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend_url = env_or_default("BACKEND_URL", "http://localhost:8080")
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            backend_url,
        })
    }
}
