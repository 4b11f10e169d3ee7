// Configuration module entry point
// Loads layered configuration and exposes the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HealthConfig, ListConfig, LoggingConfig, PerformanceConfig, ServerConfig,
};

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Legacy variable naming the list file
pub const LIST_PATH_ENV: &str = "DEOVR_LIST_PATH";
/// Legacy variable naming the listen port
pub const LIST_PORT_ENV: &str = "DEOVR_LIST_PORT";

/// Values that take precedence over every other configuration source
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub list_path: Option<String>,
    pub port: Option<u16>,
}

impl Overrides {
    /// Collect overrides from `DEOVR_LIST_PATH` and `DEOVR_LIST_PORT`
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let list_path = std::env::var(LIST_PATH_ENV).ok().filter(|p| !p.is_empty());
        let port = match std::env::var(LIST_PORT_ENV) {
            Ok(raw) => Some(raw.trim().parse::<u16>().map_err(|e| {
                config::ConfigError::Message(format!("Invalid {LIST_PORT_ENV} '{raw}': {e}"))
            })?),
            Err(_) => None,
        };
        Ok(Self { list_path, port })
    }
}

impl Config {
    /// Load configuration from specified file path (without extension),
    /// applying the legacy environment overrides
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with(config_path, &Overrides::from_env()?)
    }

    /// Load configuration from file, `DEOVR_LIST_<SECTION>__<KEY>` variables and explicit overrides
    pub fn load_with(config_path: &str, overrides: &Overrides) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("DEOVR_LIST")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.port_attempts", 10)?
            .set_default("list.path", "list.json")?
            .set_default("list.route", "/deovr")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_override_option("list.path", overrides.list_path.clone())?
            .set_override_option("server.port", overrides.port.map(i64::from))?
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that deserialize fine but cannot run
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.server.workers == Some(0) {
            return Err(config::ConfigError::Message(
                "server.workers must be at least 1".to_string(),
            ));
        }
        if self.health.matches(&self.list.route) {
            return Err(config::ConfigError::Message(format!(
                "list.route '{}' collides with a health check path",
                self.list.route
            )));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
