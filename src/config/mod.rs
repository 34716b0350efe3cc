//! Walker configuration.
//!
//! Loaded from YAML files and environment variables, the same sources in
//! the same priority order for every consumer of the walker.

mod throttle;

pub use throttle::{ThrottleConfig, DEFAULT_MIN_INTERVAL_MS};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "event-log-walker.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "EVENT_LOG_WALKER_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "EVENT_LOG_WALKER";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "EVENT_LOG_WALKER_LOG";

pub use ::config::ConfigError;
use serde::Deserialize;

/// Main walker configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page fetch rate limit.
    pub throttle: ThrottleConfig,
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `DEFAULT_CONFIG_FILE` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. Environment variables with `CONFIG_ENV_PREFIX` prefix, `__` separated
    ///    (e.g. `EVENT_LOG_WALKER__THROTTLE__MIN_INTERVAL_MS=250`)
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Create config for testing: no throttling.
    pub fn for_test() -> Self {
        Self {
            throttle: ThrottleConfig::unthrottled(),
        }
    }
}
