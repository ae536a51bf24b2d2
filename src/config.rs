// ⚙️ Configuration - environment variables, optionally from a .env file
use crate::error::ConfigError;
use crate::loader::DataSource;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `SALES_DATA_SOURCE`: URL or file path of the transaction collection
    pub data_source: DataSource,
    /// `SALES_BIND_ADDR`: address the HTTP server listens on
    pub bind_addr: String,
    /// `SALES_FETCH_TIMEOUT_SECS`: timeout for the remote fetch
    pub fetch_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_source: DataSource::default(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Read the process environment, after loading `.env` if one exists
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys take their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Config::default();

        if let Some(source) = get("SALES_DATA_SOURCE") {
            config.data_source = DataSource::parse(&source);
        }

        if let Some(addr) = get("SALES_BIND_ADDR") {
            config.bind_addr = addr.trim().to_string();
        }

        if let Some(raw) = get("SALES_FETCH_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "SALES_FETCH_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
            config.fetch_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
