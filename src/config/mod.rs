mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

/// Upstream base URL override, as existing deployments spell it in their `.env`.
pub const ML_SERVER_ENV: &str = "ML_Server";
/// Upper-case spelling, checked when `ML_Server` is unset or blank.
pub const ML_SERVER_UPPER_ENV: &str = "ML_SERVER";
pub const PORT_ENV: &str = "PORT";

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    let config = load_from(&config_path).await?;

    apply_overrides(
        config,
        ml_server_override(|name| env::var(name).ok()),
        env::var(PORT_ENV).ok(),
    )
}

/// Picks the upstream URL from `ML_Server`, then `ML_SERVER`, skipping blank values.
pub fn ml_server_override(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    [ML_SERVER_ENV, ML_SERVER_UPPER_ENV]
        .into_iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
}

/// Reads a YAML config file. A missing file yields the defaults.
pub async fn load_from(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    match tokio::fs::read_to_string(config_path).await {
        Ok(config_str) => Ok(serde_yaml::from_str(&config_str)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No configuration file at {}, using defaults", config_path);
            Ok(Config::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Applies environment overrides and checks the result is usable.
pub fn apply_overrides(
    mut config: Config,
    ml_server: Option<String>,
    port: Option<String>,
) -> Result<Config> {
    if let Some(base_url) = ml_server.filter(|s| !s.trim().is_empty()) {
        config.upstream.base_url = base_url;
    }

    if let Some(port) = port.filter(|s| !s.trim().is_empty()) {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| Error::config(format!("Invalid {}: '{}'", PORT_ENV, port)))?;
    }

    if config.upstream.base_url.trim().is_empty() {
        return Err(Error::config(format!(
            "upstream.base_url is not set (set it in the config file or via {} / {})",
            ML_SERVER_ENV, ML_SERVER_UPPER_ENV
        )));
    }

    Ok(config)
}
