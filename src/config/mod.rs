mod types;

pub use types::*;

use crate::Result;
use std::env;
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    load_from(&config_path).await
}

/// Reads the YAML file at `path`. A missing file yields the defaults so the
/// client can run without any configuration.
pub async fn load_from(path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", path);

    let config_str = match tokio::fs::read_to_string(path).await {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No configuration file at {}, using defaults", path);
            return Ok(Config::default());
        }
        Err(e) => return Err(e.into()),
    };
    let config: Config = serde_yaml::from_str(&config_str)?;

    if config.backend.poll_interval_ms == 0 {
        return Err(crate::Error::config("backend.poll_interval_ms must be positive"));
    }

    Ok(config)
}
