use crate::{
    constants::{BACKEND_URL_ENV, CONFIG_PATH_ENV, DEFAULT_REQUEST_TIMEOUT_SECS, LOG_LEVEL_ENV},
    errors::{TarantibotError, TarantibotResult},
    models::{default_catalog, CatalogEntry},
};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the answering service; `/ask` is appended to it.
    pub backend_url: String,
    pub request_timeout_secs: u64,
    pub log_level: String,
    pub log_dir: PathBuf,
    pub catalog: Vec<CatalogEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: String::new(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_level: "info".to_string(),
            log_dir: default_log_dir(),
            catalog: default_catalog(),
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_log_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("tarantibot"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Loads the config file (if any), applies environment overrides and
/// validates the result.
pub fn load_config() -> TarantibotResult<Config> {
    let config_path = get_config_path()?;
    let config = read_config(&config_path)?;
    let config = apply_overrides(config, |key| env::var(key).ok());
    validate_config(&config)?;
    Ok(config)
}

fn get_config_path() -> TarantibotResult<PathBuf> {
    if let Ok(path) = env::var(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }

    let home_dir = dirs::home_dir()
        .ok_or_else(|| TarantibotError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("tarantibot").join("config.json"))
}

/// Reads a config file, falling back to defaults when it does not exist.
fn read_config(path: &Path) -> TarantibotResult<Config> {
    if !path.exists() {
        log::debug!("No config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let config_str = fs::read_to_string(path).map_err(|e| {
        TarantibotError::config_error(format!("Failed to read config file: {}", e))
    })?;

    serde_json::from_str(&config_str)
        .map_err(|e| TarantibotError::config_error(format!("Failed to parse config: {}", e)))
}

fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(url) = lookup(BACKEND_URL_ENV).filter(|url| !url.trim().is_empty()) {
        config.backend_url = url.trim().to_string();
    }
    if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|level| !level.trim().is_empty()) {
        config.log_level = level.trim().to_string();
    }
    config
}

pub fn validate_config(config: &Config) -> TarantibotResult<()> {
    let url = config.backend_url.trim();
    if url.is_empty() {
        return Err(TarantibotError::config_error(format!(
            "Backend URL is required (set {} or backend_url in the config file)",
            BACKEND_URL_ENV
        )));
    }

    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(TarantibotError::config_error(format!(
            "Backend URL must start with http:// or https://, got '{}'",
            url
        )));
    }

    if config.request_timeout_secs == 0 {
        return Err(TarantibotError::config_error(
            "request_timeout_secs must be greater than 0",
        ));
    }

    if config.catalog.is_empty() {
        return Err(TarantibotError::config_error("Catalog must list at least one film"));
    }

    if config.catalog.iter().any(|entry| entry.title.trim().is_empty()) {
        return Err(TarantibotError::config_error("Catalog titles must not be blank"));
    }

    Ok(())
}
