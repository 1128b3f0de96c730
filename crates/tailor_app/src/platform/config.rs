use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use tailor_engine::{OracleSettings, DEFAULT_BASE_URL, DEFAULT_MODEL};
use thiserror::Error;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILENAME: &str = "resume_tailor.ron";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Checked when the configured variable is unset.
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("unknown log level {0:?}")]
    LogLevel(String),
    #[error("no API key found in ${primary} or ${fallback}")]
    MissingApiKey { primary: String, fallback: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model: String,
    pub base_url: String,
    /// Environment variable holding the API key. The key itself never lives in the file.
    pub api_key_env: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub login_delay_ms: u64,
    pub output_dir: PathBuf,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let oracle = OracleSettings::default();
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            request_timeout_secs: oracle.request_timeout.as_secs(),
            connect_timeout_secs: oracle.connect_timeout.as_secs(),
            max_response_bytes: oracle.max_response_bytes,
            login_delay_ms: 1500,
            output_dir: PathBuf::from("output"),
            log_destination: LogDestination::File,
            log_file: PathBuf::from("resume_tailor.log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads `explicit` if given (it must exist), otherwise `./resume_tailor.ron`
    /// when present, otherwise the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILENAME);
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(self.log_level.trim())
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    /// Reads the API key from the configured variable, then from `API_KEY`.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        self.api_key_from(|name| std::env::var(name).ok())
    }

    fn api_key_from(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<String, ConfigError> {
        [self.api_key_env.as_str(), FALLBACK_API_KEY_ENV]
            .into_iter()
            .filter_map(|name| lookup(name))
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey {
                primary: self.api_key_env.clone(),
                fallback: FALLBACK_API_KEY_ENV.to_string(),
            })
    }

    pub fn oracle_settings(&self, api_key: String) -> OracleSettings {
        OracleSettings {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            api_key,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_response_bytes: self.max_response_bytes,
        }
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }
}
