//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `PLAGCHECK_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_ELIGIBLE_CONTENT_TYPE, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PLAGIARISM_THRESHOLD,
    MAX_SIMILARITY_SCORE,
};

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `PLAGCHECK_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `5000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Root directory of the document store. Default: `./.data`.
    pub storage_path: PathBuf,

    /// Sentence-encoder model directory (`config.json`, `model.safetensors`, `tokenizer.json`).
    /// When unset the encoder runs in stub mode.
    pub model_path: Option<PathBuf>,

    /// Content type a document must carry to be compared. Default: `text/plain`.
    pub eligible_content_type: String,

    /// Origin allowed by the CORS layer. Default: `http://localhost:5173`.
    pub cors_origin: String,

    /// Maximum accepted upload body, in bytes. Default: 10 MiB.
    pub max_upload_bytes: usize,

    /// Plagiarism threshold in percent. Default: `80.0`.
    pub threshold: f64,
}

/// Default CORS origin used when `PLAGCHECK_CORS_ORIGIN` is not set.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            storage_path: PathBuf::from("./.data"),
            model_path: None,
            eligible_content_type: DEFAULT_ELIGIBLE_CONTENT_TYPE.to_string(),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            threshold: DEFAULT_PLAGIARISM_THRESHOLD,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "PLAGCHECK_PORT";
    const ENV_BIND_ADDR: &'static str = "PLAGCHECK_BIND_ADDR";
    const ENV_STORAGE_PATH: &'static str = "PLAGCHECK_STORAGE_PATH";
    const ENV_MODEL_PATH: &'static str = "PLAGCHECK_MODEL_PATH";
    const ENV_CONTENT_TYPE: &'static str = "PLAGCHECK_CONTENT_TYPE";
    const ENV_CORS_ORIGIN: &'static str = "PLAGCHECK_CORS_ORIGIN";
    const ENV_MAX_UPLOAD_BYTES: &'static str = "PLAGCHECK_MAX_UPLOAD_BYTES";
    const ENV_THRESHOLD: &'static str = "PLAGCHECK_THRESHOLD";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let storage_path = Self::parse_path_from_env(Self::ENV_STORAGE_PATH, defaults.storage_path);
        let model_path = Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH);
        let eligible_content_type =
            Self::parse_string_from_env(Self::ENV_CONTENT_TYPE, defaults.eligible_content_type);
        let cors_origin = Self::parse_string_from_env(Self::ENV_CORS_ORIGIN, defaults.cors_origin);
        let max_upload_bytes = Self::parse_upload_limit_from_env(defaults.max_upload_bytes)?;
        let threshold = Self::parse_threshold_from_env(defaults.threshold)?;

        Ok(Self {
            port,
            bind_addr,
            storage_path,
            model_path,
            eligible_content_type,
            cors_origin,
            max_upload_bytes,
            threshold,
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_path.exists() && !self.storage_path.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.storage_path.clone(),
            });
        }

        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if self.eligible_content_type.trim().is_empty() {
            return Err(ConfigError::EmptyContentType);
        }

        if axum::http::HeaderValue::from_str(&self.cors_origin).is_err() {
            return Err(ConfigError::InvalidCorsOrigin {
                value: self.cors_origin.clone(),
            });
        }

        if self.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidUploadLimit);
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_threshold_from_env(default: f64) -> Result<f64, ConfigError> {
        match env::var(Self::ENV_THRESHOLD) {
            Ok(value) => {
                let threshold: f64 =
                    value
                        .trim()
                        .parse()
                        .map_err(|e| ConfigError::ThresholdParseError {
                            value: value.clone(),
                            source: e,
                        })?;

                if !(0.0..=MAX_SIMILARITY_SCORE).contains(&threshold) {
                    return Err(ConfigError::InvalidThreshold { value });
                }

                Ok(threshold)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_upload_limit_from_env(default: usize) -> Result<usize, ConfigError> {
        match env::var(Self::ENV_MAX_UPLOAD_BYTES) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::UploadLimitParseError { value, source: e }),
            Err(_) => Ok(default),
        }
    }
}
