use dotenvy::dotenv;
use log::{info, warn};
use std::{
    env as stdenv,
    path::{Path, PathBuf},
};

use crate::error::ConfigError;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8081;
pub const DEFAULT_CORS_FILE: &str = ".env_cors";
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    pub cors_file: String,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workers: None,
            cors_file: DEFAULT_CORS_FILE.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    /// Reads the process environment; call [`load_env_file`] first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| stdenv::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => {
                let parsed = raw.trim().parse::<u16>();
                parsed.map_err(|source| ConfigError::InvalidPort { value: raw, source })?
            }
            None => defaults.port,
        };

        let workers = match non_empty("WORKERS") {
            Some(raw) => {
                let parsed = raw.trim().parse::<usize>();
                match parsed {
                    Ok(n) if n > 0 => Some(n),
                    _ => return Err(ConfigError::InvalidWorkers(raw)),
                }
            }
            None => None,
        };

        let max_body_bytes = match non_empty("MAX_BODY_BYTES") {
            Some(raw) => {
                let parsed = raw.trim().parse::<usize>();
                match parsed {
                    Ok(n) if n > 0 => n,
                    _ => return Err(ConfigError::InvalidBodyLimit(raw)),
                }
            }
            None => defaults.max_body_bytes,
        };

        Ok(Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port,
            workers,
            cors_file: non_empty("CORS_FILE").unwrap_or(defaults.cors_file),
            max_body_bytes,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Loads `.env` into the process environment. Runs before the logger is
/// installed so `RUST_LOG` can come from the file; pass the result to
/// [`report_env_file`] once logging is up.
pub fn load_env_file() -> dotenvy::Result<PathBuf> {
    dotenv()
}

/// Loads `<dir>/.env` without searching parent directories.
pub fn load_env_file_from(dir: &Path) -> dotenvy::Result<PathBuf> {
    let path = dir.join(".env");
    dotenvy::from_path(&path).map(|()| path)
}

pub fn report_env_file(loaded: &dotenvy::Result<PathBuf>) {
    match loaded {
        Ok(path) => info!(".env loaded from: {}", path.display()),
        Err(e) if e.not_found() => {
            let current_dir =
                stdenv::current_dir().unwrap_or_else(|_| Path::new(".").to_path_buf());
            info!(
                "no .env file at {}, using process environment only",
                current_dir.join(".env").display()
            );
        }
        Err(e) => warn!(".env could not be loaded: {}", e),
    }
}
