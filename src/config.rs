use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::generator::Month;

/// Root of the local log tree, shared by both binaries.
pub const LOCAL_LOG_DIR: &str = "./transaction-logs";

const DEFAULT_SFTP_PORT: u16 = 2022;

/// Fixed generation parameters. Both binaries run with `default()`; the
/// struct exists so tests can generate smaller runs.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub client_start: u32,
    pub client_count: u32,
    pub first_month: Month,
    pub last_month: Month,
    pub transactions_per_month: usize,
    pub id_seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            client_start: 1,
            client_count: 5,
            first_month: Month::new(2024, 12),
            last_month: Month::new(2025, 3),
            transactions_per_month: 50,
            id_seed: 1000,
        }
    }
}

impl GeneratorConfig {
    pub fn clients(&self) -> Vec<String> {
        (self.client_start..self.client_start + self.client_count)
            .map(|i| format!("client{}", i))
            .collect()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid SFTP_PORT value: {0}")]
    InvalidPort(String),
}

/// SFTP endpoint settings, read from the environment.
#[derive(Debug, Clone)]
pub struct SftpConfig {
    pub host: String,
    pub user: String,
    pub private_key: PathBuf,
    pub port: u16,
}

impl SftpConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = require("SFTP_HOST")?;
        let user = require("SFTP_USER")?;
        let private_key = expand_tilde(&require("SFTP_PRIVATE_KEY")?);
        let port = match env::var("SFTP_PORT") {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            Err(_) => DEFAULT_SFTP_PORT,
        };

        Ok(SftpConfig { host, user, private_key, port })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = env::var("HOME") {
            return Path::new(&home).join(rest);
        }
    }
    PathBuf::from(path)
}
