//! Configuration handling for flightgen

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Load configuration from a TOML file
pub fn load_from_file(path: &str) -> Result<Config> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| Error::ConfigError(format!("Failed to read config file {}: {}", path, e)))?;

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| Error::ConfigError(format!("Failed to parse config file: {}", e)))?;

    config.validate()?;
    Ok(config)
}

/// Represents the complete flightgen configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    pub data: DataConfig,
    #[serde(default)]
    pub loading: LoadingConfig,
    pub logging: Option<LoggingConfig>,
}

impl Config {
    /// Reject settings the generators cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.generation.max_capacity == 0 {
            return Err(Error::ConfigError(
                "generation.max_capacity must be at least 1".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.generation.pir_rate) {
            return Err(Error::ConfigError(format!(
                "generation.pir_rate must be within 0..=1, got {}",
                self.generation.pir_rate
            )));
        }

        if self.loading.batch_size == 0 || self.data.chunk_size == 0 {
            return Err(Error::ConfigError(
                "loading.batch_size and data.chunk_size must be positive".to_string(),
            ));
        }

        if self.database.url.is_none() && self.database.credentials_file.is_none() {
            return Err(Error::ConfigError(
                "database needs either `url` or `credentials_file`".to_string(),
            ));
        }

        Ok(())
    }
}

/// Database connection configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub driver: String,
    pub url: Option<String>,
    pub credentials_file: Option<String>,
    pub pool_size: Option<u32>,
    pub timeout_seconds: Option<u64>,
}

impl DatabaseConfig {
    /// Resolve the connection URL, reading the credentials file when no URL is set
    pub fn resolve_url(&self) -> Result<String> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }

        match &self.credentials_file {
            Some(path) => Ok(Credentials::load(path)?.to_url()),
            None => Err(Error::ConfigError(
                "database needs either `url` or `credentials_file`".to_string(),
            )),
        }
    }
}

/// Database credentials kept outside the main config file
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Credentials {
    pub driver: String,
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
}

impl Credentials {
    /// Load credentials from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!(
                "Failed to read credentials file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(serde_yaml::from_str(&raw)?)
    }

    /// Build a connection URL from the credential parts
    pub fn to_url(&self) -> String {
        format!(
            "{}://{}:{}@{}:{}/{}",
            self.driver, self.username, self.password, self.host, self.port, self.database
        )
    }
}

/// Synthetic data generation settings
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GenerationConfig {
    pub year: i32,
    pub flights_per_quarter: usize,
    pub passenger_count: usize,
    pub max_capacity: usize,
    pub seed: u64,
    /// Anchor for passenger ages; defaults to today
    pub reference_date: Option<NaiveDate>,
    pub pir_rate: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            year: 2023,
            flights_per_quarter: 2000,
            passenger_count: 20_000,
            max_capacity: 20,
            seed: 42,
            reference_date: None,
            pir_rate: 0.02,
        }
    }
}

/// Input and output file locations
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DataConfig {
    pub airline_csv: String,
    pub airport_csv: String,
    pub output_directory: String,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_chunk_size() -> usize {
    50_000
}

/// Upsert behavior configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoadingConfig {
    pub batch_size: usize,
    /// Write all batches of one table in a single transaction
    pub single_transaction: bool,
    pub history_table: String,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            batch_size: 500,
            single_transaction: true,
            history_table: "load_history".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    pub format: String,
    pub stdout: bool,
}
