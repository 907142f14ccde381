//! Logging utilities for flightgen
//!
//! This module provides logging setup and configuration.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{Error, Result};

/// Initialize logging based on configuration
///
/// Without a logging section a plain stdout subscriber at `info` is installed.
pub fn init_logging(config: &Option<LoggingConfig>) -> Result<()> {
    let level = config
        .as_ref()
        .map(|cfg| parse_level(&cfg.level))
        .unwrap_or(Level::INFO);

    let directive = format!("flightgen={}", level)
        .parse()
        .map_err(|e| Error::ConfigError(format!("Invalid log directive: {}", e)))?;
    let env_filter = EnvFilter::from_default_env().add_directive(directive);

    let json = config
        .as_ref()
        .map_or(false, |cfg| cfg.format.eq_ignore_ascii_case("json"));
    let file = config.as_ref().and_then(|cfg| cfg.file.as_deref());
    let stdout = config.as_ref().map_or(true, |cfg| cfg.stdout);

    let builder = fmt::Subscriber::builder().with_env_filter(env_filter);

    let installed = match (file, json) {
        (Some(path), json) => {
            // Ensure directory exists
            if let Some(parent) = Path::new(path).parent() {
                std::fs::create_dir_all(parent)?;
            }
            let writer = Arc::new(File::create(path)?);

            if json {
                tracing::subscriber::set_global_default(
                    builder.json().with_writer(writer).finish(),
                )
            } else {
                tracing::subscriber::set_global_default(
                    builder.with_ansi(false).with_writer(writer).finish(),
                )
            }
        }
        (None, true) if stdout => {
            tracing::subscriber::set_global_default(builder.json().finish())
        }
        (None, false) if stdout => tracing::subscriber::set_global_default(builder.finish()),
        (None, _) => return Ok(()),
    };

    installed.map_err(|e| Error::Unknown(e.to_string()))
}

/// Parse a level name, falling back to `info`
pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
