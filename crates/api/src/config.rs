//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the OT
//! Scheduler API server. It retrieves configuration values from environment
//! variables and provides defaults where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 8001)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DB_MAX_CONNECTIONS`: Size of the connection pool (default: 5)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `OT_DAY_START` / `OT_DAY_END`: Theater opening hours as `HH:MM` (default: 08:00-20:00)
//! - `OT_SLOT_MINUTES`: Length of offered free slots (default: 120)
//! - `OT_SLOT_STEP_MINUTES`: Distance between offered slot starts (default: 60)

use chrono::NaiveTime;
use eyre::{Result, WrapErr, eyre};
use otsched_core::{errors::OtResult, scheduling::OperatingDay, time_format};
use otsched_db::DEFAULT_MAX_CONNECTIONS;
use std::env;
use tracing::Level;

/// Configuration for the OT Scheduler API server
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Maximum number of pooled database connections
    pub db_max_connections: u32,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    pub day_start: NaiveTime,
    pub day_end: NaiveTime,
    pub slot_minutes: i64,
    pub slot_step_minutes: i64,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - An OT_* value is malformed
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "8001".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;
        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        // Logging settings
        let log_level =
            parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS")
            .ok()
            .map(|origins| parse_origins(&origins));

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Theater operating hours
        let defaults = OperatingDay::default();
        let day_start = time_var("OT_DAY_START", defaults.opens)?;
        let day_end = time_var("OT_DAY_END", defaults.closes)?;
        let slot_minutes = minutes_var("OT_SLOT_MINUTES", defaults.slot_minutes)?;
        let slot_step_minutes = minutes_var("OT_SLOT_STEP_MINUTES", defaults.step_minutes)?;

        Ok(Self {
            host,
            port,
            database_url,
            db_max_connections,
            log_level,
            cors_origins,
            request_timeout,
            day_start,
            day_end,
            slot_minutes,
            slot_step_minutes,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The validated opening hours for free-slot search.
    pub fn operating_day(&self) -> OtResult<OperatingDay> {
        OperatingDay::new(
            self.day_start,
            self.day_end,
            self.slot_minutes,
            self.slot_step_minutes,
        )
    }
}

/// Maps a `LOG_LEVEL` value to a tracing level, falling back to INFO.
pub fn parse_log_level(raw: &str) -> Level {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn time_var(name: &str, default: NaiveTime) -> Result<NaiveTime> {
    match env::var(name) {
        Ok(raw) => time_format::parse(&raw).map_err(|e| eyre!("Invalid {} value: {}", name, e)),
        Err(_) => Ok(default),
    }
}

fn minutes_var(name: &str, default: i64) -> Result<i64> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .wrap_err_with(|| format!("Invalid {} value", name)),
        Err(_) => Ok(default),
    }
}
