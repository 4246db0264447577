use serde::{Deserialize, Serialize};
use anyhow::Result;
use std::path::Path;
use std::time::Duration;
use tokio::fs;

use crate::error::ProbeError;
use crate::util::parse_endpoint;

/// Settings for a single probe run.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ProbeConfig {
    pub endpoint: String,
    pub ping_times: u32,
    pub max_sec_pinging_time: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub emit_metrics: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ProbeConfig {
    /// Build and validate a config for one run.
    pub fn new(
        endpoint: impl Into<String>,
        ping_times: u32,
        max_sec_pinging_time: u64,
    ) -> Result<Self, ProbeError> {
        let config = Self {
            endpoint: endpoint.into(),
            ping_times,
            max_sec_pinging_time,
            log_level: default_log_level(),
            emit_metrics: false,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the run parameters before any request is timed.
    pub fn validate(&self) -> Result<(), ProbeError> {
        if self.ping_times == 0 {
            return Err(ProbeError::InvalidConfig(
                "ping_times must be positive".to_string(),
            ));
        }
        if self.max_sec_pinging_time == 0 {
            return Err(ProbeError::InvalidConfig(
                "max_sec_pinging_time must be positive".to_string(),
            ));
        }
        parse_endpoint(&self.endpoint)?;
        Ok(())
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.max_sec_pinging_time)
    }

    /// Get the log level as a tracing::Level
    pub fn get_tracing_level(&self) -> Result<tracing::Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(tracing::Level::TRACE),
            "debug" => Ok(tracing::Level::DEBUG),
            "info" => Ok(tracing::Level::INFO),
            "warn" | "warning" => Ok(tracing::Level::WARN),
            "error" => Ok(tracing::Level::ERROR),
            _ => Err(anyhow::anyhow!("Invalid log level: {}. Valid levels are: trace, debug, info, warn, error", self.log_level))
        }
    }

    pub async fn load_file(file_path: &Path) -> Result<Self> {
        if !file_path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", file_path.display()));
        }

        let content = fs::read_to_string(file_path).await?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: ProbeConfig = serde_json::from_str(content)?;
        Ok(config)
    }
}

/// Values supplied on the command line, each overriding the file when set.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub ping_times: Option<u32>,
    pub max_sec_pinging_time: Option<u64>,
    pub log_level: Option<String>,
    pub emit_metrics: bool,
}

pub const DEFAULT_PING_TIMES: u32 = 10;
pub const DEFAULT_MAX_SEC_PINGING_TIME: u64 = 10;

/// Merge an optional config file with command line overrides.
pub async fn resolve(file_path: Option<&Path>, overrides: Overrides) -> Result<ProbeConfig> {
    let base = match file_path {
        Some(path) => Some(ProbeConfig::load_file(path).await?),
        None => None,
    };
    merge(base, overrides)
}

fn merge(base: Option<ProbeConfig>, overrides: Overrides) -> Result<ProbeConfig> {
    let endpoint = overrides
        .endpoint
        .or_else(|| base.as_ref().map(|c| c.endpoint.clone()))
        .ok_or_else(|| anyhow::anyhow!("No endpoint given on the command line or in the config file"))?;

    let config = ProbeConfig {
        endpoint,
        ping_times: overrides
            .ping_times
            .or(base.as_ref().map(|c| c.ping_times))
            .unwrap_or(DEFAULT_PING_TIMES),
        max_sec_pinging_time: overrides
            .max_sec_pinging_time
            .or(base.as_ref().map(|c| c.max_sec_pinging_time))
            .unwrap_or(DEFAULT_MAX_SEC_PINGING_TIME),
        log_level: overrides
            .log_level
            .or_else(|| base.as_ref().map(|c| c.log_level.clone()))
            .unwrap_or_else(default_log_level),
        emit_metrics: overrides.emit_metrics || base.as_ref().is_some_and(|c| c.emit_metrics),
    };
    // ping_times, deadline and endpoint are validated by `probe`
    config.get_tracing_level()?;
    Ok(config)
}
