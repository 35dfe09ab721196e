// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{
    DEFAULT_LOG_FILTER, DEFAULT_MAX_FORKS_PER_CAST, DEFAULT_MAX_LINEAGE_DEPTH,
    DEFAULT_MAX_PROGRAM_LENGTH, DEFAULT_MAX_STEPS_PER_TICK, DEFAULT_TICK_INTERVAL_MS,
};
use crate::errors::ConfigError;
use crate::observability::messages::config::ConfigLoaded;
use crate::observability::messages::StructuredLog;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure for the spell engine.
///
/// Every section and field is optional; missing values fall back to the
/// defaults in [`crate::config::consts`].
///
/// # Fields
/// * `scheduler` - Tick pacing and per-cast limits
/// * `limits` - Bounds applied when decoding programs and copying lineages
/// * `logging` - Tracing filter used by the binary
///
/// # Example
/// ```yaml
/// scheduler:
///   max_steps_per_tick: 32
///   tick_interval_ms: 50
///   max_forks_per_cast: 128
/// limits:
///   max_program_length: 64
///   max_lineage_depth: 16
/// logging:
///   filter: "the_spellbook=debug,info"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub scheduler: SchedulerOptions,
    #[serde(default)]
    pub limits: ProgramLimits,
    #[serde(default)]
    pub logging: LoggingOptions,
}

/// Scheduler pacing and safety limits.
///
/// # Fields
/// * `max_steps_per_tick` - Instructions one cast may run per tick (optional)
/// * `tick_interval_ms` - Delay between ticks of the async driver (optional)
/// * `max_forks_per_cast` - Forks before a cast is terminated (optional)
#[derive(Debug, Default, Deserialize)]
pub struct SchedulerOptions {
    pub max_steps_per_tick: Option<usize>,
    pub tick_interval_ms: Option<u64>,
    pub max_forks_per_cast: Option<usize>,
}

impl SchedulerOptions {
    pub fn get_max_steps_per_tick(&self) -> usize {
        self.max_steps_per_tick.unwrap_or(DEFAULT_MAX_STEPS_PER_TICK)
    }

    pub fn get_tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms.unwrap_or(DEFAULT_TICK_INTERVAL_MS)
    }

    pub fn get_tick_interval(&self) -> Duration {
        Duration::from_millis(self.get_tick_interval_ms())
    }

    pub fn get_max_forks_per_cast(&self) -> usize {
        self.max_forks_per_cast.unwrap_or(DEFAULT_MAX_FORKS_PER_CAST)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProgramLimits {
    pub max_program_length: Option<usize>,
    pub max_lineage_depth: Option<usize>,
}

impl ProgramLimits {
    pub fn get_max_program_length(&self) -> usize {
        self.max_program_length.unwrap_or(DEFAULT_MAX_PROGRAM_LENGTH)
    }

    pub fn get_max_lineage_depth(&self) -> usize {
        self.max_lineage_depth.unwrap_or(DEFAULT_MAX_LINEAGE_DEPTH)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoggingOptions {
    pub filter: Option<String>,
}

impl LoggingOptions {
    pub fn get_filter(&self) -> &str {
        self.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

/// On-disk format of a config file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "toml" => Ok(ConfigFormat::Toml),
            _ => Err(ConfigError::UnsupportedFormat { extension }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigFormat::Yaml => "yaml",
            ConfigFormat::Toml => "toml",
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: EngineConfig = serde_yaml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: EngineConfig = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the scheduler cannot make progress with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks: [(&'static str, Option<u64>); 5] = [
            (
                "scheduler.max_steps_per_tick",
                self.scheduler.max_steps_per_tick.map(|v| v as u64),
            ),
            ("scheduler.tick_interval_ms", self.scheduler.tick_interval_ms),
            (
                "scheduler.max_forks_per_cast",
                self.scheduler.max_forks_per_cast.map(|v| v as u64),
            ),
            (
                "limits.max_program_length",
                self.limits.max_program_length.map(|v| v as u64),
            ),
            (
                "limits.max_lineage_depth",
                self.limits.max_lineage_depth.map(|v| v as u64),
            ),
        ];
        for (field, value) in checks {
            if value == Some(0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }
        if let Some(filter) = &self.logging.filter {
            if filter.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field: "logging.filter",
                    reason: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Load and validate an engine config from a YAML or TOML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig, ConfigError> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg = match format {
        ConfigFormat::Yaml => EngineConfig::from_yaml_str(&content)?,
        ConfigFormat::Toml => EngineConfig::from_toml_str(&content)?,
    };

    ConfigLoaded {
        path: &path.display().to_string(),
        format: format.as_str(),
        max_steps_per_tick: cfg.scheduler.get_max_steps_per_tick(),
        tick_interval_ms: cfg.scheduler.get_tick_interval_ms(),
    }
    .log();
    Ok(cfg)
}
