// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/vigil

//! Configuration module

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::detection::validate_threshold;
use crate::error::AlarmError;
use crate::sensors::SensorType;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Application name
    pub app_name: String,

    /// Log filter directives (`info`, `vigil=debug`, ...) used when no
    /// command line flag overrides them
    pub log_level: String,

    /// Engine configuration
    pub engine: EngineConfig,

    /// Demo run configuration
    pub demo: DemoConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "Vigil".to_string(),
            log_level: "info".to_string(),
            engine: EngineConfig::default(),
            demo: DemoConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {:?}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {:?}", path))?;
        config.validate()?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();

            // Create parent directories
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            config.save(path)?;
            Ok(config)
        }
    }

    /// Check values serde cannot
    pub fn validate(&self) -> std::result::Result<(), AlarmError> {
        validate_threshold(self.engine.confidence_threshold)
            .map_err(|e| AlarmError::Config(e.to_string()))?;

        if self.demo.steps == 0 {
            return Err(AlarmError::Config("demo.steps must be at least 1".to_string()));
        }
        if self.demo.scan_every == 0 {
            return Err(AlarmError::Config("demo.scan_every must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Get configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("vigil"))
            .unwrap_or_else(|| PathBuf::from("./config"))
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }
}

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum classifier confidence, in percent, for a frame to count as a threat
    pub confidence_threshold: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 50.0,
        }
    }
}

/// Scripted demo configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// RNG seed; a fresh seed is drawn when unset
    pub seed: Option<u64>,

    /// Number of simulated sensor events
    pub steps: usize,

    /// Delay between simulated events in milliseconds
    pub tick_ms: u64,

    /// Run a camera scan every this many events
    pub scan_every: usize,

    /// Sensors installed before the run starts
    pub sensors: Vec<DemoSensor>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed: None,
            steps: 24,
            tick_ms: 50,
            scan_every: 6,
            sensors: vec![
                DemoSensor::new("Front door", SensorType::Door),
                DemoSensor::new("Back door", SensorType::Door),
                DemoSensor::new("Kitchen window", SensorType::Window),
                DemoSensor::new("Hallway", SensorType::Motion),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoSensor {
    pub name: String,
    pub sensor_type: SensorType,
}

impl DemoSensor {
    pub fn new(name: &str, sensor_type: SensorType) -> Self {
        Self {
            name: name.to_string(),
            sensor_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let created = Config::load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(Config::load(&path).unwrap(), created);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[engine]\nconfidence_threshold = 72.5\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.engine.confidence_threshold, 72.5);
        assert_eq!(config.demo, DemoConfig::default());
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[engine]\nconfidence_threshold = 140.0\n").unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_zero_steps_rejected() {
        let mut config = Config::default();
        config.demo.steps = 0;
        assert!(matches!(config.validate(), Err(AlarmError::Config(_))));
    }
}
