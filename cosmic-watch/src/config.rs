use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, WatchError};

/// Longest date range the NeoWs feed serves in one request
pub const MAX_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub probe: ProbeConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// Days after today included in a refresh
    #[serde(default = "default_window_days")]
    pub window_days: i64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    #[serde(default = "default_probe_url")]
    pub url: String,

    #[serde(default = "default_probe_interval_secs")]
    pub interval_secs: u64,

    #[serde(default = "default_probe_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_asteroid_count")]
    pub asteroid_count: usize,

    #[serde(default = "default_debris_count")]
    pub debris_count: usize,

    /// Fixed scene seed; drawn at startup when absent
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default = "default_frames_per_second")]
    pub frames_per_second: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_api_base() -> String {
    "https://api.nasa.gov/neo/rest/v1".to_string()
}

fn default_api_key() -> String {
    "DEMO_KEY".to_string()
}

fn default_window_days() -> i64 {
    7
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_probe_url() -> String {
    "https://api.nasa.gov/planetary/apod".to_string()
}

fn default_probe_interval_secs() -> u64 {
    30
}

fn default_probe_timeout_secs() -> u64 {
    10
}

fn default_asteroid_count() -> usize {
    15
}

fn default_debris_count() -> usize {
    50
}

fn default_frames_per_second() -> u32 {
    60
}

fn default_output_dir() -> String {
    "reports".to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_key: default_api_key(),
            window_days: default_window_days(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            url: default_probe_url(),
            interval_secs: default_probe_interval_secs(),
            timeout_secs: default_probe_timeout_secs(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            asteroid_count: default_asteroid_count(),
            debris_count: default_debris_count(),
            seed: None,
            frames_per_second: default_frames_per_second(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            feed: FeedConfig::default(),
            probe: ProbeConfig::default(),
            simulation: SimulationConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl WatchConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| match e {
            WatchError::Config(msg) => WatchError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: WatchConfig =
            toml::from_str(content).map_err(|e| WatchError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0..=MAX_WINDOW_DAYS).contains(&self.feed.window_days) {
            return Err(WatchError::Config(format!(
                "feed.window_days must be between 0 and {}",
                MAX_WINDOW_DAYS
            )));
        }
        if self.probe.interval_secs == 0 {
            return Err(WatchError::Config("probe.interval_secs must be positive".to_string()));
        }
        if self.simulation.frames_per_second == 0 {
            return Err(WatchError::Config(
                "simulation.frames_per_second must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = WatchConfig::from_toml("").unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.feed.api_key, "DEMO_KEY");
        assert_eq!(config.feed.window_days, 7);
        assert_eq!(config.probe.interval_secs, 30);
        assert_eq!(config.simulation.asteroid_count, 15);
        assert_eq!(config.simulation.seed, None);
        assert_eq!(config.export.output_dir, "reports");
    }

    #[test]
    fn test_partial_override() {
        let config = WatchConfig::from_toml(
            r#"
            log_level = "debug"

            [feed]
            api_key = "abc123"
            window_days = 3

            [simulation]
            seed = 42
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.feed.api_key, "abc123");
        assert_eq!(config.feed.window_days, 3);
        assert_eq!(config.feed.api_base, "https://api.nasa.gov/neo/rest/v1");
        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.simulation.debris_count, 50);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            WatchConfig::from_toml("[probe]\ninterval_secs = 0"),
            Err(WatchError::Config(_))
        ));
        assert!(WatchConfig::from_toml("log_level = 3").is_err());
        assert!(matches!(
            WatchConfig::from_toml("[feed]\nwindow_days = 8"),
            Err(WatchError::Config(_))
        ));
        assert!(WatchConfig::from_toml("[feed]\nwindow_days = -1").is_err());
        assert!(WatchConfig::from_toml("[feed]\nwindow_days = 0").is_ok());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[export]\noutput_dir = \"out\"\n").unwrap();

        let config = WatchConfig::from_file(&path).unwrap();
        assert_eq!(config.export.output_dir, "out");

        assert!(matches!(
            WatchConfig::from_file(dir.path().join("missing.toml")),
            Err(WatchError::Io(_))
        ));
    }
}
