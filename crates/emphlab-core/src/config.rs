//! # Lab Configuration
//!
//! YAML-based configuration for the emphasis lab:
//!
//! - Control ranges for the four sliders (resistance, capacitance,
//!   frequency, amplitude) — these enforce the engine's positive-only
//!   preconditions at the UI boundary
//! - Frequency sweep settings for the Bode view
//! - Probe trace settings for the waveform view
//! - Logging configuration
//!
//! ## Configuration Search Path
//!
//! Configuration is loaded from the first file found:
//! 1. Path specified via `EMPHLAB_CONFIG` environment variable
//! 2. `./emphlab.yaml` (current directory)
//! 3. `~/.config/emphlab/config.yaml` (user config)
//! 4. `/etc/emphlab/config.yaml` (system config)
//!
//! ## Example Configuration
//!
//! ```yaml
//! controls:
//!   resistance_ohms: { min: 100.0, max: 10000.0, default: 1000.0, step: 100.0 }
//!   capacitance_uf: { min: 0.1, max: 10.0, default: 1.0, step: 0.1 }
//!
//! sweep:
//!   f_min_hz: 1.0
//!   f_max_hz: 100000.0
//!   points: 256
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::logging::LogConfig;

/// Error type for configuration operations.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found
    NotFound(String),
    /// Failed to read configuration file
    ReadError(String),
    /// Failed to parse configuration
    ParseError(String),
    /// Invalid configuration value
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(msg) => write!(f, "config not found: {}", msg),
            ConfigError::ReadError(msg) => write!(f, "failed to read config: {}", msg),
            ConfigError::ParseError(msg) => write!(f, "failed to parse config: {}", msg),
            ConfigError::ValidationError(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Bounds for one slider control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlRange {
    /// Lowest selectable value
    pub min: f64,
    /// Highest selectable value
    pub max: f64,
    /// Initial value
    pub default: f64,
    /// Slider increment
    pub step: f64,
}

impl ControlRange {
    /// Whether a value lies within the control's bounds.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, name: &str, positive_only: bool) -> Result<(), ConfigError> {
        let floor_ok = if positive_only {
            self.min > 0.0
        } else {
            self.min >= 0.0
        };
        if !floor_ok {
            return Err(ConfigError::ValidationError(format!(
                "{}.min must be {}, got {}",
                name,
                if positive_only { "> 0" } else { ">= 0" },
                self.min
            )));
        }
        if !(self.max > self.min) {
            return Err(ConfigError::ValidationError(format!(
                "{} must satisfy min < max, got [{}, {}]",
                name, self.min, self.max
            )));
        }
        if !self.contains(self.default) {
            return Err(ConfigError::ValidationError(format!(
                "{}.default {} outside [{}, {}]",
                name, self.default, self.min, self.max
            )));
        }
        if !(self.step > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "{}.step must be > 0, got {}",
                name, self.step
            )));
        }
        Ok(())
    }
}

/// Slider bounds for the four lab controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Resistance control in ohms
    pub resistance_ohms: ControlRange,
    /// Capacitance control in microfarads
    pub capacitance_uf: ControlRange,
    /// Probe frequency control in Hz
    pub frequency_hz: ControlRange,
    /// Probe amplitude control in volts
    pub amplitude_volts: ControlRange,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            resistance_ohms: ControlRange {
                min: 100.0,
                max: 10_000.0,
                default: 1000.0,
                step: 100.0,
            },
            capacitance_uf: ControlRange {
                min: 0.1,
                max: 10.0,
                default: 1.0,
                step: 0.1,
            },
            frequency_hz: ControlRange {
                min: 100.0,
                max: 20_000.0,
                default: 1000.0,
                step: 100.0,
            },
            amplitude_volts: ControlRange {
                min: 0.5,
                max: 5.0,
                default: 1.0,
                step: 0.5,
            },
        }
    }
}

/// Frequency sweep settings for the Bode view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Sweep start in Hz
    pub f_min_hz: f64,
    /// Sweep end in Hz
    pub f_max_hz: f64,
    /// Number of curve samples
    pub points: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            f_min_hz: 1.0,
            f_max_hz: 100_000.0,
            points: 256,
        }
    }
}

/// Probe trace settings for the waveform view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Samples per trace
    pub samples: usize,
    /// Probe cycles shown per trace window
    pub cycles: f64,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            samples: 512,
            cycles: 3.0,
        }
    }
}

/// Complete lab configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LabConfig {
    /// Slider control bounds
    pub controls: ControlsConfig,
    /// Bode sweep settings
    pub sweep: SweepConfig,
    /// Waveform trace settings
    pub trace: TraceConfig,
    /// Logging configuration
    pub logging: LogConfig,
}

impl LabConfig {
    /// Load configuration from the default search path.
    ///
    /// Search order:
    /// 1. `EMPHLAB_CONFIG` environment variable
    /// 2. `./emphlab.yaml`
    /// 3. `~/.config/emphlab/config.yaml`
    /// 4. `/etc/emphlab/config.yaml`
    ///
    /// Returns default config if no file is found.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var("EMPHLAB_CONFIG") {
            if Path::new(&path).exists() {
                return Self::load_from(Path::new(&path));
            }
        }

        for path in Self::config_search_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;
        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            serde_yaml::to_string(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        std::fs::write(path, content)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))
    }

    /// Get configuration search paths.
    pub fn config_search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./emphlab.yaml")];

        if let Some(dirs) = directories::ProjectDirs::from("", "", "emphlab") {
            paths.push(dirs.config_dir().join("config.yaml"));
        }

        paths.push(PathBuf::from("/etc/emphlab/config.yaml"));
        paths
    }

    /// Validate the configuration.
    ///
    /// Component controls must be strictly positive so every value the UI
    /// can produce satisfies the engine's preconditions; probe controls
    /// may reach down to zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.controls
            .resistance_ohms
            .validate("controls.resistance_ohms", true)?;
        self.controls
            .capacitance_uf
            .validate("controls.capacitance_uf", true)?;
        self.controls
            .frequency_hz
            .validate("controls.frequency_hz", false)?;
        self.controls
            .amplitude_volts
            .validate("controls.amplitude_volts", false)?;

        if !(self.sweep.f_min_hz > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "sweep.f_min_hz must be > 0, got {}",
                self.sweep.f_min_hz
            )));
        }
        if !(self.sweep.f_max_hz > self.sweep.f_min_hz) {
            return Err(ConfigError::ValidationError(format!(
                "sweep range must satisfy f_min < f_max, got [{}, {}]",
                self.sweep.f_min_hz, self.sweep.f_max_hz
            )));
        }
        if self.sweep.points < 2 {
            return Err(ConfigError::ValidationError(format!(
                "sweep.points must be >= 2, got {}",
                self.sweep.points
            )));
        }

        if self.trace.samples < 2 {
            return Err(ConfigError::ValidationError(format!(
                "trace.samples must be >= 2, got {}",
                self.trace.samples
            )));
        }
        if !(self.trace.cycles > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "trace.cycles must be > 0, got {}",
                self.trace.cycles
            )));
        }

        Ok(())
    }

    /// Generate example configuration YAML.
    pub fn example_yaml() -> String {
        serde_yaml::to_string(&Self::default()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LabConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.controls.resistance_ohms.default, 1000.0);
        assert_eq!(config.controls.capacitance_uf.default, 1.0);
        assert_eq!(config.sweep.f_min_hz, 1.0);
        assert_eq!(config.sweep.f_max_hz, 100_000.0);
        assert_eq!(config.trace.cycles, 3.0);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
controls:
  resistance_ohms: { min: 50.0, max: 47000.0, default: 4700.0, step: 50.0 }

sweep:
  f_min_hz: 10.0
  f_max_hz: 50000.0
  points: 128
"#;
        let config = LabConfig::parse(yaml).unwrap();
        assert_eq!(config.controls.resistance_ohms.max, 47_000.0);
        assert_eq!(config.controls.resistance_ohms.default, 4700.0);
        assert_eq!(config.sweep.points, 128);
        // Untouched sections keep their defaults
        assert_eq!(config.controls.capacitance_uf.default, 1.0);
        assert_eq!(config.trace.samples, 512);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_component_floor() {
        let mut config = LabConfig::default();
        config.controls.capacitance_uf.min = 0.0;
        assert!(config.validate().is_err());

        let mut config = LabConfig::default();
        config.controls.resistance_ohms.min = -10.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_ranges() {
        let mut config = LabConfig::default();
        config.controls.frequency_hz.max = config.controls.frequency_hz.min;
        assert!(config.validate().is_err());

        let mut config = LabConfig::default();
        config.controls.amplitude_volts.default = 99.0;
        assert!(config.validate().is_err());

        let mut config = LabConfig::default();
        config.sweep.f_max_hz = 0.5;
        assert!(config.validate().is_err());

        let mut config = LabConfig::default();
        config.sweep.points = 1;
        assert!(config.validate().is_err());

        let mut config = LabConfig::default();
        config.trace.cycles = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_control_contains() {
        let range = ControlRange {
            min: 0.1,
            max: 10.0,
            default: 1.0,
            step: 0.1,
        };
        assert!(range.contains(0.1));
        assert!(range.contains(10.0));
        assert!(!range.contains(0.05));
        assert!(!range.contains(11.0));
    }

    #[test]
    fn test_example_yaml_round_trips() {
        let yaml = LabConfig::example_yaml();
        assert!(yaml.contains("controls:"));
        assert!(yaml.contains("sweep:"));
        let parsed = LabConfig::parse(&yaml).unwrap();
        assert!(parsed.validate().is_ok());
        assert_eq!(parsed.sweep.points, LabConfig::default().sweep.points);
    }

    #[test]
    fn test_config_search_paths() {
        let paths = LabConfig::config_search_paths();
        assert!(!paths.is_empty());
        assert!(paths[0].ends_with("emphlab.yaml"));
    }
}
