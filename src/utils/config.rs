use crate::algorithms::ar::ArConfig;
use crate::core::constants::LOCATION_TIMEOUT_MS;
use crate::core::DistanceUnit;
use crate::processing::viewport::ViewportConfig;
use crate::validation::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// Engine-wide configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Unit for marker distances
    pub distance_unit: DistanceUnit,
    /// Bounding box / viewport parameters
    pub viewport: ViewportConfig,
    /// AR selection and placement
    pub ar: ArConfig,
    /// Maximum wait for a location fix (milliseconds)
    pub location_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            distance_unit: DistanceUnit::Miles,
            viewport: ViewportConfig::default(),
            ar: ArConfig::default(),
            location_timeout_ms: LOCATION_TIMEOUT_MS,
        }
    }
}

/// Configuration validation result
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigError>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl EngineConfig {
    pub fn location_timeout(&self) -> Duration {
        Duration::from_millis(self.location_timeout_ms)
    }

    /// Check every parameter, collecting all problems
    pub fn check(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        let extent = &self.viewport.fallback_extent;
        if !extent.is_valid() {
            result.errors.push(ConfigError::invalid(
                "viewport.fallback_extent",
                format!("{:?}", extent),
                "min must not exceed max on either axis",
            ));
        }

        if !(self.viewport.padding_deg > 0.0) {
            result.errors.push(ConfigError::invalid(
                "viewport.padding_deg",
                self.viewport.padding_deg,
                "padding must be positive",
            ));
        }

        if !(self.viewport.margin >= 1.0) {
            result.errors.push(ConfigError::invalid(
                "viewport.margin",
                self.viewport.margin,
                "margin must be at least 1.0",
            ));
        }

        if !(self.ar.proximity_threshold_m > 0.0) {
            result.errors.push(ConfigError::invalid(
                "ar.proximity_threshold_m",
                self.ar.proximity_threshold_m,
                "threshold must be positive",
            ));
        } else if self.ar.proximity_threshold_m > 10_000.0 {
            result.warnings.push("AR threshold above 10 km places markers far past the horizon".to_string());
        }

        if !(self.ar.scale_divisor > 0.0) {
            result.errors.push(ConfigError::invalid(
                "ar.scale_divisor",
                self.ar.scale_divisor,
                "divisor must be positive",
            ));
        }

        if self.ar.min_markers == 0 {
            result.warnings.push("ar.min_markers of 0 allows an empty AR view".to_string());
        }

        if self.location_timeout_ms == 0 {
            result.errors.push(ConfigError::invalid(
                "location_timeout_ms",
                self.location_timeout_ms,
                "timeout must be non-zero",
            ));
        }

        result
    }

    /// First validation error, if any
    pub fn validate(&self) -> Result<(), ConfigError> {
        let result = self.check();
        for warning in &result.warnings {
            warn!(%warning, "configuration warning");
        }
        match result.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Load and validate configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as pretty-printed JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
