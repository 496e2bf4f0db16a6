//! Configuration for the presenter and the HTTP server.
//!
//! Presenter constants (gauge domain, bands, threshold, palette) are fixed
//! defaults; a YAML file may override them for a deployment. Server settings
//! come from the environment.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::utilities::errors::ConfigError;

// ---------------------------------------------------------------------------
// Gauge
// ---------------------------------------------------------------------------

/// Gauge chart constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeConfig {
    pub title: String,
    /// Text shown when no valid intensity is available.
    pub placeholder: String,
    /// Axis range `[min, max]`.
    pub domain: [f64; 2],
    /// Start of the medium band; the low band covers `[min, medium_from)`.
    pub medium_from: f64,
    /// Start of the high band, which runs to `max` inclusive.
    pub high_from: f64,
    /// Alert marker position.
    pub threshold: f64,
    pub low_color: String,
    pub medium_color: String,
    pub high_color: String,
    pub threshold_color: String,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            title: "Analyzed Intensity".to_string(),
            placeholder: "Intensity N/A".to_string(),
            domain: [0.0, 10.0],
            medium_from: 4.0,
            high_from: 7.0,
            threshold: 8.5,
            low_color: "lightgreen".to_string(),
            medium_color: "yellow".to_string(),
            high_color: "coral".to_string(),
            threshold_color: "red".to_string(),
        }
    }
}

impl GaugeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let [min, max] = self.domain;
        if !(min < max) {
            return Err(ConfigError::invalid(format!(
                "gauge domain [{}, {}] is empty",
                min, max
            )));
        }
        if !(min < self.medium_from && self.medium_from < self.high_from && self.high_from < max) {
            return Err(ConfigError::invalid(format!(
                "gauge bands must ascend inside the domain: {} < {} < {} < {}",
                min, self.medium_from, self.high_from, max
            )));
        }
        if !(min..=max).contains(&self.threshold) {
            return Err(ConfigError::invalid(format!(
                "gauge threshold {} outside domain [{}, {}]",
                self.threshold, min, max
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Breakdown
// ---------------------------------------------------------------------------

/// Emotion breakdown (donut) chart constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakdownConfig {
    pub title: String,
    pub placeholder: String,
    /// Segment colors, reused cyclically.
    pub palette: Vec<String>,
    /// Relative size of the center hole, 0 to 1.
    pub hole: f64,
}

impl Default for BreakdownConfig {
    fn default() -> Self {
        Self {
            title: "Analyzed Emotion Snapshot".to_string(),
            placeholder: "Emotion Analysis Unavailable".to_string(),
            palette: ["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            hole: 0.4,
        }
    }
}

impl BreakdownConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::invalid("breakdown palette is empty"));
        }
        if !(0.0..1.0).contains(&self.hole) {
            return Err(ConfigError::invalid(format!(
                "breakdown hole {} outside [0, 1)",
                self.hole
            )));
        }
        Ok(())
    }

    /// Color for the segment at `index`.
    pub fn color(&self, index: usize) -> &str {
        if self.palette.is_empty() {
            return "";
        }
        &self.palette[index % self.palette.len()]
    }
}

// ---------------------------------------------------------------------------
// PresenterConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenterConfig {
    pub gauge: GaugeConfig,
    pub breakdown: BreakdownConfig,
}

impl PresenterConfig {
    /// Parse and validate a YAML document. Missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml_str(&content)?;
        log::debug!("Loaded presenter config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gauge.validate()?;
        self.breakdown.validate()
    }
}

// ---------------------------------------------------------------------------
// ServerConfig
// ---------------------------------------------------------------------------

/// Settings for the HTTP server binary.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    /// Custom prompt JSON replacing the embedded templates.
    pub prompt_file: Option<String>,
    /// YAML presenter overrides.
    pub presenter_config: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            prompt_file: None,
            presenter_config: None,
        }
    }
}

impl ServerConfig {
    /// Load from environment variables.
    ///
    /// - `PORT` (default 8080)
    /// - `SOLACE_PROMPT_FILE`
    /// - `SOLACE_PRESENTER_CONFIG`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: "PORT".to_string(),
                value,
            })?,
            None => Self::default().port,
        };
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            port,
            prompt_file: non_empty("SOLACE_PROMPT_FILE"),
            presenter_config: non_empty("SOLACE_PRESENTER_CONFIG"),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
