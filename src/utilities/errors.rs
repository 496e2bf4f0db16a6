//! Error types for configuration and prompt handling.
//!
//! Parsing and presentation never fail; malformed model output is reported
//! through [`crate::analysis::MalformedText`] and per-field absence instead.

use thiserror::Error;

/// Errors loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML for the expected shape.
    #[error("Failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An environment variable has an unusable value.
    #[error("Invalid value for {name}: {value}")]
    InvalidEnv { name: String, value: String },

    /// Values parse but are inconsistent.
    #[error("Invalid presenter config: {message}")]
    Invalid { message: String },
}

impl ConfigError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Errors loading or rendering prompt templates.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The prompt file could not be read.
    #[error("Prompt file '{path}' could not be read: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The prompt file is not a JSON object of strings.
    #[error("Error decoding prompts JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A required template key is missing.
    #[error("Prompt template '{0}' not found")]
    MissingTemplate(String),

    /// A template placeholder has no input.
    #[error("Template variable '{0}' not found in inputs")]
    MissingVariable(String),

    /// The input for a template is empty.
    #[error("Input '{0}' must not be empty")]
    EmptyInput(String),
}
