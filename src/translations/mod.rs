//! Prompt template strings.
//!
//! The default English templates are embedded from `en.json`, a flat JSON
//! object mapping template keys to text. A deployment can supply its own file
//! with the same keys.

use std::collections::HashMap;
use std::path::Path;

use crate::utilities::errors::PromptError;

/// Raw English template JSON, embedded at compile time.
pub const EN_JSON: &str = include_str!("en.json");

/// Template store keyed by template name.
#[derive(Debug, Clone)]
pub struct Translations {
    data: HashMap<String, String>,
}

impl Translations {
    /// Load the embedded English templates.
    pub fn load_default() -> Self {
        Self::from_json(EN_JSON).expect("Failed to parse embedded en.json templates")
    }

    /// Load templates from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, PromptError> {
        let data = serde_json::from_str(json)?;
        Ok(Self { data })
    }

    /// Load templates from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PromptError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| PromptError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Like [`get`](Self::get), but a missing key is an error.
    pub fn require(&self, key: &str) -> Result<&str, PromptError> {
        self.get(key)
            .ok_or_else(|| PromptError::MissingTemplate(key.to_string()))
    }
}

impl Default for Translations {
    fn default() -> Self {
        Self::load_default()
    }
}
