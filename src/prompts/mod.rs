//! Prompt rendering for the two model calls of a chat turn.
//!
//! A turn first sends the analysis prompt, then sends the reply prompt built
//! from the analysis text. The reply prompt carries an explicit response mode:
//! the crisis protocol when the parsed analysis flags a risk, the standard
//! supportive response otherwise.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::{self, AnalysisReport};
use crate::translations::Translations;
use crate::utilities::errors::PromptError;
use crate::utilities::string_utils::{interpolate_only, placeholders};

const ANALYSIS: &str = "analysis";
const REPLY: &str = "reply";
const CRISIS_MODE: &str = "crisis_mode";
const STANDARD_MODE: &str = "standard_mode";
const SAFETY_ALERT: &str = "safety_alert";
const DISCLAIMER: &str = "disclaimer";

/// Template keys and the placeholders each may use.
const TEMPLATES: &[(&str, &[&str])] = &[
    (ANALYSIS, &["user_input"]),
    (REPLY, &["analysis", "response_mode"]),
    (CRISIS_MODE, &[]),
    (STANDARD_MODE, &[]),
    (SAFETY_ALERT, &[]),
    (DISCLAIMER, &[]),
];

/// Prefix the generation step may leave on a reply.
const ERROR_PREFIX: &str = "Error: ";

// ---------------------------------------------------------------------------
// ReplyStyle
// ---------------------------------------------------------------------------

/// Which branch of the reply prompt applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyStyle {
    Crisis,
    Standard,
}

impl ReplyStyle {
    pub fn for_report(report: &AnalysisReport) -> Self {
        if report.requires_crisis_protocol() {
            Self::Crisis
        } else {
            Self::Standard
        }
    }

    pub fn is_crisis(&self) -> bool {
        matches!(self, Self::Crisis)
    }
}

/// A rendered reply prompt together with the branch it encodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyPlan {
    pub prompt: String,
    pub style: ReplyStyle,
}

// ---------------------------------------------------------------------------
// PromptLibrary
// ---------------------------------------------------------------------------

/// Validated set of prompt templates.
#[derive(Debug, Clone)]
pub struct PromptLibrary {
    translations: Translations,
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self::embedded()
    }
}

impl PromptLibrary {
    /// Wrap `translations`, checking every template exists and uses only the
    /// placeholders it is rendered with.
    pub fn new(translations: Translations) -> Result<Self, PromptError> {
        for (key, allowed) in TEMPLATES {
            let template = translations.require(key)?;
            if let Some(unknown) = placeholders(template)
                .into_iter()
                .find(|name| !allowed.contains(&name.as_str()))
            {
                return Err(PromptError::MissingVariable(unknown));
            }
        }
        Ok(Self { translations })
    }

    /// The embedded English templates.
    pub fn embedded() -> Self {
        Self::new(Translations::load_default()).expect("embedded en.json templates are invalid")
    }

    /// Load templates from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PromptError> {
        let library = Self::new(Translations::from_file(path.as_ref())?)?;
        log::info!("Loaded prompt templates from {}", path.as_ref().display());
        Ok(library)
    }

    /// Prompt asking the model for the structured analysis of `user_input`.
    pub fn analysis_prompt(&self, user_input: &str) -> Result<String, PromptError> {
        if user_input.trim().is_empty() {
            return Err(PromptError::EmptyInput("message".to_string()));
        }
        let inputs = HashMap::from([("user_input", user_input)]);
        interpolate_only(self.translations.require(ANALYSIS)?, &inputs)
    }

    /// Reply prompt for an explicit style.
    pub fn reply_prompt(
        &self,
        analysis_text: &str,
        style: ReplyStyle,
    ) -> Result<String, PromptError> {
        if analysis_text.trim().is_empty() {
            return Err(PromptError::EmptyInput("analysis".to_string()));
        }
        let mode = match style {
            ReplyStyle::Crisis => self.translations.require(CRISIS_MODE)?,
            ReplyStyle::Standard => self.translations.require(STANDARD_MODE)?,
        };
        let inputs = HashMap::from([("analysis", analysis_text), ("response_mode", mode)]);
        interpolate_only(self.translations.require(REPLY)?, &inputs)
    }

    /// Parse `analysis_text` and build the matching reply prompt.
    pub fn plan_reply(&self, analysis_text: &str) -> Result<ReplyPlan, PromptError> {
        let style = ReplyStyle::for_report(&analysis::parse(analysis_text));
        if style.is_crisis() {
            log::warn!("Risk indicators flagged; using crisis reply protocol");
        }
        Ok(ReplyPlan {
            prompt: self.reply_prompt(analysis_text, style)?,
            style,
        })
    }

    /// Final reply text for display.
    ///
    /// Drops a leading `Error: ` left by the generation step and prefixes the
    /// safety alert for crisis replies.
    pub fn format_reply(&self, reply: &str, style: ReplyStyle) -> Result<String, PromptError> {
        let body = reply.trim();
        let body = body.strip_prefix(ERROR_PREFIX).unwrap_or(body);
        match style {
            ReplyStyle::Crisis => Ok(format!(
                "{}\n\n{}",
                self.translations.require(SAFETY_ALERT)?,
                body
            )),
            ReplyStyle::Standard => Ok(body.to_string()),
        }
    }

    pub fn disclaimer(&self) -> Result<&str, PromptError> {
        self.translations.require(DISCLAIMER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_prompt_embeds_message() {
        let library = PromptLibrary::embedded();
        let prompt = library.analysis_prompt("I can't sleep and everything feels heavy").unwrap();
        assert!(prompt.contains("Input Message: I can't sleep and everything feels heavy"));
        assert!(prompt.contains("Top 3 Emotions:"));
        assert!(prompt.contains("Risk Indicators:"));
        assert!(!prompt.contains("{user_input}"));
    }

    #[test]
    fn test_analysis_prompt_rejects_empty_message() {
        let library = PromptLibrary::embedded();
        assert!(matches!(
            library.analysis_prompt("   "),
            Err(PromptError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_message_with_braces_is_not_interpolated() {
        let library = PromptLibrary::embedded();
        let prompt = library.analysis_prompt("my {analysis} is {broken}").unwrap();
        assert!(prompt.contains("my {analysis} is {broken}"));
    }

    #[test]
    fn test_plan_reply_standard() {
        let library = PromptLibrary::embedded();
        let plan = library
            .plan_reply("Risk Indicators: No specific risk indicators detected")
            .unwrap();
        assert_eq!(plan.style, ReplyStyle::Standard);
        assert!(plan.prompt.contains("STANDARD RESPONSE"));
        assert!(!plan.prompt.contains("CRISIS PROTOCOL"));
        assert!(plan.prompt.contains("No specific risk indicators detected"));
    }

    #[test]
    fn test_plan_reply_crisis() {
        let library = PromptLibrary::embedded();
        let plan = library
            .plan_reply("Risk Indicators: Suicidal ideation mentioned")
            .unwrap();
        assert_eq!(plan.style, ReplyStyle::Crisis);
        assert!(plan.prompt.contains("CRISIS PROTOCOL"));
        assert!(plan.prompt.contains("988"));
    }

    #[test]
    fn test_plan_reply_unparseable_analysis_is_standard() {
        let library = PromptLibrary::embedded();
        let plan = library.plan_reply("The model rambled without labels").unwrap();
        assert_eq!(plan.style, ReplyStyle::Standard);
    }

    #[test]
    fn test_format_reply() {
        let library = PromptLibrary::embedded();
        assert_eq!(
            library
                .format_reply("Error: That sounds hard.", ReplyStyle::Standard)
                .unwrap(),
            "That sounds hard."
        );
        let crisis = library
            .format_reply("Please reach out now.", ReplyStyle::Crisis)
            .unwrap();
        assert!(crisis.contains("**Safety Alert:**\n\nPlease"));
        assert!(crisis.ends_with("Please reach out now."));
    }

    #[test]
    fn test_new_rejects_unknown_placeholder() {
        let json = serde_json::json!({
            "analysis": "Message: {user_input} {mood}",
            "reply": "{analysis} {response_mode}",
            "crisis_mode": "c",
            "standard_mode": "s",
            "safety_alert": "!",
            "disclaimer": "d",
        });
        let translations = Translations::from_json(&json.to_string()).unwrap();
        assert!(matches!(
            PromptLibrary::new(translations),
            Err(PromptError::MissingVariable(ref v)) if v == "mood"
        ));
    }

    #[test]
    fn test_new_rejects_missing_template() {
        let translations = Translations::from_json(r#"{"analysis": "{user_input}"}"#).unwrap();
        assert!(matches!(
            PromptLibrary::new(translations),
            Err(PromptError::MissingTemplate(_))
        ));
    }

    #[test]
    fn test_disclaimer() {
        assert!(PromptLibrary::embedded().disclaimer().unwrap().contains("988"));
    }
}
