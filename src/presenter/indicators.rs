//! Key indicator summary shown next to the charts.

use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisReport, Categorical, FieldValue, RiskIndicators, Vocabulary};

/// Shown for an errored report.
pub const ANALYSIS_UNAVAILABLE: &str = "Analysis data not available.";
/// Shown when nothing could be extracted.
pub const NO_SUMMARY_POINTS: &str = "Could not extract summary points.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub label: String,
    pub value: String,
}

/// Display-ready summary of a report.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyIndicators {
    pub items: Vec<Indicator>,
    /// Analysis quality notes, e.g. an out-of-range intensity.
    pub warnings: Vec<String>,
    pub unavailable: bool,
}

impl KeyIndicators {
    pub fn from_report(report: &AnalysisReport) -> Self {
        if report.is_errored() {
            return Self {
                unavailable: true,
                ..Self::default()
            };
        }

        let mut summary = Self::default();

        match &report.intensity {
            FieldValue::Present(value) => summary.push("Overall Intensity", format!("{}/10", value)),
            FieldValue::OutOfRange(value) => summary
                .warnings
                .push(format!("Intensity {} is outside the 1-10 scale", value)),
            FieldValue::Absent => {}
        }
        summary.push_categorical("Energy Levels", &report.energy_level);
        summary.push_categorical("Thought Clarity", &report.thought_clarity);
        summary.push_categorical("Social Connection", &report.social_connection);
        summary.push_categorical("Emotional Variability", &report.emotional_variability);
        summary.push_categorical("Self-Perception", &report.self_perception);

        match &report.risk {
            RiskIndicators::Flagged(_) => {
                let tags: Vec<&str> = report.risk.tags().map(|t| t.label()).collect();
                summary.push("Risk Indicators", tags.join(", "));
            }
            RiskIndicators::Clear => summary.push("Risk Indicators", "None detected"),
            RiskIndicators::NotAssessed => summary
                .warnings
                .push("Risk indicators were not reported by the analysis".to_string()),
        }

        summary
    }

    fn push(&mut self, label: &str, value: impl Into<String>) {
        self.items.push(Indicator {
            label: label.to_string(),
            value: value.into(),
        });
    }

    fn push_categorical<K: Vocabulary>(&mut self, label: &str, field: &FieldValue<Categorical<K>>) {
        if let Some(value) = field.present() {
            self.push(label, value.display_label());
        }
    }

    /// Markdown bullet list, or a fixed notice when there is nothing to show.
    pub fn to_markdown(&self) -> String {
        if self.unavailable {
            return ANALYSIS_UNAVAILABLE.to_string();
        }
        if self.items.is_empty() {
            return NO_SUMMARY_POINTS.to_string();
        }
        self.items
            .iter()
            .map(|item| format!("- **{}:** {}", item.label, item.value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
