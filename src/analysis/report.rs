//! Typed result of parsing one analysis response.
//!
//! Every field is extracted independently, so absence is modelled per field
//! with [`FieldValue`] rather than with sentinel values.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// FieldValue
// ---------------------------------------------------------------------------

/// Outcome of extracting a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum FieldValue<T> {
    /// The label was found and the value is usable.
    Present(T),
    /// The label or its value was not found.
    Absent,
    /// A value was found but lies outside the field's valid domain.
    OutOfRange(T),
}

impl<T> FieldValue<T> {
    /// The usable value, if any. `OutOfRange` counts as unusable.
    pub fn present(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent | Self::OutOfRange(_) => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl<T> Default for FieldValue<T> {
    fn default() -> Self {
        Self::Absent
    }
}

// ---------------------------------------------------------------------------
// Categorical values
// ---------------------------------------------------------------------------

/// A small closed vocabulary a categorical field is expected to use.
pub trait Vocabulary: Sized + Copy {
    /// Match a trimmed captured string against the vocabulary.
    fn recognize(raw: &str) -> Option<Self>;

    /// Canonical display label.
    fn label(&self) -> &'static str;
}

/// A categorical field value.
///
/// Values outside the vocabulary are kept verbatim as `Other` and shown as
/// opaque labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Categorical<K> {
    Known(K),
    Other(String),
}

impl<K: Vocabulary> Categorical<K> {
    /// Classify a captured string.
    pub fn from_raw(raw: &str) -> Self {
        match K::recognize(raw) {
            Some(known) => Self::Known(known),
            None => Self::Other(raw.to_string()),
        }
    }

    /// Text to display for this value.
    pub fn display_label(&self) -> &str {
        match self {
            Self::Known(known) => known.label(),
            Self::Other(raw) => raw,
        }
    }

    pub fn known(&self) -> Option<K> {
        match self {
            Self::Known(known) => Some(*known),
            Self::Other(_) => None,
        }
    }
}

/// Normalize a captured value for vocabulary lookup.
fn vocabulary_key(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl Vocabulary for $name {
            fn recognize(raw: &str) -> Option<Self> {
                let key = vocabulary_key(raw);
                $(
                    if key == $label.to_ascii_lowercase() {
                        return Some(Self::$variant);
                    }
                )+
                None
            }

            fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

vocabulary! {
    /// Motivation and energy level.
    EnergyLevel {
        High => "High",
        Moderate => "Moderate",
        Low => "Low",
        VeryLow => "Very Low",
    }
}

vocabulary! {
    ThoughtClarity {
        Clear => "Clear",
        Disorganized => "Disorganized",
    }
}

vocabulary! {
    SocialConnection {
        Connected => "Connected",
        Isolated => "Isolated",
        SeekingConnection => "Seeking Connection",
        Ambivalent => "Ambivalent",
    }
}

vocabulary! {
    EmotionalVariability {
        Stable => "Stable",
        Fluctuating => "Fluctuating",
    }
}

vocabulary! {
    SelfPerception {
        Positive => "Positive",
        Neutral => "Neutral",
        Negative => "Negative",
        Mixed => "Mixed",
    }
}

// ---------------------------------------------------------------------------
// Emotions
// ---------------------------------------------------------------------------

/// One `Name: NN%` entry of the emotion list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionShare {
    pub name: String,
    /// Percentage as written by the model. Not clamped or renormalized.
    pub weight: u32,
}

impl EmotionShare {
    pub fn new(name: impl Into<String>, weight: u32) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

// ---------------------------------------------------------------------------
// Risk
// ---------------------------------------------------------------------------

/// A risk category that triggers the crisis protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTag {
    SelfHarm,
    SuicidalIdeation,
    HarmToOthers,
}

impl RiskTag {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SelfHarm => "Self-harm",
            Self::SuicidalIdeation => "Suicidal ideation",
            Self::HarmToOthers => "Harm to others",
        }
    }
}

impl fmt::Display for RiskTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Risk indicators extracted from the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "tags", rename_all = "snake_case")]
pub enum RiskIndicators {
    /// No risk indicator label in the text at all.
    #[default]
    NotAssessed,
    /// Label present, no risk keyword matched.
    Clear,
    /// One or more risk keywords matched. Never empty.
    Flagged(BTreeSet<RiskTag>),
}

impl RiskIndicators {
    /// Build from matched tags; an empty set means the label was clear.
    pub fn from_tags(tags: BTreeSet<RiskTag>) -> Self {
        if tags.is_empty() {
            Self::Clear
        } else {
            Self::Flagged(tags)
        }
    }

    /// Whether the crisis protocol applies.
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Flagged(tags) if !tags.is_empty())
    }

    pub fn contains(&self, tag: RiskTag) -> bool {
        match self {
            Self::Flagged(tags) => tags.contains(&tag),
            Self::NotAssessed | Self::Clear => false,
        }
    }

    pub fn tags(&self) -> impl Iterator<Item = RiskTag> + '_ {
        let tags = match self {
            Self::Flagged(tags) => Some(tags),
            Self::NotAssessed | Self::Clear => None,
        };
        tags.into_iter().flatten().copied()
    }
}

// ---------------------------------------------------------------------------
// Errored reports
// ---------------------------------------------------------------------------

/// Why a response could not be parsed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedText {
    #[error("analysis text is empty")]
    Empty,
    #[error("analysis text reports an upstream error")]
    UpstreamError,
    #[error("analysis text contains none of the expected section labels")]
    MissingMarker,
}

// ---------------------------------------------------------------------------
// AnalysisReport
// ---------------------------------------------------------------------------

/// Structured view of one analysis response.
///
/// Either errored (`malformed` is set and every field is absent) or a
/// best-effort extraction in which each field stands on its own.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Set when the text was unusable as a whole.
    pub malformed: Option<MalformedText>,
    /// Emotion list in source order. May be empty.
    pub emotions: Vec<EmotionShare>,
    /// Overall intensity; valid range is 1 to 10 inclusive.
    pub intensity: FieldValue<i64>,
    pub risk: RiskIndicators,
    pub energy_level: FieldValue<Categorical<EnergyLevel>>,
    pub thought_clarity: FieldValue<Categorical<ThoughtClarity>>,
    pub social_connection: FieldValue<Categorical<SocialConnection>>,
    pub emotional_variability: FieldValue<Categorical<EmotionalVariability>>,
    pub self_perception: FieldValue<Categorical<SelfPerception>>,
}

impl AnalysisReport {
    /// An errored report with no fields populated.
    pub fn errored(reason: MalformedText) -> Self {
        Self {
            malformed: Some(reason),
            ..Self::default()
        }
    }

    pub fn is_errored(&self) -> bool {
        self.malformed.is_some()
    }

    /// Usable intensity, i.e. present and within 1..=10.
    pub fn valid_intensity(&self) -> Option<i64> {
        self.intensity.present().copied()
    }

    /// Crisis flag derived from the risk tags.
    pub fn requires_crisis_protocol(&self) -> bool {
        self.risk.is_critical()
    }

    /// Whether anything at all was extracted.
    pub fn has_any_field(&self) -> bool {
        !self.emotions.is_empty()
            || !self.intensity.is_absent()
            || self.risk != RiskIndicators::NotAssessed
            || !self.energy_level.is_absent()
            || !self.thought_clarity.is_absent()
            || !self.social_connection.is_absent()
            || !self.emotional_variability.is_absent()
            || !self.self_perception.is_absent()
    }
}
