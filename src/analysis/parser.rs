//! Analysis response parser.
//!
//! The analysis prompt asks the model to answer as a list of `Label: value`
//! lines, e.g.
//!
//! ```text
//! 1. Emotional State:
//!    - Top 3 Emotions: [Anxiety: 60%, Sadness: 30%, Other: 10%]
//!    - Overall Intensity: 7
//! 3. Behavioral Indicators:
//!    - Risk Indicators: No specific risk indicators detected
//!    - Motivation and Energy Levels: Low
//! ```
//!
//! Models follow that layout loosely, so every field is searched for on its
//! own and a miss on one field never affects another. Labels are matched
//! case-insensitively and may carry markdown emphasis (`**Label:** value`)
//! or a bracketed value (`Label: [value]`).

use once_cell::sync::Lazy;
use regex::Regex;

use super::report::{
    AnalysisReport, Categorical, EmotionShare, FieldValue, MalformedText, RiskIndicators,
    Vocabulary,
};
use super::risk;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Prefix the analysis step uses when the upstream call failed.
const UPSTREAM_ERROR_PREFIX: &str = "Error:";

/// Valid intensity range, inclusive.
pub const INTENSITY_MIN: i64 = 1;
pub const INTENSITY_MAX: i64 = 10;

/// Optional closing emphasis, the colon, optional opening emphasis.
const LABEL_TAIL: &str = r"[ \t]*\**[ \t]*:[ \t]*\**[ \t]*";

const EMOTIONS_LABEL: &str = r"(?:top[ \t]*\d*[ \t]*emotions?|dominant[ \t]+emotions)";
const INTENSITY_LABEL: &str = r"intensity";
const RISK_LABEL: &str = r"risk[ \t]+indicators?";
const ENERGY_LABEL: &str = r"energy[ \t]+levels?";
const CLARITY_LABEL: &str = r"thought[ \t]+clarity";
const SOCIAL_LABEL: &str = r"social[ \t]+connection";
const VARIABILITY_LABEL: &str = r"emotional[ \t]+variability";
const SELF_PERCEPTION_LABEL: &str = r"self[- ]perception";

/// Captured value of a categorical field: words, spaces, hyphens.
const CATEGORICAL_VALUE: &str = r"\[?[ \t]*([\w \t\-]+)";

/// Intensity value: an integer right after the label, optionally bracketed.
/// The second group catches a range such as the prompt's own `1-10`.
const INTENSITY_VALUE: &str = r"[ \t\[*]*(-?\d+)([ \t]*-[ \t]*\d+)?";

/// Labels the analysis prompt asks for.
const MARKER_LABELS: &[&str] = &[
    r"emotional[ \t]+state",
    EMOTIONS_LABEL,
    r"dominant[ \t]+emotion",
    INTENSITY_LABEL,
    RISK_LABEL,
    ENERGY_LABEL,
    CLARITY_LABEL,
    SOCIAL_LABEL,
    VARIABILITY_LABEL,
    SELF_PERCEPTION_LABEL,
];

/// Prompt labels that never serve as a structure marker but still start a
/// new field.
const OTHER_FIELD_LABELS: &[&str] = &[
    r"cognitive[ \t]+(?:state|bias)",
    r"behaviou?ral[ \t]+indicators",
    r"motivation",
    r"mentions[ \t]+of[ \t]+sleep",
    r"temporal[ \t]+factors",
    r"duration[ \t]+of",
    r"presence[ \t]+of[ \t]+recent",
];

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

fn labelled(label: &str, value: &str) -> Regex {
    Regex::new(&format!("(?i){label}{LABEL_TAIL}{value}")).expect("invalid field regex")
}

static MARKER: Lazy<Regex> =
    Lazy::new(|| labelled(&format!("(?:{})", MARKER_LABELS.join("|")), ""));

/// A line that opens a numbered section or another labelled field.
static FIELD_START: Lazy<Regex> = Lazy::new(|| {
    let labels = [MARKER_LABELS, OTHER_FIELD_LABELS].concat().join("|");
    Regex::new(&format!(
        r"(?i)^[ \t]*(?:\d+[.)]|(?:[-*+][ \t]*)?\**[ \t]*(?:{labels})[^:\n]*:)"
    ))
    .expect("invalid field start regex")
});

static EMOTION_LIST: Lazy<Regex> = Lazy::new(|| labelled(EMOTIONS_LABEL, r"\[([^\]]*)\]"));
static EMOTION_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+):\s*(\d+)").expect("invalid emotion token regex"));

static INTENSITY: Lazy<Regex> = Lazy::new(|| labelled(INTENSITY_LABEL, INTENSITY_VALUE));

static RISK: Lazy<Regex> = Lazy::new(|| labelled(RISK_LABEL, r"([^\n]*)"));

static ENERGY: Lazy<Regex> = Lazy::new(|| labelled(ENERGY_LABEL, CATEGORICAL_VALUE));
static CLARITY: Lazy<Regex> = Lazy::new(|| labelled(CLARITY_LABEL, CATEGORICAL_VALUE));
static SOCIAL: Lazy<Regex> = Lazy::new(|| labelled(SOCIAL_LABEL, CATEGORICAL_VALUE));
static VARIABILITY: Lazy<Regex> = Lazy::new(|| labelled(VARIABILITY_LABEL, CATEGORICAL_VALUE));
static SELF_PERCEPTION: Lazy<Regex> =
    Lazy::new(|| labelled(SELF_PERCEPTION_LABEL, CATEGORICAL_VALUE));

// ---------------------------------------------------------------------------
// Parse
// ---------------------------------------------------------------------------

/// Parse one analysis response into an [`AnalysisReport`].
///
/// Never fails. Text that is empty, carries the upstream error prefix, or
/// contains none of the expected labels yields an errored report; otherwise
/// each field is extracted independently.
pub fn parse(raw_text: &str) -> AnalysisReport {
    if let Err(reason) = check_structure(raw_text) {
        log::warn!("Discarding analysis response: {}", reason);
        return AnalysisReport::errored(reason);
    }

    let report = AnalysisReport {
        malformed: None,
        emotions: extract_emotions(raw_text),
        intensity: extract_intensity(raw_text),
        risk: extract_risk(raw_text),
        energy_level: extract_categorical(raw_text, &ENERGY),
        thought_clarity: extract_categorical(raw_text, &CLARITY),
        social_connection: extract_categorical(raw_text, &SOCIAL),
        emotional_variability: extract_categorical(raw_text, &VARIABILITY),
        self_perception: extract_categorical(raw_text, &SELF_PERCEPTION),
    };

    log::debug!(
        "Parsed analysis: {} emotions, intensity {:?}, risk {:?}",
        report.emotions.len(),
        report.intensity,
        report.risk
    );
    report
}

fn check_structure(raw_text: &str) -> Result<(), MalformedText> {
    let trimmed = raw_text.trim();
    if trimmed.is_empty() {
        return Err(MalformedText::Empty);
    }
    if trimmed
        .lines()
        .any(|line| line.trim_start().starts_with(UPSTREAM_ERROR_PREFIX))
    {
        return Err(MalformedText::UpstreamError);
    }
    if !MARKER.is_match(trimmed) {
        return Err(MalformedText::MissingMarker);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Field extractors
// ---------------------------------------------------------------------------

/// Bracketed `Name: NN%` list. Tokens without the `name: number` shape are
/// skipped.
fn extract_emotions(text: &str) -> Vec<EmotionShare> {
    let Some(caps) = EMOTION_LIST.captures(text) else {
        return Vec::new();
    };
    let list = caps.get(1).map_or("", |m| m.as_str());

    list.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(parse_emotion_token)
        .collect()
}

/// `Name: NN` with an optional trailing `%`. Only the leading digits are read,
/// so a decimal weight is truncated (`Joy: 5.5%` gives 5).
fn parse_emotion_token(token: &str) -> Option<EmotionShare> {
    let caps = EMOTION_TOKEN.captures(token)?;
    let name = caps[1].trim().trim_matches('*').trim();
    if name.is_empty() {
        return None;
    }
    match caps[2].parse::<u32>() {
        Ok(weight) => Some(EmotionShare::new(name, weight)),
        Err(e) => {
            log::debug!("Skipping emotion token {:?}: {}", token, e);
            None
        }
    }
}

/// Integer directly after the intensity label. A range (`1-10`) is an echo
/// of the prompt, not a value.
fn extract_intensity(text: &str) -> FieldValue<i64> {
    let Some(caps) = INTENSITY.captures(text) else {
        return FieldValue::Absent;
    };
    if caps.get(2).is_some() {
        log::debug!("Intensity given as a range: {:?}", &caps[0]);
        return FieldValue::Absent;
    }
    let Some(number) = caps.get(1) else {
        return FieldValue::Absent;
    };

    match number.as_str().parse::<i64>() {
        Ok(value) if (INTENSITY_MIN..=INTENSITY_MAX).contains(&value) => {
            FieldValue::Present(value)
        }
        Ok(value) => {
            log::debug!("Intensity {} outside {}-{}", value, INTENSITY_MIN, INTENSITY_MAX);
            FieldValue::OutOfRange(value)
        }
        Err(e) => {
            log::debug!("Unparseable intensity {:?}: {}", number.as_str(), e);
            FieldValue::Absent
        }
    }
}

/// Keyword search scoped to the risk label's line. When the label stands
/// alone, the scope is the block below it, up to a blank line or the next
/// field.
fn extract_risk(text: &str) -> RiskIndicators {
    let Some(caps) = RISK.captures(text) else {
        return RiskIndicators::NotAssessed;
    };
    let (Some(whole), Some(rest)) = (caps.get(0), caps.get(1)) else {
        return RiskIndicators::NotAssessed;
    };

    let inline = strip_decoration(rest.as_str());
    if !inline.is_empty() {
        return RiskIndicators::from_tags(risk::classify(inline));
    }

    let block: Vec<&str> = text[whole.end()..]
        .lines()
        .skip_while(|line| line.trim().is_empty())
        .take_while(|line| !line.trim().is_empty() && !FIELD_START.is_match(line))
        .collect();
    RiskIndicators::from_tags(risk::classify(&block.join("\n")))
}

fn extract_categorical<K: Vocabulary>(text: &str, pattern: &Regex) -> FieldValue<Categorical<K>> {
    let value = pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or("");

    if value.is_empty() {
        FieldValue::Absent
    } else {
        FieldValue::Present(Categorical::from_raw(value))
    }
}

fn strip_decoration(value: &str) -> &str {
    value
        .trim()
        .trim_matches(|c: char| c == '*' || c == '[' || c == ']' || c == '"')
        .trim()
}
