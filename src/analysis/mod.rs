//! Analysis response parsing.
//!
//! - [`parser`] - Turns raw model text into an [`AnalysisReport`]
//! - [`report`] - Report types and per-field absence states
//! - [`risk`] - Risk keyword classification

pub mod parser;
pub mod report;
pub mod risk;

pub use parser::parse;
pub use report::{
    AnalysisReport, Categorical, EmotionShare, EmotionalVariability, EnergyLevel, FieldValue,
    MalformedText, RiskIndicators, RiskTag, SelfPerception, SocialConnection, ThoughtClarity,
    Vocabulary,
};
