//! # solace
//!
//! Structured analysis extraction for an LLM-backed support chat.
//!
//! Each chat turn asks a language model for an emotional/risk analysis of the
//! user's message, then for an empathetic reply conditioned on it. This crate
//! owns the pure parts of that flow:
//!
//! - [`prompts`] renders both prompts, choosing the crisis protocol when the
//!   analysis flags a risk.
//! - [`analysis`] parses the model's analysis text into an
//!   [`AnalysisReport`], field by field, never failing on malformed input.
//! - [`presenter`] turns a report into chart artifacts (intensity gauge,
//!   emotion breakdown) and a key-indicator summary.
//! - [`session`] bundles one turn's artifacts and a caller-owned snapshot of
//!   the latest turn.
//!
//! Calling the model, storing chat history and rendering are left to the
//! caller. [`server`] exposes the operations over HTTP.

pub mod analysis;
pub mod config;
pub mod presenter;
pub mod prompts;
pub mod server;
pub mod session;
pub mod translations;
pub mod utilities;

pub use analysis::{parse, AnalysisReport, FieldValue, RiskIndicators, RiskTag};
pub use config::PresenterConfig;
pub use presenter::{to_breakdown, to_gauge, ChartArtifact, KeyIndicators};
pub use prompts::{PromptLibrary, ReplyStyle};
pub use session::{SessionSnapshot, TurnView};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
