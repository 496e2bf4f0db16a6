//! Metric presenter: maps an [`AnalysisReport`](crate::analysis::AnalysisReport)
//! onto display artifacts.
//!
//! - [`gauge`] - Intensity gauge with fixed color bands
//! - [`breakdown`] - Emotion proportion (donut) chart
//! - [`indicators`] - Key indicator bullet list
//! - [`chart`] - Artifact types shared by the charts
//!
//! Every function here is total: any report, errored or not, maps to a
//! defined artifact.

pub mod breakdown;
pub mod chart;
pub mod gauge;
pub mod indicators;

pub use breakdown::{to_breakdown, to_breakdown_with};
pub use chart::{
    BreakdownChart, ChartArtifact, ChartKind, GaugeBand, GaugeChart, Placeholder, Segment,
    ThresholdMarker, Zone,
};
pub use gauge::{to_gauge, to_gauge_with};
pub use indicators::{Indicator, KeyIndicators};
