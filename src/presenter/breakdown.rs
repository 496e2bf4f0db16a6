//! Emotion proportion breakdown.

use crate::analysis::AnalysisReport;
use crate::config::BreakdownConfig;

use super::chart::{BreakdownChart, ChartArtifact, ChartKind, Placeholder, Segment};

/// Breakdown of the report's emotions using the default palette.
pub fn to_breakdown(report: &AnalysisReport) -> ChartArtifact {
    to_breakdown_with(report, &BreakdownConfig::default())
}

/// Breakdown of the report's emotions.
///
/// Weights are used as parsed: no renormalization, no clamping. An empty
/// emotion list gives the unavailable artifact.
pub fn to_breakdown_with(report: &AnalysisReport, config: &BreakdownConfig) -> ChartArtifact {
    if report.emotions.is_empty() {
        return ChartArtifact::Unavailable(Placeholder {
            chart: ChartKind::Breakdown,
            message: config.placeholder.clone(),
        });
    }

    let segments: Vec<Segment> = report
        .emotions
        .iter()
        .enumerate()
        .map(|(i, emotion)| Segment {
            label: emotion.name.clone(),
            weight: emotion.weight,
            color: config.color(i).to_string(),
        })
        .collect();
    let total: u64 = segments.iter().map(|s| u64::from(s.weight)).sum();

    ChartArtifact::Breakdown(BreakdownChart {
        title: config.title.clone(),
        segments,
        total,
        hole: config.hole,
    })
}
