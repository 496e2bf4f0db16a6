//! Per-turn view and the caller-owned session snapshot.
//!
//! The library keeps no state between turns. A UI that wants to keep showing
//! the latest charts holds a [`SessionSnapshot`] and replaces it each turn.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{self, AnalysisReport};
use crate::config::PresenterConfig;
use crate::presenter::{
    to_breakdown_with, to_gauge_with, ChartArtifact, ChartKind, KeyIndicators, Placeholder,
};
use crate::prompts::ReplyStyle;

/// Shown before the first analysis arrives.
pub const BREAKDOWN_PENDING: &str = "Emotion analysis will appear here.";
pub const GAUGE_PENDING: &str = "Intensity will appear here.";

/// Everything derived from one analysis response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnView {
    pub report: AnalysisReport,
    pub gauge: ChartArtifact,
    pub breakdown: ChartArtifact,
    pub indicators: KeyIndicators,
    pub reply_style: ReplyStyle,
    pub analyzed_at: DateTime<Utc>,
}

impl TurnView {
    /// Parse `analysis_text` and derive all artifacts.
    pub fn from_analysis(analysis_text: &str, config: &PresenterConfig) -> Self {
        Self::from_report(analysis::parse(analysis_text), config)
    }

    pub fn from_report(report: AnalysisReport, config: &PresenterConfig) -> Self {
        Self {
            gauge: to_gauge_with(&report, &config.gauge),
            breakdown: to_breakdown_with(&report, &config.breakdown),
            indicators: KeyIndicators::from_report(&report),
            reply_style: ReplyStyle::for_report(&report),
            analyzed_at: Utc::now(),
            report,
        }
    }

    pub fn is_crisis(&self) -> bool {
        self.reply_style.is_crisis()
    }
}

/// Latest turn of one chat session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub turns: u64,
    pub latest: Option<TurnView>,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionSnapshot {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            turns: 0,
            latest: None,
        }
    }

    /// Snapshot after `view`; the previous view is dropped.
    pub fn advance(&self, view: TurnView) -> Self {
        Self {
            session_id: self.session_id,
            turns: self.turns + 1,
            latest: Some(view),
        }
    }

    /// Latest gauge, or a pending placeholder before the first turn.
    pub fn gauge(&self) -> ChartArtifact {
        match &self.latest {
            Some(view) => view.gauge.clone(),
            None => pending(ChartKind::Gauge, GAUGE_PENDING),
        }
    }

    /// Latest breakdown, or a pending placeholder before the first turn.
    pub fn breakdown(&self) -> ChartArtifact {
        match &self.latest {
            Some(view) => view.breakdown.clone(),
            None => pending(ChartKind::Breakdown, BREAKDOWN_PENDING),
        }
    }
}

fn pending(chart: ChartKind, message: &str) -> ChartArtifact {
    ChartArtifact::Unavailable(Placeholder {
        chart,
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANALYSIS: &str = "Top 3 Emotions: [Sadness: 70%, Fear: 30%]\n\
                            Overall Intensity: 9\n\
                            Risk Indicators: Self-harm mentioned";

    #[test]
    fn test_turn_view_from_analysis() {
        let view = TurnView::from_analysis(ANALYSIS, &PresenterConfig::default());
        assert_eq!(view.gauge.as_gauge().unwrap().value, 9);
        assert_eq!(view.breakdown.as_breakdown().unwrap().segments.len(), 2);
        assert!(view.is_crisis());
        assert_eq!(view.indicators.items[0].value, "9/10");
    }

    #[test]
    fn test_turn_view_for_errored_analysis() {
        let view = TurnView::from_analysis("", &PresenterConfig::default());
        assert!(view.report.is_errored());
        assert!(view.gauge.is_unavailable());
        assert!(view.breakdown.is_unavailable());
        assert!(view.indicators.unavailable);
        assert!(!view.is_crisis());
    }

    #[test]
    fn test_snapshot_pending_before_first_turn() {
        let snapshot = SessionSnapshot::new();
        assert_eq!(snapshot.turns, 0);
        match snapshot.breakdown() {
            ChartArtifact::Unavailable(p) => assert_eq!(p.message, BREAKDOWN_PENDING),
            other => panic!("Expected pending placeholder, got {:?}", other),
        }
        assert!(snapshot.gauge().is_unavailable());
    }

    #[test]
    fn test_snapshot_keeps_only_latest_turn() {
        let config = PresenterConfig::default();
        let first = SessionSnapshot::new();
        let second = first.advance(TurnView::from_analysis(ANALYSIS, &config));
        let third = second.advance(TurnView::from_analysis("Intensity: 2", &config));

        assert_eq!(first.turns, 0);
        assert!(first.latest.is_none());
        assert_eq!(third.session_id, first.session_id);
        assert_eq!(third.turns, 2);
        assert_eq!(third.gauge().as_gauge().unwrap().value, 2);
        assert!(third.breakdown().is_unavailable());
    }
}
