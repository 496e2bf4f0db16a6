//! Renderer-neutral chart artifacts.

use serde::{Deserialize, Serialize};

/// A chart produced from an analysis report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartArtifact {
    Gauge(GaugeChart),
    Breakdown(BreakdownChart),
    /// No usable data. Distinct from a zero value or an empty chart.
    Unavailable(Placeholder),
}

impl ChartArtifact {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    pub fn as_gauge(&self) -> Option<&GaugeChart> {
        match self {
            Self::Gauge(gauge) => Some(gauge),
            _ => None,
        }
    }

    pub fn as_breakdown(&self) -> Option<&BreakdownChart> {
        match self {
            Self::Breakdown(breakdown) => Some(breakdown),
            _ => None,
        }
    }
}

/// Which chart a placeholder stands in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Gauge,
    Breakdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    pub chart: ChartKind,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Gauge
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Low,
    Medium,
    High,
}

/// A colored band `[start, end)`; the last band includes its end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeBand {
    pub zone: Zone,
    pub start: f64,
    pub end: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdMarker {
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeChart {
    pub title: String,
    pub value: u8,
    pub min: f64,
    pub max: f64,
    pub bands: Vec<GaugeBand>,
    pub threshold: ThresholdMarker,
    /// Band the value falls in.
    pub zone: Zone,
}

impl GaugeChart {
    /// Whether the value sits at or beyond the alert marker.
    pub fn exceeds_threshold(&self) -> bool {
        f64::from(self.value) >= self.threshold.value
    }
}

// ---------------------------------------------------------------------------
// Breakdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub label: String,
    pub weight: u32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownChart {
    pub title: String,
    /// One segment per emotion, in extraction order.
    pub segments: Vec<Segment>,
    /// Sum of the raw weights; not necessarily 100.
    pub total: u64,
    pub hole: f64,
}

impl BreakdownChart {
    /// Fraction of the total held by `segment`, for renderers that need
    /// proportions. Zero when every weight is zero.
    pub fn share(&self, segment: &Segment) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(segment.weight) / self.total as f64
        }
    }
}
