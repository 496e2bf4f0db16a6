//! Intensity gauge.

use crate::analysis::parser::{INTENSITY_MAX, INTENSITY_MIN};
use crate::analysis::AnalysisReport;
use crate::config::GaugeConfig;

use super::chart::{ChartArtifact, ChartKind, GaugeBand, GaugeChart, Placeholder, ThresholdMarker, Zone};

/// Gauge for the report's intensity using the default bands.
pub fn to_gauge(report: &AnalysisReport) -> ChartArtifact {
    to_gauge_with(report, &GaugeConfig::default())
}

/// Gauge for the report's intensity.
///
/// Absent or out-of-range intensity gives the unavailable artifact.
pub fn to_gauge_with(report: &AnalysisReport, config: &GaugeConfig) -> ChartArtifact {
    let value = report
        .valid_intensity()
        .filter(|v| (INTENSITY_MIN..=INTENSITY_MAX).contains(v))
        .and_then(|v| u8::try_from(v).ok());

    let Some(value) = value else {
        return ChartArtifact::Unavailable(Placeholder {
            chart: ChartKind::Gauge,
            message: config.placeholder.clone(),
        });
    };

    let [min, max] = config.domain;
    ChartArtifact::Gauge(GaugeChart {
        title: config.title.clone(),
        value,
        min,
        max,
        bands: vec![
            GaugeBand {
                zone: Zone::Low,
                start: min,
                end: config.medium_from,
                color: config.low_color.clone(),
            },
            GaugeBand {
                zone: Zone::Medium,
                start: config.medium_from,
                end: config.high_from,
                color: config.medium_color.clone(),
            },
            GaugeBand {
                zone: Zone::High,
                start: config.high_from,
                end: max,
                color: config.high_color.clone(),
            },
        ],
        threshold: ThresholdMarker {
            value: config.threshold,
            color: config.threshold_color.clone(),
        },
        zone: zone_for(f64::from(value), config),
    })
}

fn zone_for(value: f64, config: &GaugeConfig) -> Zone {
    if value < config.medium_from {
        Zone::Low
    } else if value < config.high_from {
        Zone::Medium
    } else {
        Zone::High
    }
}
