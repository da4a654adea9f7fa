//! Result classification: headline yield tier and the five-gauge panel
//!
//! Two threshold sets are in play and they are deliberately not shared:
//! - `yield_tiers` drives the headline message
//! - `gauges.yield` drives the yield gauge's band
//!
//! They agree out of the box. If someone edits one and not the other, the
//! config loader warns (see `config::validation::check_threshold_consistency`).

use serde::Serialize;

use crate::config::{AppConfig, GaugeThresholds, YieldTierThresholds};
use crate::types::{BandColor, ClassificationBand, Metric, ReactionConditions};
use crate::validator::RangeAdvisory;

// ============================================================================
// Gauges
// ============================================================================

/// One colored segment of a gauge dial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaugeStep {
    pub from: f64,
    pub to: f64,
    pub band: ClassificationBand,
    pub fill: &'static str,
}

/// A bounded `0..max` indicator for one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauge {
    pub metric: Metric,
    pub title: &'static str,
    pub unit: &'static str,
    pub value: f64,
    pub max: f64,
    pub medium: f64,
    pub good: f64,
    pub band: ClassificationBand,
    pub color: BandColor,
    pub message: &'static str,
    pub steps: [GaugeStep; 3],
}

impl Gauge {
    pub fn new(metric: Metric, value: f64, t: &GaugeThresholds) -> Self {
        let band = ClassificationBand::classify(value, t.medium, t.good);
        let step = |from: f64, to: f64, band: ClassificationBand| GaugeStep {
            from,
            to,
            band,
            fill: band.step_fill(),
        };
        Self {
            metric,
            title: metric.title(),
            unit: metric.unit(),
            value,
            max: t.max,
            medium: t.medium,
            good: t.good,
            band,
            color: band.color(),
            message: band.message(),
            steps: [
                step(0.0, t.medium, ClassificationBand::Low),
                step(t.medium, t.good, ClassificationBand::Medium),
                step(t.good, t.max, ClassificationBand::Good),
            ],
        }
    }

    /// Where `x` sits on the dial's `0..max` scale, clamped to `[0, 1]`.
    pub fn position(&self, x: f64) -> f64 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (x / self.max).clamp(0.0, 1.0)
    }

    /// Needle position on the dial.
    pub fn fraction(&self) -> f64 {
        self.position(self.value)
    }
}

// ============================================================================
// Headline Yield Tier
// ============================================================================

/// Headline verdict on the predicted yield.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum YieldTier {
    Low,
    Manageable,
    High,
}

impl YieldTier {
    pub fn classify(yield_percent: f64, t: &YieldTierThresholds) -> Self {
        if yield_percent >= t.high {
            Self::High
        } else if yield_percent >= t.manageable {
            Self::Manageable
        } else {
            Self::Low
        }
    }

    pub const fn color(self) -> BandColor {
        match self {
            Self::Low => BandColor::Red,
            Self::Manageable => BandColor::Orange,
            Self::High => BandColor::Green,
        }
    }

    pub fn message(self, yield_percent: f64) -> String {
        match self {
            Self::High => format!(
                "High Yield: {yield_percent:.2}% — Excellent synthesis conditions."
            ),
            Self::Manageable => format!(
                "Manageable Yield: {yield_percent:.2}% — There’s room for optimization."
            ),
            Self::Low => format!(
                "Low Yield: {yield_percent:.2}% — Consider adjusting process parameters."
            ),
        }
    }
}

impl std::fmt::Display for YieldTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Manageable => write!(f, "Manageable"),
            Self::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldHeadline {
    pub tier: YieldTier,
    pub color: BandColor,
    pub message: String,
}

impl YieldHeadline {
    pub fn new(yield_percent: f64, t: &YieldTierThresholds) -> Self {
        let tier = YieldTier::classify(yield_percent, t);
        Self {
            tier,
            color: tier.color(),
            message: tier.message(yield_percent),
        }
    }
}

// ============================================================================
// Report
// ============================================================================

/// Everything rendered after a successful prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    pub conditions: ReactionConditions,
    pub predicted_yield: f64,
    pub headline: YieldHeadline,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<RangeAdvisory>,
    /// Yield first, then the four inputs in form order.
    pub gauges: Vec<Gauge>,
}

impl PredictionReport {
    pub fn build(
        conditions: ReactionConditions,
        predicted_yield: f64,
        advisory: Option<RangeAdvisory>,
        config: &AppConfig,
    ) -> Self {
        let gauges = Metric::ALL
            .into_iter()
            .map(|metric| {
                let value = conditions.get(metric).unwrap_or(predicted_yield);
                Gauge::new(metric, value, config.gauges.get(metric))
            })
            .collect();

        Self {
            conditions,
            predicted_yield,
            headline: YieldHeadline::new(predicted_yield, &config.yield_tiers),
            advisory,
            gauges,
        }
    }

    pub fn gauge(&self, metric: Metric) -> Option<&Gauge> {
        self.gauges.iter().find(|g| g.metric == metric)
    }
}
