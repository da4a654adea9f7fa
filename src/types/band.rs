//! Three-tier classification shared by the yield and input gauges

use serde::{Deserialize, Serialize};

/// Band of a value against a `(medium, good)` threshold pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationBand {
    Low,
    Medium,
    Good,
}

impl ClassificationBand {
    /// Classify `value` against half-open intervals:
    /// `[.., medium)` low, `[medium, good)` medium, `[good, ..]` good.
    pub fn classify(value: f64, medium: f64, good: f64) -> Self {
        if value < medium {
            Self::Low
        } else if value < good {
            Self::Medium
        } else {
            Self::Good
        }
    }

    pub const fn color(self) -> BandColor {
        match self {
            Self::Low => BandColor::Red,
            Self::Medium => BandColor::Orange,
            Self::Good => BandColor::Green,
        }
    }

    /// Operator-facing advisory for a gauge in this band.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Low => "Below optimal range — needs adjustment.",
            Self::Medium => "Moderate range — could improve.",
            Self::Good => "Optimal range — good condition.",
        }
    }

    /// Pale fill for this band's segment of the gauge dial.
    pub const fn step_fill(self) -> &'static str {
        match self {
            Self::Low => "#f28e8e",
            Self::Medium => "#f2d388",
            Self::Good => "#a8ddb5",
        }
    }
}

impl std::fmt::Display for ClassificationBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::Good => write!(f, "Good"),
        }
    }
}

/// Marker color shown next to a classified value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BandColor {
    Red,
    Orange,
    Green,
}

impl BandColor {
    pub const fn css(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Green => "green",
        }
    }
}

impl std::fmt::Display for BandColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css())
    }
}
