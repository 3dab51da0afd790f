use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::domain::Direction;

/// Position a wave occupies in a structure. Picks the ratio table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum WaveRole {
    W2,
    W3,
    W4,
    W5,
    A,
    B,
    C,
    Y,
    #[strum(serialize = "precursor")]
    Precursor,
}

impl WaveRole {
    #[inline]
    pub fn default_kind(self) -> ProjectionKind {
        match self {
            Self::W2 | Self::W4 | Self::A | Self::B | Self::Precursor => ProjectionKind::Retracement,
            Self::W3 | Self::W5 | Self::C | Self::Y => ProjectionKind::Extension,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProjectionKind {
    /// Back into the measured range.
    Retracement,
    /// Beyond the launch price.
    Extension,
}

/// Externally resolved correction / diagonal type. The engine never guesses these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, Display)]
pub enum ProjectionVariant {
    #[default]
    Standard,
    ZigzagCorrection,
    FlatCorrection,
    ContractingDiagonal,
    ExpandingDiagonal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionLevel {
    pub ratio: f64,
    pub price: f64,
    /// "61.8%"
    pub label: String,
}

/// Candidate target prices for one wave role, with the inputs echoed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionContext {
    pub role: WaveRole,
    pub kind: ProjectionKind,
    pub anchor_start: f64,
    pub anchor_end: f64,
    pub launch_price: f64,
    /// Direction the projected wave moves in.
    pub direction: Direction,
    pub levels: Vec<ProjectionLevel>,
    /// Free text provenance, e.g. "Minor W1 range".
    pub source: String,
}

impl ProjectionContext {
    #[inline]
    pub fn range(&self) -> f64 {
        (self.anchor_end - self.anchor_start).abs()
    }

    pub fn ratios(&self) -> Vec<f64> {
        self.levels.iter().map(|l| l.ratio).collect()
    }

    /// Level whose price is closest to `price`, if within `tolerance_pct` of it.
    pub fn nearest_level(&self, price: f64, tolerance_pct: f64) -> Option<&ProjectionLevel> {
        if !price.is_finite() || price <= 0.0 {
            return None;
        }
        self.levels
            .iter()
            .map(|l| (l, (l.price - price).abs()))
            .filter(|(_, dist)| *dist / price <= tolerance_pct)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(l, _)| l)
    }
}
