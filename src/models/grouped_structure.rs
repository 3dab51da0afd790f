use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::{
    config::ANALYSIS,
    domain::{Direction, WaveEntry, WaveSequence},
    models::{ArchetypeLabel, ParentWave},
    utils::{format_duration, pct_change},
};

/// Internal consistency score, always within [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ValidityScore(f64);

impl ValidityScore {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    pub const fn new(val: f64) -> Self {
        let v = if val.is_nan() || val < Self::MIN {
            Self::MIN
        } else if val > Self::MAX {
            Self::MAX
        } else {
            val
        };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn tier(self) -> ValidityTier {
        let t = &ANALYSIS.tiers;
        if self.0 >= t.excellent {
            ValidityTier::Excellent
        } else if self.0 >= t.good {
            ValidityTier::Good
        } else if self.0 >= t.fair {
            ValidityTier::Fair
        } else {
            ValidityTier::Poor
        }
    }
}

impl fmt::Display for ValidityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ValidityTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// One row of the grouped structure table: a run of same-degree entries, optionally
/// nested inside one wave of the next coarser degree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupedStructure {
    pub degree: String,
    pub label: ArchetypeLabel,
    pub sequence: WaveSequence,
    /// Time ordered.
    pub entries: Vec<WaveEntry>,
    pub parent: Option<ParentWave>,

    pub start_price: f64,
    pub end_price: f64,
    pub start_ts: i64,
    pub end_ts: i64,

    pub validity: ValidityScore,
    pub tier: ValidityTier,
    pub direction: Direction,
}

impl GroupedStructure {
    /// Percent move from first start to last end. None when the start price is not positive.
    pub fn pct_move(&self) -> Option<f64> {
        pct_change(self.start_price, self.end_price)
    }

    pub fn duration_ms(&self) -> i64 {
        self.end_ts - self.start_ts
    }

    pub fn duration_label(&self) -> String {
        format_duration(self.duration_ms())
    }

    pub fn is_orphan_group(&self) -> bool {
        self.parent.is_none()
    }
}

impl fmt::Display for GroupedStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}] score {} ({})",
            self.degree, self.label, self.sequence, self.validity, self.tier
        )
    }
}
