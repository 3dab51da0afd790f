//! Analysis and scoring configuration

use serde::{Deserialize, Serialize};

/// Settings for matching finer-degree waves into the timespans of coarser waves.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GroupingSettings {
    /// Fraction of a parent wave's span added on each side before containment is tested.
    pub parent_span_tolerance_pct: f64,
}

/// Weights for the validity score of a grouped structure.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ScoringSettings {
    pub base_score: f64,
    pub well_formed_bonus: f64,

    // WXY |W| / |Y| ratio tiers
    pub wxy_golden_ratio: f64,
    pub wxy_secondary_ratio: f64,
    pub wxy_golden_bonus: f64,
    pub wxy_secondary_bonus: f64,
    pub wxy_weak_bonus: f64,

    /// Zigzag / Impulse members strictly alternating direction.
    pub alternation_bonus: f64,

    pub min_entries_bonus_3: f64,
    pub min_entries_bonus_5: f64,
}

/// Lower bounds of each validity tier.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TierThresholds {
    pub excellent: f64,
    pub good: f64,
    pub fair: f64,
}

/// Settings specific to the wave stack cascade
#[derive(Clone, Copy, Debug, Serialize)]
pub struct CascadeSettings {
    /// Minimum number of degrees showing "5-3" for a nested 1-2 setup.
    pub nested_min_degrees: usize,
    /// Degree count at which a nested setup is promoted to "UBER".
    pub nested_uber_degrees: usize,
    /// Joins per-degree summaries in the open-ended sweep.
    pub sweep_separator: &'static str,
}

/// The Master Analysis Configuration
#[derive(Clone, Copy, Debug, Serialize)]
pub struct AnalysisConfig {
    /// Every projected price is floored here. Asset prices are strictly positive.
    pub min_price: f64,
    /// Measured ranges at or below this are treated as zero-length.
    pub min_range: f64,

    pub grouping: GroupingSettings,
    pub scoring: ScoringSettings,
    pub tiers: TierThresholds,
    pub cascade: CascadeSettings,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    min_price: 1e-8,
    min_range: 1e-12,

    grouping: GroupingSettings {
        parent_span_tolerance_pct: 0.05,
    },

    scoring: ScoringSettings {
        base_score: 50.0,
        well_formed_bonus: 20.0,
        wxy_golden_ratio: 0.618,
        wxy_secondary_ratio: 0.382,
        wxy_golden_bonus: 15.0,
        wxy_secondary_bonus: 10.0,
        wxy_weak_bonus: 5.0,
        alternation_bonus: 15.0,
        min_entries_bonus_3: 5.0,
        min_entries_bonus_5: 5.0,
    },

    tiers: TierThresholds {
        excellent: 80.0,
        good: 60.0,
        fair: 40.0,
    },

    cascade: CascadeSettings {
        nested_min_degrees: 2,
        nested_uber_degrees: 3,
        sweep_separator: " | ",
    },
};
