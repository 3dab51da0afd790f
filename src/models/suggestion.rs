use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::models::{ProjectionContext, WaveRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Which cascade stage produced the suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum SuggestionSource {
    NoData,
    CrossDegree,
    NestedImpulse,
    SequenceCatalog,
    MultiDegreeSweep,
    Fallback,
}

/// The single output of the wave stack analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveStackSuggestion {
    /// e.g. "Minor 5-3-5-3-5 > Minute 5-3"
    pub sequence: String,
    pub message: String,
    pub confidence: Confidence,
    pub source: SuggestionSource,
    /// Start / end price of the evidence used. None for the no data sentinel.
    pub start_price: Option<f64>,
    pub end_price: Option<f64>,
    pub projections: Vec<ProjectionContext>,
}

impl WaveStackSuggestion {
    pub const NO_DATA_MESSAGE: &'static str = "No wave patterns to analyze";
    pub const ADD_MORE_WAVES_MESSAGE: &'static str =
        "No recognizable structure yet. Add more waves to get a suggestion";

    pub fn no_data() -> Self {
        Self {
            sequence: String::new(),
            message: Self::NO_DATA_MESSAGE.to_string(),
            confidence: Confidence::Low,
            source: SuggestionSource::NoData,
            start_price: None,
            end_price: None,
            projections: Vec::new(),
        }
    }

    #[inline]
    pub fn is_no_data(&self) -> bool {
        self.source == SuggestionSource::NoData
    }

    pub fn projection_for(&self, role: WaveRole) -> Option<&ProjectionContext> {
        self.projections.iter().find(|p| p.role == role)
    }

    pub fn has_role(&self, role: WaveRole) -> bool {
        self.projection_for(role).is_some()
    }
}

impl fmt::Display for WaveStackSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.confidence, self.message)
    }
}
