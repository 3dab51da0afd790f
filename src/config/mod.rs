//! Configuration module for the wave stack engine.

mod analysis;
mod debug;

// Public
pub mod fibonacci;

// Re-export commonly used items
pub use analysis::{
    ANALYSIS, AnalysisConfig, CascadeSettings, GroupingSettings, ScoringSettings, TierThresholds,
};
pub use debug::DF;
