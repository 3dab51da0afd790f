//! Wave stack analyzer: runs the detectors in strict priority order, first hit wins.

mod cross_degree;
mod multi_degree_sweep;
mod nested_impulse;
mod sequence_catalog;

use rayon::prelude::*;

use crate::{
    analysis::{
        degree_stack::DegreeStack,
        fib_projection::{FibCalculator, ProjectionRequest},
    },
    config::DF,
    domain::{DegreeHierarchy, WaveEntry},
    models::{
        Confidence, ProjectionContext, ProjectionVariant, SuggestionSource, WaveRole,
        WaveStackSuggestion,
    },
};

use cross_degree::CrossDegreeContinuation;
use multi_degree_sweep::MultiDegreeSweep;
use nested_impulse::NestedImpulse;
use sequence_catalog::SequenceCatalog;

/// One stage of the cascade. Returns None to pass to the next stage.
pub(crate) trait StackDetector: Sync {
    fn name(&self) -> &'static str;
    fn detect(&self, stack: &DegreeStack<'_>) -> Option<WaveStackSuggestion>;
}

static DETECTORS: &[&dyn StackDetector] = &[
    &CrossDegreeContinuation,
    &NestedImpulse,
    &SequenceCatalog,
    &MultiDegreeSweep,
];

/// Analyzes one instrument's entries against the standard Elliott degree catalog.
pub fn analyze_stack(entries: &[WaveEntry]) -> WaveStackSuggestion {
    analyze_stack_with(entries, &DegreeHierarchy::elliott())
}

pub fn analyze_stack_with(entries: &[WaveEntry], hierarchy: &DegreeHierarchy) -> WaveStackSuggestion {
    if entries.is_empty() {
        return WaveStackSuggestion::no_data();
    }

    let stack = DegreeStack::build(entries, hierarchy);
    if stack.is_empty() {
        return WaveStackSuggestion::no_data();
    }

    for detector in DETECTORS {
        match detector.detect(&stack) {
            Some(suggestion) => {
                if DF.log_cascade {
                    log::debug!(
                        "analyze_stack(): '{}' matched on {}: {}",
                        detector.name(),
                        stack.describe(),
                        suggestion
                    );
                }
                return suggestion;
            }
            None => {
                if DF.log_cascade {
                    log::debug!("analyze_stack(): '{}' declined", detector.name());
                }
            }
        }
    }

    let evidence: Vec<&WaveEntry> = stack
        .coarsest()
        .map(|s| s.entries.clone())
        .unwrap_or_default();
    build_suggestion(
        SuggestionSource::Fallback,
        stack.describe(),
        WaveStackSuggestion::ADD_MORE_WAVES_MESSAGE.to_string(),
        Confidence::Low,
        &evidence,
        Vec::new(),
    )
}

/// Runs `analyze_stack` per instrument in parallel. Output order follows input order.
pub fn analyze_instruments(instruments: &[(String, Vec<WaveEntry>)]) -> Vec<(String, WaveStackSuggestion)> {
    instruments
        .par_iter()
        .map(|(symbol, entries)| (symbol.clone(), analyze_stack(entries)))
        .collect()
}

pub(crate) fn build_suggestion(
    source: SuggestionSource,
    sequence: String,
    message: String,
    confidence: Confidence,
    evidence: &[&WaveEntry],
    projections: Vec<ProjectionContext>,
) -> WaveStackSuggestion {
    WaveStackSuggestion {
        sequence,
        message,
        confidence,
        source,
        start_price: evidence.first().map(|e| e.start_price),
        end_price: evidence.last().map(|e| e.end_price),
        projections,
    }
}

/// Extension of `leg`'s range launched from `launch`, moving in the leg's own direction.
pub(crate) fn extend_leg(
    role: WaveRole,
    leg: &WaveEntry,
    launch: f64,
    source: String,
    variant: ProjectionVariant,
) -> Option<ProjectionContext> {
    let req = ProjectionRequest::new(role, leg.start_price, leg.end_price, leg.direction())
        .launched_from(launch)
        .with_source(source)
        .with_variant(variant);
    FibCalculator::project(&req)
}

/// Retracement of `leg` launched from its own end.
pub(crate) fn retrace_leg(role: WaveRole, leg: &WaveEntry, source: String) -> Option<ProjectionContext> {
    let req = ProjectionRequest::new(role, leg.start_price, leg.end_price, leg.direction())
        .with_source(source);
    FibCalculator::project(&req)
}

/// "5-3": both the W3 (impulse) and the C (zigzag) readings.
pub(crate) fn w3_or_c(degree: &str, first: &WaveEntry, second: &WaveEntry) -> Vec<ProjectionContext> {
    [
        extend_leg(
            WaveRole::W3,
            first,
            second.end_price,
            format!("{} W1 range", degree),
            ProjectionVariant::Standard,
        ),
        extend_leg(
            WaveRole::C,
            first,
            second.end_price,
            format!("{} A range (zigzag)", degree),
            ProjectionVariant::ZigzagCorrection,
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// "3-3": both the C (flat) and the Y (combination) readings.
pub(crate) fn c_or_y(degree: &str, first: &WaveEntry, second: &WaveEntry) -> Vec<ProjectionContext> {
    [
        extend_leg(
            WaveRole::C,
            first,
            second.end_price,
            format!("{} A range (flat)", degree),
            ProjectionVariant::FlatCorrection,
        ),
        extend_leg(
            WaveRole::Y,
            first,
            second.end_price,
            format!("{} W range (WXY)", degree),
            ProjectionVariant::Standard,
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}
