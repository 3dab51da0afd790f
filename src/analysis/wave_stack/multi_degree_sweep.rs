use crate::{
    analysis::degree_stack::DegreeStack,
    config::ANALYSIS,
    models::{Confidence, ProjectionContext, SuggestionSource, WaveRole, WaveStackSuggestion},
};

use super::{StackDetector, build_suggestion, c_or_y, retrace_leg, w3_or_c};

const COMPLETE: &[&[u8]] = &[
    &[5, 3, 5, 3, 5],
    &[5, 3, 5],
    &[3, 3, 5],
    &[3, 5, 5],
    &[3, 5, 3],
    &[3, 3, 3],
    &[3, 3, 3, 3, 3],
];

/// Last resort before the fallback: summarize every degree that is mid-structure.
pub(crate) struct MultiDegreeSweep;

impl StackDetector for MultiDegreeSweep {
    fn name(&self) -> &'static str {
        "multi-degree sweep"
    }

    fn detect(&self, stack: &DegreeStack<'_>) -> Option<WaveStackSuggestion> {
        let mut summaries = Vec::new();
        let mut projections: Vec<ProjectionContext> = Vec::new();
        let mut evidence = Vec::new();

        for slice in &stack.slices {
            if COMPLETE.iter().any(|c| slice.sequence.is(c)) {
                continue;
            }
            let degree = slice.degree.as_str();
            let entries = &slice.entries;

            let (summary, found) = match slice.sequence.counts() {
                [5, 3] => (
                    format!("{} 5-3: W3 or C next", degree),
                    w3_or_c(degree, entries[0], entries[1]),
                ),
                [3, 3] => (
                    format!("{} 3-3: C or Y next", degree),
                    c_or_y(degree, entries[0], entries[1]),
                ),
                [5] => (
                    format!("{} 5: W2 pullback next", degree),
                    retrace_leg(WaveRole::W2, entries[0], format!("{} W1 range", degree))
                        .into_iter()
                        .collect(),
                ),
                _ => continue,
            };

            summaries.push(summary);
            projections.extend(found);
            evidence.extend(entries.iter().copied());
        }

        if summaries.is_empty() {
            return None;
        }

        evidence.sort_by_key(|e| (e.start_ts, e.end_ts));
        Some(build_suggestion(
            SuggestionSource::MultiDegreeSweep,
            stack.describe(),
            summaries.join(ANALYSIS.cascade.sweep_separator),
            Confidence::Low,
            &evidence,
            projections,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::super::{analyze_stack, test_support::wave};
    use crate::domain::PatternKind::*;
    use crate::models::{Confidence, SuggestionSource, WaveRole};

    #[test]
    fn sweep_collects_unfinished_degrees() {
        // 5-5 at the coarsest degree is not in the catalog
        let entries = vec![
            wave("1", "Intermediate", Impulse, (100.0, 60.0), (0, 30)),
            wave("2", "Intermediate", Diagonal, (60.0, 40.0), (30, 80)),
            wave("i", "Minute", Impulse, (40.0, 50.0), (80, 85)),
        ];
        let s = analyze_stack(&entries);
        assert_eq!(s.source, SuggestionSource::MultiDegreeSweep);
        assert_eq!(s.confidence, Confidence::Low);
        assert_eq!(s.message, "Minute 5: W2 pullback next");
        let w2 = s.projection_for(WaveRole::W2).unwrap();
        assert_eq!(w2.launch_price, 50.0);
    }

    #[test]
    fn summaries_are_joined_in_degree_order() {
        let entries = vec![
            wave("1", "Intermediate", Impulse, (100.0, 60.0), (0, 30)),
            wave("2", "Intermediate", Diagonal, (60.0, 40.0), (30, 80)),
            wave("a", "Minor", Correction, (40.0, 50.0), (80, 84)),
            wave("b", "Minor", Correction, (50.0, 45.0), (84, 86)),
            wave("i", "Minute", Impulse, (45.0, 48.0), (86, 87)),
        ];
        let s = analyze_stack(&entries);
        assert_eq!(s.source, SuggestionSource::MultiDegreeSweep);
        assert_eq!(s.message, "Minor 3-3: C or Y next | Minute 5: W2 pullback next");
        assert!(s.has_role(WaveRole::C));
        assert!(s.has_role(WaveRole::Y));
        assert!(s.has_role(WaveRole::W2));
    }
}
