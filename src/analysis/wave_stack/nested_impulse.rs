use itertools::Itertools;

use crate::{
    analysis::{
        degree_stack::{DegreeSlice, DegreeStack},
        fib_projection::{FibCalculator, ProjectionRequest},
    },
    config::{ANALYSIS, fibonacci},
    models::{Confidence, ProjectionKind, SuggestionSource, WaveRole, WaveStackSuggestion},
};

use super::{StackDetector, build_suggestion};

/// Two or more degrees each sitting at an unfinished wave 1-2, all pointing the same way.
pub(crate) struct NestedImpulse;

impl StackDetector for NestedImpulse {
    fn name(&self) -> &'static str {
        "nested 1-2"
    }

    fn detect(&self, stack: &DegreeStack<'_>) -> Option<WaveStackSuggestion> {
        let cascade = &ANALYSIS.cascade;

        let nested: Vec<&DegreeSlice<'_>> = stack
            .slices
            .iter()
            .filter(|s| s.sequence.is(&[5, 3]))
            .collect();
        if nested.len() < cascade.nested_min_degrees {
            return None;
        }

        let direction = nested[0].net_direction()?;
        if !nested.iter().all(|s| s.net_direction() == Some(direction)) {
            return None;
        }

        // Highest degree sets the wave-1 range
        let highest = nested[0];
        let (w1, w2) = (highest.entries[0], highest.entries[1]);

        let uber = nested.len() >= cascade.nested_uber_degrees;
        let ratios = if uber {
            fibonacci::nested::THREE_OR_MORE
        } else {
            fibonacci::nested::TWO_DEGREES
        };

        let req = ProjectionRequest::new(WaveRole::W3, w1.start_price, w1.end_price, direction)
            .launched_from(w2.end_price)
            .with_source(format!("{} W1 range (nested 1-2)", highest.degree));
        let w3 = FibCalculator::project_with_ratios(&req, ratios, ProjectionKind::Extension)?;

        let degrees = nested.iter().map(|s| s.degree.as_str()).join(" + ");
        let bias = direction.bias_label();
        let message = if uber {
            format!(
                "UBER {}: nested 1-2 on {} degrees ({}). Expect an extended W3 {}",
                bias.to_uppercase(),
                nested.len(),
                degrees,
                direction
            )
        } else {
            format!("Nested 1-2 on {}: {} setup. Expect W3 {}", degrees, bias, direction)
        };

        let finest = nested[nested.len() - 1];
        let evidence = [Some(w1), finest.last()].into_iter().flatten().collect::<Vec<_>>();

        Some(build_suggestion(
            SuggestionSource::NestedImpulse,
            nested.iter().map(|s| s.describe()).join(" > "),
            message,
            Confidence::High,
            &evidence,
            vec![w3],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::super::{analyze_stack, test_support::wave};
    use crate::domain::PatternKind::*;
    use crate::models::{Confidence, SuggestionSource, WaveRole};

    #[test]
    fn mixed_directions_do_not_nest() {
        let entries = vec![
            wave("M1", "Minor", Impulse, (100.0, 150.0), (0, 50)),
            wave("M2", "Minor", Correction, (150.0, 130.0), (50, 70)),
            wave("m1", "Minute", Impulse, (130.0, 120.0), (70, 75)),
            wave("m2", "Minute", Correction, (120.0, 125.0), (75, 78)),
        ];
        let s = analyze_stack(&entries);
        assert_ne!(s.source, SuggestionSource::NestedImpulse);
    }

    #[test]
    fn any_five_count_first_leg_qualifies() {
        let entries = vec![
            wave("M1", "Minor", Triangle, (100.0, 110.0), (0, 20)),
            wave("M2", "Minor", Correction, (110.0, 105.0), (20, 30)),
            wave("m1", "Minute", Impulse, (105.0, 115.0), (30, 35)),
            wave("m2", "Minute", Correction, (115.0, 110.0), (35, 38)),
        ];
        let s = analyze_stack(&entries);
        assert_eq!(s.source, SuggestionSource::NestedImpulse);
        assert!(s.message.contains("Minor + Minute"));
        assert_eq!(s.projection_for(WaveRole::W3).unwrap().launch_price, 105.0);
    }

    #[test]
    fn w3_measured_off_highest_degree() {
        let entries = vec![
            wave("P1", "Primary", Impulse, (100.0, 200.0), (0, 100)),
            wave("P2", "Primary", Correction, (200.0, 150.0), (100, 150)),
            wave("m1", "Minor", Impulse, (150.0, 170.0), (150, 160)),
            wave("m2", "Minor", Correction, (170.0, 160.0), (160, 165)),
        ];
        let s = analyze_stack(&entries);
        assert_eq!(s.source, SuggestionSource::NestedImpulse);
        assert_eq!(s.confidence, Confidence::High);

        let w3 = s.projection_for(WaveRole::W3).unwrap();
        assert_eq!(w3.launch_price, 150.0);
        assert_eq!(w3.anchor_start, 100.0);
        assert!((w3.levels[0].price - (150.0 + 161.8)).abs() < 1e-9);
        assert_eq!(s.start_price, Some(100.0));
        assert_eq!(s.end_price, Some(160.0));
    }
}
