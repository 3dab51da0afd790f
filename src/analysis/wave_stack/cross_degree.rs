use crate::{
    analysis::{
        degree_stack::{DegreeSlice, DegreeStack},
        fib_projection::{FibCalculator, ProjectionRequest},
    },
    config::fibonacci,
    domain::{PatternKind, WaveEntry, WaveSequence},
    models::{
        Confidence, ProjectionContext, ProjectionKind, ProjectionVariant, SuggestionSource,
        WaveRole, WaveStackSuggestion,
    },
};

use super::{StackDetector, build_suggestion, extend_leg};

/// A completed impulse at one degree followed by an unfinished correction one degree finer.
pub(crate) struct CrossDegreeContinuation;

impl StackDetector for CrossDegreeContinuation {
    fn name(&self) -> &'static str {
        "cross-degree continuation"
    }

    fn detect(&self, stack: &DegreeStack<'_>) -> Option<WaveStackSuggestion> {
        stack
            .adjacent_pairs()
            .find_map(|(coarser, finer)| continuation(coarser, finer))
    }
}

fn continuation(coarser: &DegreeSlice<'_>, finer: &DegreeSlice<'_>) -> Option<WaveStackSuggestion> {
    let impulse = coarser.last()?;
    if impulse.kind != PatternKind::Impulse {
        return None;
    }

    let after: Vec<&WaveEntry> = finer
        .entries
        .iter()
        .copied()
        .filter(|e| e.start_ts >= impulse.end_ts)
        .collect();
    let last = *after.last()?;
    let seq = WaveSequence::from_entries(after.iter().copied());

    let sequence = format!("{} {} > {} {}", coarser.degree, coarser.sequence, finer.degree, seq);
    let header = format!("{} impulse complete ({})", coarser.degree, impulse.direction());
    let mut evidence = vec![impulse];
    evidence.extend(after.iter().copied());

    let finish = |message: String, confidence: Confidence, projections: Vec<ProjectionContext>| {
        build_suggestion(
            SuggestionSource::CrossDegree,
            sequence.clone(),
            message,
            confidence,
            &evidence,
            projections,
        )
    };

    // W done, X triangle done: need Y
    if seq.is(&[3, 5]) && last.kind == PatternKind::Triangle {
        let w = after[0];
        let y = extend_leg(
            WaveRole::Y,
            w,
            last.end_price,
            format!("{} W range", finer.degree),
            ProjectionVariant::Standard,
        )?;
        let message = format!(
            "{}. {} W then X-triangle in place: expect Y wave {} (WXY)",
            header,
            finer.degree,
            w.direction()
        );
        return Some(finish(message, Confidence::Medium, vec![y]));
    }

    // Trailing triangle read as a finished B wave
    if last.kind == PatternKind::Triangle {
        let a_leg = after
            .len()
            .checked_sub(2)
            .map(|idx| after[idx])
            .filter(|a| a.kind != PatternKind::Triangle);

        let c_from_a = a_leg.and_then(|a| {
            extend_leg(
                WaveRole::C,
                a,
                last.end_price,
                format!("{} A range", finer.degree),
                ProjectionVariant::Standard,
            )
        });

        return match c_from_a {
            Some(c) => {
                let message = format!(
                    "{}. {} B-triangle complete: expect C wave {} off the triangle",
                    header,
                    finer.degree,
                    c.direction
                );
                let projections = std::iter::once(c)
                    .chain(impulse_retracement(coarser, impulse))
                    .collect();
                Some(finish(message, Confidence::High, projections))
            }
            None => {
                let fallback = impulse_retracement(coarser, impulse)?;
                let message = format!(
                    "{}. {} triangle read as B wave: expect C wave {} into the impulse retracement zone",
                    header,
                    finer.degree,
                    fallback.direction
                );
                Some(finish(message, Confidence::Medium, vec![fallback]))
            }
        };
    }

    // A-B in place: need C
    let (variant, confidence, shape) = if seq.is(&[5, 3]) {
        (ProjectionVariant::ZigzagCorrection, Confidence::High, "zigzag")
    } else if seq.is(&[3, 3]) {
        (ProjectionVariant::FlatCorrection, Confidence::Medium, "flat")
    } else {
        return None;
    };

    let (a, b) = (after[0], after[1]);
    let c = extend_leg(
        WaveRole::C,
        a,
        b.end_price,
        format!("{} A range ({})", finer.degree, shape),
        variant,
    )?;
    let message = format!(
        "{}. {} A-B ({}) in place: expect C wave {}",
        header, finer.degree, shape, c.direction
    );
    let projections = std::iter::once(c)
        .chain(impulse_retracement(coarser, impulse))
        .collect();
    Some(finish(message, confidence, projections))
}

/// C-wave target zone measured as a retracement of the whole completed impulse.
fn impulse_retracement(coarser: &DegreeSlice<'_>, impulse: &WaveEntry) -> Option<ProjectionContext> {
    let req = ProjectionRequest::new(
        WaveRole::C,
        impulse.start_price,
        impulse.end_price,
        impulse.direction().opposite(),
    )
    .with_source(format!("{} impulse retracement", coarser.degree));
    FibCalculator::project_with_ratios(&req, fibonacci::retracement::A, ProjectionKind::Retracement)
}

#[cfg(test)]
mod tests {
    use super::super::{analyze_stack, test_support::wave};
    use crate::domain::{Direction, PatternKind::*};
    use crate::models::{Confidence, ProjectionKind, SuggestionSource, WaveRole};

    fn impulse() -> Vec<crate::domain::WaveEntry> {
        vec![wave("I", "Minor", Impulse, (100.0, 200.0), (0, 100))]
    }

    #[test]
    fn zigzag_a_b_after_impulse_projects_c() {
        let mut entries = impulse();
        entries.push(wave("a", "Minute", Impulse, (200.0, 160.0), (100, 110)));
        entries.push(wave("b", "Minute", Correction, (160.0, 180.0), (110, 118)));

        let s = analyze_stack(&entries);
        assert_eq!(s.source, SuggestionSource::CrossDegree);
        assert_eq!(s.confidence.to_string(), "high");
        assert_eq!(s.projections.len(), 2);

        let c = s.projection_for(WaveRole::C).unwrap();
        assert_eq!(c.direction, Direction::Down);
        assert_eq!(c.launch_price, 180.0);
        // 180 - 40 * 1.0
        assert!((c.levels[0].price - 140.0).abs() < 1e-9);

        let retrace = &s.projections[1];
        assert_eq!(retrace.kind, ProjectionKind::Retracement);
        assert!((retrace.levels[1].price - 150.0).abs() < 1e-9);
        assert_eq!(s.start_price, Some(100.0));
        assert_eq!(s.end_price, Some(180.0));
    }

    #[test]
    fn flat_a_b_after_impulse_projects_c() {
        let mut entries = impulse();
        entries.push(wave("a", "Minute", Correction, (200.0, 170.0), (100, 110)));
        entries.push(wave("b", "Minute", Flat, (170.0, 198.0), (110, 120)));

        let s = analyze_stack(&entries);
        assert_eq!(s.source, SuggestionSource::CrossDegree);
        assert_eq!(s.confidence, Confidence::Medium);
        assert!(s.message.contains("(flat)"));
        assert_eq!(s.projections.len(), 2);

        let c = &s.projections[0];
        assert_eq!(c.role, WaveRole::C);
        assert_eq!(c.kind, ProjectionKind::Extension);
        assert_eq!(c.direction, Direction::Down);
        assert_eq!(c.ratios(), vec![1.0, 1.272, 1.618]);
        assert_eq!(c.launch_price, 198.0);
        // 198 - 30 * 1.0
        assert!((c.levels[0].price - 168.0).abs() < 1e-9);

        let retrace = &s.projections[1];
        assert_eq!(retrace.role, WaveRole::C);
        assert_eq!(retrace.kind, ProjectionKind::Retracement);
        assert_eq!(retrace.launch_price, 200.0);
        assert_eq!(retrace.ratios(), vec![0.382, 0.5, 0.618]);
    }

    #[test]
    fn last_sub_wave_of_the_impulse_is_not_wave_a() {
        let mut entries = impulse();
        // final sub-wave of W5, ends exactly where the impulse ends
        entries.push(wave("v", "Minute", Impulse, (190.0, 200.0), (97, 100)));
        entries.push(wave("a", "Minute", Correction, (200.0, 180.0), (100, 110)));

        let s = analyze_stack(&entries);
        // only "3" follows the impulse, so this falls through to the lone "5" at Minor
        assert_eq!(s.source, SuggestionSource::SequenceCatalog);
        assert!(s.projections.is_empty());
    }

    #[test]
    fn triangle_b_projects_c_from_a_leg() {
        let mut entries = impulse();
        // 5-wave A leg, so this is not the W-X(triangle) case
        entries.push(wave("a", "Minute", Impulse, (200.0, 170.0), (100, 110)));
        entries.push(wave("b", "Minute", Triangle, (170.0, 182.0), (110, 125)));

        let s = analyze_stack(&entries);
        assert_eq!(s.source, SuggestionSource::CrossDegree);
        assert!(s.message.contains("B-triangle"));
        let c = s.projection_for(WaveRole::C).unwrap();
        assert_eq!(c.launch_price, 182.0);
        assert_eq!(c.kind, ProjectionKind::Extension);
    }

    #[test]
    fn lone_triangle_falls_back_to_impulse_retracement() {
        let mut entries = impulse();
        entries.push(wave("b", "Minute", Triangle, (200.0, 190.0), (100, 120)));

        let s = analyze_stack(&entries);
        assert_eq!(s.confidence.to_string(), "medium");
        assert_eq!(s.projections.len(), 1);
        assert_eq!(s.projections[0].kind, ProjectionKind::Retracement);
        assert_eq!(s.projections[0].launch_price, 200.0);
    }

    #[test]
    fn w_then_x_triangle_projects_y() {
        let mut entries = impulse();
        entries.push(wave("w", "Minute", Correction, (200.0, 170.0), (100, 110)));
        entries.push(wave("x", "Minute", Triangle, (170.0, 180.0), (110, 125)));

        let s = analyze_stack(&entries);
        assert!(s.has_role(WaveRole::Y));
        assert!(!s.has_role(WaveRole::C));
        assert!(s.message.contains("WXY"));
    }

    #[test]
    fn finer_waves_before_the_impulse_end_are_ignored() {
        let mut entries = impulse();
        // inside the impulse, not after it
        entries.push(wave("i1", "Minute", Impulse, (100.0, 130.0), (0, 20)));
        entries.push(wave("i2", "Minute", Correction, (130.0, 120.0), (20, 30)));

        let s = analyze_stack(&entries);
        assert_ne!(s.source, SuggestionSource::CrossDegree);
    }
}
