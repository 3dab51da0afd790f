use crate::{
    analysis::{archetype_classifier::classify_sequence, degree_stack::DegreeStack},
    domain::{PatternKind, WaveEntry, WaveSequence},
    models::{
        Archetype, Confidence, ProjectionContext, ProjectionVariant, SuggestionSource, WaveRole,
        WaveStackSuggestion,
    },
};

use super::{StackDetector, build_suggestion, c_or_y, extend_leg, retrace_leg, w3_or_c};

const COMPLETE_IMPULSE: [u8; 5] = [5, 3, 5, 3, 5];

/// Matches the coarsest populated degree against known complete and building sequences.
pub(crate) struct SequenceCatalog;

impl StackDetector for SequenceCatalog {
    fn name(&self) -> &'static str {
        "same-degree catalog"
    }

    fn detect(&self, stack: &DegreeStack<'_>) -> Option<WaveStackSuggestion> {
        let slice = stack.coarsest()?;
        let found = lookup(&slice.degree, &slice.entries)?;

        Some(build_suggestion(
            SuggestionSource::SequenceCatalog,
            slice.describe(),
            found.message,
            found.confidence,
            &slice.entries,
            found.projections,
        ))
    }
}

struct CatalogMatch {
    message: String,
    confidence: Confidence,
    projections: Vec<ProjectionContext>,
}

impl CatalogMatch {
    fn new(message: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            message: message.into(),
            confidence,
            projections: Vec::new(),
        }
    }

    fn with(mut self, projections: impl IntoIterator<Item = ProjectionContext>) -> Self {
        self.projections.extend(projections);
        self
    }
}

/// `entries` are time ordered and non-empty.
fn lookup(degree: &str, entries: &[&WaveEntry]) -> Option<CatalogMatch> {
    let seq = WaveSequence::from_entries(entries.iter().copied());

    // A finished impulse followed by more waves: read the remainder as the next structure
    if seq.len() > COMPLETE_IMPULSE.len() && seq.starts_with(&COMPLETE_IMPULSE) {
        let next = lookup(degree, &entries[COMPLETE_IMPULSE.len()..])?;
        return Some(CatalogMatch {
            message: format!("{} impulse complete. Next structure: {}", degree, next.message),
            ..next
        });
    }

    let last = *entries.last()?;
    if last.kind == PatternKind::Triangle {
        return trailing_triangle(degree, entries, &seq);
    }

    let kinds: Vec<PatternKind> = entries.iter().map(|e| e.kind).collect();
    let found = match seq.counts() {
        [5] => CatalogMatch::new(
            format!(
                "{} single 5-wave move: could be W1, W3, W5, or A/C. Add the next wave to narrow it down",
                degree
            ),
            Confidence::Low,
        ),
        [3] => CatalogMatch::new(
            format!(
                "{} single corrective wave: could be W2, W4, A, B or W. Add the next wave to narrow it down",
                degree
            ),
            Confidence::Low,
        ),
        [5, 3] => CatalogMatch::new(
            format!(
                "{} W1-W2 or A-B: expect W3 (impulse) or C (zigzag)",
                degree
            ),
            Confidence::Medium,
        )
        .with(w3_or_c(degree, entries[0], entries[1])),
        [3, 3] => CatalogMatch::new(
            format!(
                "{} A-B of a flat or W-X of a combination: expect C (flat) or Y (WXY)",
                degree
            ),
            Confidence::Medium,
        )
        .with(c_or_y(degree, entries[0], entries[1])),
        [5, 3, 5] => CatalogMatch::new(
            format!(
                "{} Zigzag A-B-C complete, or W1-W2-W3 of an impulse: watch the W4 retracement zone",
                degree
            ),
            Confidence::Medium,
        )
        .with(retrace_leg(WaveRole::W4, entries[2], format!("{} W3 range", degree))),
        [5, 3, 5, 3] => CatalogMatch::new(
            format!("{} impulse building (W1-W4), waiting for W5", degree),
            Confidence::Medium,
        )
        .with(extend_leg(
            WaveRole::W5,
            entries[0],
            entries[3].end_price,
            format!("{} W1 range", degree),
            ProjectionVariant::Standard,
        )),
        [5, 3, 5, 3, 5] => {
            // Correction of the whole impulse, launched from the W5 end
            let whole = WaveEntry {
                start_price: entries[0].start_price,
                start_ts: entries[0].start_ts,
                ..last.clone()
            };
            CatalogMatch::new(
                format!("{} impulse complete (W1-W5): expect an A-B-C correction", degree),
                Confidence::High,
            )
            .with(retrace_leg(WaveRole::A, &whole, format!("{} impulse W1-W5 range", degree)))
        }
        [3, 3, 3, 3] => CatalogMatch::new(
            format!("{} W-X-Y-X building, need Z", degree),
            Confidence::Medium,
        )
        .with(extend_leg(
            WaveRole::Y,
            entries[0],
            last.end_price,
            format!("{} W range (Z leg)", degree),
            ProjectionVariant::Standard,
        )),
        [3, 3, 5] | [3, 5, 5] | [3, 5, 3] | [3, 3, 3] | [3, 3, 3, 3, 3] => {
            let archetype = classify_sequence(&seq, &kinds);
            let follow_up = match archetype {
                Archetype::Triangle => "expect a thrust out of the triangle",
                _ => "expect the larger trend to resume",
            };
            CatalogMatch::new(
                format!("{} {} complete: {}", degree, archetype, follow_up),
                Confidence::Medium,
            )
        }
        _ => return None,
    };

    Some(found)
}

fn trailing_triangle(degree: &str, entries: &[&WaveEntry], seq: &WaveSequence) -> Option<CatalogMatch> {
    let triangle = *entries.last()?;

    let Some(prev) = entries.len().checked_sub(2).map(|idx| entries[idx]) else {
        return Some(CatalogMatch::new(
            format!("{} triangle: likely B/X/4, need C/Y/5", degree),
            Confidence::Low,
        ));
    };

    // 5-3-5 then a triangle: wave 4 triangle, W5 measured off W1
    if seq.is(&[5, 3, 5, 5]) && entries[0].kind.is_motive() {
        let w5 = extend_leg(
            WaveRole::W5,
            entries[0],
            triangle.end_price,
            format!("{} W1 range", degree),
            ProjectionVariant::Standard,
        )?;
        return Some(
            CatalogMatch::new(
                format!(
                    "{} W4 triangle after W1-W3: expect the W5 thrust {}",
                    degree, w5.direction
                ),
                Confidence::High,
            )
            .with([w5]),
        );
    }

    if prev.kind == PatternKind::Triangle {
        return None;
    }

    if prev.wave_count() == 5 {
        let c = extend_leg(
            WaveRole::C,
            prev,
            triangle.end_price,
            format!("{} A range", degree),
            ProjectionVariant::Standard,
        )?;
        Some(
            CatalogMatch::new(
                format!("{} A then B-triangle: need C wave {}", degree, c.direction),
                Confidence::Medium,
            )
            .with([c]),
        )
    } else {
        let y = extend_leg(
            WaveRole::Y,
            prev,
            triangle.end_price,
            format!("{} W range", degree),
            ProjectionVariant::Standard,
        )?;
        Some(
            CatalogMatch::new(
                format!("{} W then X-triangle: need Y wave {} (WXY)", degree, y.direction),
                Confidence::Medium,
            )
            .with([y]),
        )
    }
}
