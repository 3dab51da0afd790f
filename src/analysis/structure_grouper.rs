use itertools::Itertools;

use crate::{
    analysis::{
        archetype_classifier::classify_sequence,
        degree_stack::{DegreeSlice, DegreeStack},
    },
    config::{ANALYSIS, DF},
    domain::{DegreeHierarchy, Direction, PatternKind, WaveEntry, WaveSequence},
    models::{Archetype, ArchetypeLabel, GroupedStructure, ParentWave, ValidityScore},
    utils::safe_ratio,
};

/// Partitions entries into grouped structures, coarsest degree first.
///
/// Each degree's entries are split by the waves of the immediately coarser degree: a child
/// belongs to the first parent wave whose [start, end] (widened by the grouping tolerance)
/// contains both its start and end time. Children that fit no parent wave form one
/// unannotated orphan group. A degree with no populated coarser neighbour forms a single group.
/// Entries with a degree outside the hierarchy are appended last, one group per degree name.
pub fn group_structures(entries: &[WaveEntry], hierarchy: &DegreeHierarchy) -> Vec<GroupedStructure> {
    let stack = DegreeStack::build(entries, hierarchy);
    let mut structures = Vec::new();

    for slice in &stack.slices {
        let parent_slice = slice.index.checked_sub(1).and_then(|idx| stack.at(idx));

        match parent_slice {
            None => structures.extend(build_structure(&slice.degree, slice.entries.clone(), None)),
            Some(parent) => structures.extend(group_under_parent(slice, parent)),
        }
    }

    for degree in stack.unplaced.iter().map(|e| e.degree.as_str()).unique() {
        let members = stack
            .unplaced
            .iter()
            .copied()
            .filter(|e| e.degree == degree)
            .collect();
        structures.extend(build_structure(degree, members, None));
    }

    structures
}

fn group_under_parent(slice: &DegreeSlice<'_>, parent: &DegreeSlice<'_>) -> Vec<GroupedStructure> {
    let parent_archetype = parent.archetype();
    let mut assigned: Vec<Vec<&WaveEntry>> = vec![Vec::new(); parent.entries.len()];
    let mut orphans = Vec::new();

    for &child in &slice.entries {
        match parent.entries.iter().position(|p| contains(p, child)) {
            Some(idx) => assigned[idx].push(child),
            None => orphans.push(child),
        }
    }

    if DF.log_grouping {
        log::debug!(
            "group_under_parent(): {} ({} entries) under {} ({}): {} parent waves matched, {} orphans",
            slice.degree,
            slice.entries.len(),
            parent.degree,
            parent_archetype,
            assigned.iter().filter(|g| !g.is_empty()).count(),
            orphans.len()
        );
    }

    let mut structures: Vec<GroupedStructure> = assigned
        .into_iter()
        .enumerate()
        .filter(|(_, members)| !members.is_empty())
        .filter_map(|(wave_index, members)| {
            let parent_wave = ParentWave {
                degree: parent.degree.clone(),
                archetype: parent_archetype.clone(),
                wave_index,
            };
            build_structure(&slice.degree, members, Some(parent_wave))
        })
        .collect();

    structures.extend(build_structure(&slice.degree, orphans, None));
    structures
}

/// Both ends of `child` inside `parent`'s span widened by the tolerance on each side.
fn contains(parent: &WaveEntry, child: &WaveEntry) -> bool {
    let lo = parent.start_ts.min(parent.end_ts);
    let hi = parent.start_ts.max(parent.end_ts);
    let tolerance = ((hi - lo) as f64 * ANALYSIS.grouping.parent_span_tolerance_pct).round() as i64;

    let (lo, hi) = (lo - tolerance, hi + tolerance);
    let in_span = |ts: i64| ts >= lo && ts <= hi;
    in_span(child.start_ts) && in_span(child.end_ts)
}

/// None for an empty member list. `members` must already be time ordered.
fn build_structure(
    degree: &str,
    members: Vec<&WaveEntry>,
    parent: Option<ParentWave>,
) -> Option<GroupedStructure> {
    let (first, last) = (*members.first()?, *members.last()?);

    let sequence = WaveSequence::from_entries(members.iter().copied());
    let kinds: Vec<PatternKind> = members.iter().map(|e| e.kind).collect();
    let archetype = classify_sequence(&sequence, &kinds);
    let validity = score_structure(&archetype, &members);

    let label = ArchetypeLabel {
        archetype,
        parent_role: parent.as_ref().map(ParentWave::role),
    };

    Some(GroupedStructure {
        degree: degree.to_string(),
        label,
        sequence,
        parent,
        start_price: first.start_price,
        end_price: last.end_price,
        start_ts: first.start_ts,
        end_ts: last.end_ts,
        tier: validity.tier(),
        validity,
        direction: Direction::from_prices(first.start_price, last.end_price),
        entries: members.into_iter().cloned().collect(),
    })
}

/// Internal consistency of a group, clamped to [0, 100].
pub fn score_structure(archetype: &Archetype, members: &[&WaveEntry]) -> ValidityScore {
    let s = &ANALYSIS.scoring;
    let mut score = s.base_score;

    if archetype.is_well_formed() {
        score += s.well_formed_bonus;
    }

    if archetype.is_wxy() {
        if let (Some(w), Some(y)) = (members.first(), members.get(2)) {
            let (w_len, y_len) = (w.length(), y.length());
            // smaller over larger so the ratio never exceeds 1
            if let Some(ratio) = safe_ratio(w_len.min(y_len), w_len.max(y_len)) {
                score += if ratio >= s.wxy_golden_ratio {
                    s.wxy_golden_bonus
                } else if ratio >= s.wxy_secondary_ratio {
                    s.wxy_secondary_bonus
                } else {
                    s.wxy_weak_bonus
                };
            }
        }
    }

    if matches!(archetype, Archetype::Zigzag | Archetype::Impulse) && alternates(members) {
        score += s.alternation_bonus;
    }

    if members.len() >= 3 {
        score += s.min_entries_bonus_3;
    }
    if members.len() >= 5 {
        score += s.min_entries_bonus_5;
    }

    ValidityScore::new(score)
}

fn alternates(members: &[&WaveEntry]) -> bool {
    members.len() >= 2
        && members
            .iter()
            .tuple_windows()
            .all(|(a, b)| a.direction() != b.direction())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidityTier;

    const DAY: i64 = 86_400_000;

    fn entry(id: &str, degree: &str, kind: PatternKind, prices: (f64, f64), days: (i64, i64)) -> WaveEntry {
        WaveEntry {
            id: id.to_string(),
            timeframe: "1d".to_string(),
            degree: degree.to_string(),
            kind,
            start_price: prices.0,
            end_price: prices.1,
            start_ts: days.0 * DAY,
            end_ts: days.1 * DAY,
        }
    }

    fn impulse_up() -> Vec<WaveEntry> {
        vec![
            entry("1", "Minor", PatternKind::Impulse, (100.0, 120.0), (0, 10)),
            entry("2", "Minor", PatternKind::Correction, (120.0, 110.0), (10, 15)),
            entry("3", "Minor", PatternKind::Impulse, (110.0, 150.0), (15, 30)),
            entry("4", "Minor", PatternKind::Flat, (150.0, 140.0), (30, 36)),
            entry("5", "Minor", PatternKind::Impulse, (140.0, 165.0), (36, 50)),
        ]
    }

    #[test]
    fn empty_input_gives_no_structures() {
        assert!(group_structures(&[], &DegreeHierarchy::elliott()).is_empty());
    }

    #[test]
    fn single_degree_is_one_structure_in_time_order() {
        let mut entries = impulse_up();
        entries.reverse();
        let out = group_structures(&entries, &DegreeHierarchy::elliott());

        assert_eq!(out.len(), 1);
        let s = &out[0];
        assert_eq!(s.label.archetype, Archetype::Impulse);
        assert_eq!(s.sequence.to_string(), "5-3-5-3-5");
        let ids: Vec<&str> = s.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5"]);
        assert_eq!(s.start_price, 100.0);
        assert_eq!(s.end_price, 165.0);
        assert_eq!(s.direction, Direction::Up);
        // 50 + 20 well formed + 15 alternation + 5 + 5
        assert_eq!(s.validity.value(), 95.0);
        assert_eq!(s.tier, ValidityTier::Excellent);
        assert!(s.parent.is_none());
    }

    #[test]
    fn children_nest_under_parent_waves_with_tolerance() {
        let mut entries = vec![
            entry("P1", "Minor", PatternKind::Impulse, (100.0, 200.0), (0, 100)),
            entry("P2", "Minor", PatternKind::Correction, (200.0, 150.0), (100, 160)),
        ];
        // Inside P1
        entries.push(entry("c1", "Minute", PatternKind::Impulse, (100.0, 130.0), (0, 30)));
        entries.push(entry("c2", "Minute", PatternKind::Correction, (130.0, 115.0), (30, 45)));
        entries.push(entry("c3", "Minute", PatternKind::Impulse, (115.0, 180.0), (45, 75)));
        entries.push(entry("c4", "Minute", PatternKind::Correction, (180.0, 170.0), (75, 85)));
        // Ends 4 days past P1, within its 5-day tolerance
        entries.push(entry("c5", "Minute", PatternKind::Impulse, (170.0, 200.0), (85, 104)));
        // Inside P2
        entries.push(entry("c6", "Minute", PatternKind::Impulse, (200.0, 170.0), (110, 130)));
        // Way after everything: orphan
        entries.push(entry("c7", "Minute", PatternKind::Correction, (150.0, 160.0), (300, 320)));

        let out = group_structures(&entries, &DegreeHierarchy::elliott());
        let labels: Vec<String> = out.iter().map(|s| s.label.to_string()).collect();
        assert_eq!(
            labels,
            [
                "W1-W2 / A-B",
                "Impulse = Minor 1/A",
                "W1/A = Minor 2/B",
                "Correction"
            ]
        );
        assert_eq!(out[1].parent.as_ref().map(|p| p.wave_index), Some(0));
        assert!(out[3].is_orphan_group());

        // no loss, no duplication
        let mut ids: Vec<&str> = out.iter().flat_map(|s| s.entries.iter().map(|e| e.id.as_str())).collect();
        ids.sort();
        let mut expected: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn empty_coarser_neighbour_means_single_group() {
        // Primary is two levels above Minute; Intermediate and Minor are empty
        let entries = vec![
            entry("P", "Primary", PatternKind::Impulse, (100.0, 200.0), (0, 100)),
            entry("m1", "Minute", PatternKind::Impulse, (100.0, 120.0), (0, 5)),
            entry("m2", "Minute", PatternKind::Correction, (120.0, 110.0), (5, 8)),
        ];
        let out = group_structures(&entries, &DegreeHierarchy::elliott());
        assert_eq!(out.len(), 2);
        assert!(out[1].parent.is_none());
        assert_eq!(out[1].entries.len(), 2);
    }

    #[test]
    fn unknown_degrees_are_kept_as_their_own_groups() {
        let entries = vec![
            entry("a", "Minor", PatternKind::Impulse, (100.0, 120.0), (0, 5)),
            entry("b", "Mystery", PatternKind::Correction, (120.0, 110.0), (5, 8)),
        ];
        let out = group_structures(&entries, &DegreeHierarchy::elliott());
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].degree, "Mystery");
    }

    #[test]
    fn wxy_with_balanced_legs_scores_high() {
        let entries = vec![
            entry("w", "Minor", PatternKind::Correction, (150.0, 130.0), (0, 10)),
            entry("x", "Minor", PatternKind::Correction, (130.0, 140.0), (10, 15)),
            entry("y", "Minor", PatternKind::Correction, (140.0, 118.0), (15, 25)),
        ];
        let out = group_structures(&entries, &DegreeHierarchy::elliott());
        assert_eq!(out[0].label.archetype, Archetype::Wxy { x: None });
        // 50 + 20 + 15 (20/22 >= 0.618) + 5
        assert_eq!(out[0].validity.value(), 90.0);
    }

    #[test]
    fn wxy_with_zero_length_leg_skips_ratio_bonus() {
        let w = entry("w", "Minor", PatternKind::Correction, (150.0, 150.0), (0, 10));
        let x = entry("x", "Minor", PatternKind::Correction, (150.0, 140.0), (10, 15));
        let y = entry("y", "Minor", PatternKind::Correction, (140.0, 140.0), (15, 25));
        let score = score_structure(&Archetype::Wxy { x: None }, &[&w, &x, &y]);
        assert_eq!(score.value(), 75.0);
    }

    #[test]
    fn score_stays_in_range_for_degenerate_groups() {
        let single = entry("a", "Minor", PatternKind::Impulse, (100.0, 120.0), (0, 5));
        for archetype in [
            Archetype::Impulse,
            Archetype::Wxy { x: None },
            Archetype::Unrecognized("5-5".into()),
        ] {
            for members in [vec![], vec![&single]] {
                let v = score_structure(&archetype, &members).value();
                assert!((0.0..=100.0).contains(&v));
            }
        }
    }
}
