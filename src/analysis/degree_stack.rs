use std::cmp::Ordering;

use itertools::Itertools;

use crate::{
    analysis::archetype_classifier::classify_sequence,
    config::DF,
    domain::{DegreeHierarchy, Direction, PatternKind, WaveEntry, WaveSequence},
    models::Archetype,
};

/// Deterministic time order: start, then end, then id.
pub(crate) fn time_order(a: &WaveEntry, b: &WaveEntry) -> Ordering {
    a.start_ts
        .cmp(&b.start_ts)
        .then(a.end_ts.cmp(&b.end_ts))
        .then_with(|| a.id.cmp(&b.id))
}

/// All entries of one degree, time ordered.
#[derive(Debug, Clone)]
pub(crate) struct DegreeSlice<'a> {
    pub degree: String,
    /// Position in the hierarchy. Lower = coarser.
    pub index: usize,
    pub entries: Vec<&'a WaveEntry>,
    pub sequence: WaveSequence,
}

impl<'a> DegreeSlice<'a> {
    fn new(degree: String, index: usize, entries: Vec<&'a WaveEntry>) -> Self {
        let sequence = WaveSequence::from_entries(entries.iter().copied());
        Self {
            degree,
            index,
            entries,
            sequence,
        }
    }

    pub fn kinds(&self) -> Vec<PatternKind> {
        self.entries.iter().map(|e| e.kind).collect()
    }

    pub fn archetype(&self) -> Archetype {
        classify_sequence(&self.sequence, &self.kinds())
    }

    pub fn first(&self) -> Option<&'a WaveEntry> {
        self.entries.first().copied()
    }

    pub fn last(&self) -> Option<&'a WaveEntry> {
        self.entries.last().copied()
    }

    /// First start price to last end price. Falls back to the first entry's own direction
    /// when the two are equal.
    pub fn net_direction(&self) -> Option<Direction> {
        let (first, last) = (self.first()?, self.last()?);
        if (last.end_price - first.start_price).abs() <= f64::EPSILON {
            Some(first.direction())
        } else {
            Some(Direction::from_prices(first.start_price, last.end_price))
        }
    }

    /// e.g. "Minor 5-3"
    pub fn describe(&self) -> String {
        format!("{} {}", self.degree, self.sequence)
    }
}

/// Entries bucketed by degree in hierarchy order (coarsest first). Only populated degrees are
/// kept. Entries whose degree is not in the hierarchy are set aside in `unplaced`.
#[derive(Debug, Clone)]
pub(crate) struct DegreeStack<'a> {
    pub slices: Vec<DegreeSlice<'a>>,
    pub unplaced: Vec<&'a WaveEntry>,
}

impl<'a> DegreeStack<'a> {
    pub fn build(entries: &'a [WaveEntry], hierarchy: &DegreeHierarchy) -> Self {
        let mut buckets: Vec<Vec<&'a WaveEntry>> = vec![Vec::new(); hierarchy.len()];
        let mut unplaced = Vec::new();

        for entry in entries {
            match hierarchy.index_of(&entry.degree) {
                Some(idx) => buckets[idx].push(entry),
                None => {
                    if DF.log_unknown_degrees {
                        log::warn!(
                            "Entry {} has degree '{}' which is not in the hierarchy. Skipped for cross-degree analysis.",
                            entry.id,
                            entry.degree
                        );
                    }
                    unplaced.push(entry);
                }
            }
        }

        let slices = buckets
            .into_iter()
            .enumerate()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(idx, bucket)| {
                let sorted = bucket.into_iter().sorted_by(|a, b| time_order(a, b)).collect();
                let name = hierarchy.name(idx).unwrap_or_default().to_string();
                DegreeSlice::new(name, idx, sorted)
            })
            .collect();

        unplaced.sort_by(|a, b| time_order(a, b));

        Self { slices, unplaced }
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Populated slice at a hierarchy position.
    pub fn at(&self, index: usize) -> Option<&DegreeSlice<'a>> {
        self.slices.iter().find(|s| s.index == index)
    }

    pub fn coarsest(&self) -> Option<&DegreeSlice<'a>> {
        self.slices.first()
    }

    /// Populated (coarser, finer) pairs that are adjacent in the hierarchy, coarsest first.
    pub fn adjacent_pairs(&self) -> impl Iterator<Item = (&DegreeSlice<'a>, &DegreeSlice<'a>)> {
        self.slices
            .iter()
            .tuple_windows()
            .filter(|(coarser, finer)| finer.index == coarser.index + 1)
    }

    /// "Primary 5-3-5-3-5 > Intermediate 5-3"
    pub fn describe(&self) -> String {
        self.slices.iter().map(DegreeSlice::describe).join(" > ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, degree: &str, kind: PatternKind, start_ts: i64) -> WaveEntry {
        WaveEntry {
            id: id.to_string(),
            timeframe: "1d".to_string(),
            degree: degree.to_string(),
            kind,
            start_price: 100.0,
            end_price: 110.0,
            start_ts,
            end_ts: start_ts + 10,
        }
    }

    #[test]
    fn buckets_in_hierarchy_order_and_time_sorts() {
        let entries = vec![
            entry("b", "Minute", PatternKind::Correction, 50),
            entry("a", "Minute", PatternKind::Impulse, 0),
            entry("c", "Minor", PatternKind::Impulse, 0),
            entry("x", "Nonsense", PatternKind::Impulse, 0),
        ];
        let stack = DegreeStack::build(&entries, &DegreeHierarchy::elliott());

        assert_eq!(stack.slices.len(), 2);
        assert_eq!(stack.slices[0].degree, "Minor");
        assert_eq!(stack.slices[1].sequence.to_string(), "5-3");
        assert_eq!(stack.slices[1].entries[0].id, "a");
        assert_eq!(stack.unplaced.len(), 1);
        assert_eq!(stack.adjacent_pairs().count(), 1);
        assert_eq!(stack.describe(), "Minor 5 > Minute 5-3");
    }

    #[test]
    fn non_adjacent_degrees_do_not_pair() {
        let entries = vec![
            entry("a", "Primary", PatternKind::Impulse, 0),
            entry("b", "Minor", PatternKind::Impulse, 0),
        ];
        let stack = DegreeStack::build(&entries, &DegreeHierarchy::elliott());
        assert_eq!(stack.adjacent_pairs().count(), 0);
    }
}
