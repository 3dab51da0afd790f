use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// The nine Elliott degrees, coarsest first. Declaration order IS the hierarchy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum Degree {
    #[strum(serialize = "Grand Supercycle")]
    #[serde(rename = "Grand Supercycle")]
    GrandSupercycle,
    Supercycle,
    Cycle,
    Primary,
    Intermediate,
    Minor,
    Minute,
    Minuette,
    Subminuette,
}

/// Ordered list of degree names used for every "higher vs lower" comparison.
/// Comparisons are positional against this list, never inferred from the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeHierarchy {
    names: Vec<String>,
}

impl DegreeHierarchy {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The standard nine-degree Elliott catalog.
    pub fn elliott() -> Self {
        Self::new(Degree::iter().map(|d| d.to_string()))
    }

    #[inline]
    pub fn index_of(&self, degree: &str) -> Option<usize> {
        self.names.iter().position(|n| n == degree)
    }

    #[inline]
    pub fn name(&self, idx: usize) -> Option<&str> {
        self.names.get(idx).map(String::as_str)
    }

    /// True if `a` is strictly coarser than `b`. Unknown names are never coarser.
    pub fn is_coarser(&self, a: &str, b: &str) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(ia), Some(ib)) => ia < ib,
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for DegreeHierarchy {
    fn default() -> Self {
        Self::elliott()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn elliott_catalog_has_nine_degrees_coarsest_first() {
        let h = DegreeHierarchy::elliott();
        assert_eq!(h.len(), 9);
        assert_eq!(h.name(0), Some("Grand Supercycle"));
        assert_eq!(h.name(8), Some("Subminuette"));
        assert_eq!(h.index_of("Minor"), Some(5));
    }

    #[test]
    fn coarser_is_positional() {
        let h = DegreeHierarchy::default();
        assert!(h.is_coarser("Primary", "Minor"));
        assert!(!h.is_coarser("Minute", "Minor"));
        assert!(!h.is_coarser("Bogus", "Minor"));
        assert!(!h.is_coarser("Minor", "Minor"));
    }

    #[test]
    fn degree_parses_from_display_name() {
        assert_eq!(Degree::from_str("Grand Supercycle").ok(), Some(Degree::GrandSupercycle));
        assert_eq!(Degree::Minuette.to_string(), "Minuette");
    }
}
