use std::fmt;
use std::str::FromStr;

use anyhow::{Context, bail};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::domain::WaveEntry;

/// Wave counts of consecutive patterns, displayed hyphen-joined ("5-3-5").
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct WaveSequence(Vec<u8>);

impl WaveSequence {
    pub fn new(counts: Vec<u8>) -> Self {
        Self(counts)
    }

    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a WaveEntry>,
    {
        Self(entries.into_iter().map(WaveEntry::wave_count).collect())
    }

    #[inline]
    pub fn counts(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn is(&self, counts: &[u8]) -> bool {
        self.0 == counts
    }

    #[inline]
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.0.starts_with(prefix)
    }

    #[inline]
    pub fn last(&self) -> Option<u8> {
        self.0.last().copied()
    }

    /// Sequence of the waves from `start` onwards.
    pub fn tail(&self, start: usize) -> Self {
        Self(self.0.get(start..).map(<[u8]>::to_vec).unwrap_or_default())
    }
}

impl fmt::Display for WaveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join("-"))
    }
}

impl FromStr for WaveSequence {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::default());
        }
        let counts = s
            .split('-')
            .map(|part| {
                part.trim()
                    .parse::<u8>()
                    .with_context(|| format!("Invalid wave count '{}' in sequence '{}'", part, s))
            })
            .collect::<anyhow::Result<Vec<u8>>>()?;
        if let Some(bad) = counts.iter().find(|&&c| c != 3 && c != 5) {
            bail!("Wave counts must be 3 or 5, got {} in '{}'", bad, s);
        }
        Ok(Self(counts))
    }
}

impl From<WaveSequence> for String {
    fn from(seq: WaveSequence) -> Self {
        seq.to_string()
    }
}

impl TryFrom<String> for WaveSequence {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_with_hyphen() {
        assert_eq!(WaveSequence::new(vec![5, 3, 5]).to_string(), "5-3-5");
        assert_eq!(WaveSequence::default().to_string(), "");
    }

    #[test]
    fn parses_and_rejects_bad_counts() {
        let seq: WaveSequence = "5-3-5-3".parse().unwrap();
        assert!(seq.is(&[5, 3, 5, 3]));
        assert!("5-4".parse::<WaveSequence>().is_err());
        assert!("5-x".parse::<WaveSequence>().is_err());
    }

    #[test]
    fn tail_past_end_is_empty() {
        let seq = WaveSequence::new(vec![5, 3]);
        assert!(seq.tail(1).is(&[3]));
        assert!(seq.tail(5).is_empty());
    }
}
