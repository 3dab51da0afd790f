use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Sub-pattern kind chosen when the wave was labeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PatternKind {
    Impulse,
    Diagonal,
    /// Zigzag style A-B-C.
    #[serde(alias = "zigzag")]
    Correction,
    Flat,
    Triangle,
}

impl PatternKind {
    /// Number of waves the kind implies: 5 for motive waves and triangles, 3 for corrections.
    #[inline]
    pub fn wave_count(self) -> u8 {
        match self {
            Self::Impulse | Self::Diagonal | Self::Triangle => 5,
            Self::Correction | Self::Flat => 3,
        }
    }

    #[inline]
    pub fn is_motive(self) -> bool {
        matches!(self, Self::Impulse | Self::Diagonal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Up if the price did not fall. Flat moves count as up.
    #[inline]
    pub fn from_prices(start: f64, end: f64) -> Self {
        if end >= start { Self::Up } else { Self::Down }
    }

    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Self::Up => 1.0,
            Self::Down => -1.0,
        }
    }

    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    pub fn bias_label(self) -> &'static str {
        match self {
            Self::Up => "bullish",
            Self::Down => "bearish",
        }
    }
}

/// One completed, user-confirmed wave label. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveEntry {
    pub id: String,
    /// Chart timeframe the pattern was drawn on, e.g. "4h".
    pub timeframe: String,
    pub degree: String,
    pub kind: PatternKind,
    pub start_price: f64,
    pub end_price: f64,
    pub start_ts: i64,
    pub end_ts: i64,
}

impl WaveEntry {
    #[inline]
    pub fn wave_count(&self) -> u8 {
        self.kind.wave_count()
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        Direction::from_prices(self.start_price, self.end_price)
    }

    /// Absolute price distance covered.
    #[inline]
    pub fn length(&self) -> f64 {
        (self.end_price - self.start_price).abs()
    }

    #[inline]
    pub fn duration_ms(&self) -> i64 {
        self.end_ts - self.start_ts
    }

    /// Checks the invariants the drawing tool is expected to uphold.
    pub fn validate(&self) -> Result<()> {
        for (name, price) in [("start_price", self.start_price), ("end_price", self.end_price)] {
            if !price.is_finite() || price <= 0.0 {
                bail!("Entry {}: {} must be a positive price (got {})", self.id, name, price);
            }
        }
        if self.end_ts < self.start_ts {
            bail!(
                "Entry {}: end_ts {} is before start_ts {}",
                self.id,
                self.end_ts,
                self.start_ts
            );
        }
        Ok(())
    }
}
