use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of X wave that disambiguates a WXY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum XWaveKind {
    Triangle,
    Diagonal,
}

/// Recognized overall shape of a structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Impulse,
    Zigzag,
    Flat,
    /// 3-3-5 whose B wave is a triangle.
    FlatTriangleB,
    Wxy { x: Option<XWaveKind> },
    Wxyxz,
    Triangle,
    Diagonal,
    /// "5-3": wave 1-2 of an impulse or A-B of a zigzag.
    ImpulseStart,
    /// "3-3": W-X of a combination or A-B of a flat.
    WaveWX,
    /// Lone motive wave, role unresolved.
    SingleMotive,
    /// Lone corrective wave, role unresolved.
    SingleCorrection,
    /// Raw sequence that matched nothing.
    Unrecognized(String),
}

impl Archetype {
    pub fn is_well_formed(&self) -> bool {
        matches!(
            self,
            Self::Impulse
                | Self::Zigzag
                | Self::Flat
                | Self::Wxy { .. }
                | Self::Wxyxz
                | Self::ImpulseStart
        )
    }

    /// Structures that need no further wave to be finished.
    pub fn is_complete(&self) -> bool {
        matches!(
            self,
            Self::Impulse
                | Self::Zigzag
                | Self::Flat
                | Self::FlatTriangleB
                | Self::Wxy { .. }
                | Self::Wxyxz
                | Self::Triangle
                | Self::Diagonal
        )
    }

    #[inline]
    pub fn is_wxy(&self) -> bool {
        matches!(self, Self::Wxy { .. })
    }

    /// Label of the `idx`-th wave (0-based) when this archetype is the parent structure.
    /// Unresolved archetypes give dual labels; anything out of range falls back to its ordinal.
    pub fn wave_label(&self, idx: usize) -> String {
        let labels: &[&str] = match self {
            Self::Impulse | Self::Diagonal => &["1", "2", "3", "4", "5"],
            Self::Zigzag | Self::Flat | Self::FlatTriangleB => &["A", "B", "C"],
            Self::Wxy { .. } => &["W", "X", "Y"],
            Self::Wxyxz => &["W", "X", "Y", "X2", "Z"],
            Self::Triangle => &["A", "B", "C", "D", "E"],
            Self::ImpulseStart => &["1/A", "2/B"],
            Self::WaveWX => &["A/W", "B/X"],
            Self::SingleMotive => &["1/A"],
            Self::SingleCorrection => &["A/W"],
            Self::Unrecognized(_) => &[],
        };
        labels
            .get(idx)
            .map(|l| l.to_string())
            .unwrap_or_else(|| (idx + 1).to_string())
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Impulse => write!(f, "Impulse"),
            Self::Zigzag => write!(f, "Zigzag"),
            Self::Flat => write!(f, "Flat"),
            Self::FlatTriangleB => write!(f, "ABC w/ B-tri"),
            Self::Wxy { x: None } => write!(f, "WXY"),
            Self::Wxy {
                x: Some(XWaveKind::Triangle),
            } => write!(f, "WXY (X=tri)"),
            Self::Wxy {
                x: Some(XWaveKind::Diagonal),
            } => write!(f, "WXY (X=diag)"),
            Self::Wxyxz => write!(f, "WXYXZ"),
            Self::Triangle => write!(f, "Triangle"),
            Self::Diagonal => write!(f, "Diagonal"),
            Self::ImpulseStart => write!(f, "W1-W2 / A-B"),
            Self::WaveWX => write!(f, "W-X"),
            Self::SingleMotive => write!(f, "W1/A"),
            Self::SingleCorrection => write!(f, "Correction"),
            Self::Unrecognized(raw) => write!(f, "{}", raw),
        }
    }
}

/// The wave of a coarser structure that a child group sits inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentWave {
    pub degree: String,
    pub archetype: Archetype,
    /// 0-based position of the wave within the parent sequence.
    pub wave_index: usize,
}

impl ParentWave {
    /// e.g. "Minor A"
    pub fn role(&self) -> String {
        format!("{} {}", self.degree, self.archetype.wave_label(self.wave_index))
    }
}

/// Archetype plus the optional parent role it was resolved against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeLabel {
    pub archetype: Archetype,
    pub parent_role: Option<String>,
}

impl fmt::Display for ArchetypeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parent_role {
            Some(role) => write!(f, "{} = {}", self.archetype, role),
            None => write!(f, "{}", self.archetype),
        }
    }
}
