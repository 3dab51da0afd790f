// Output models handed to the presentation layer
mod archetype;
mod grouped_structure;
mod projection;
mod suggestion;

pub use archetype::{Archetype, ArchetypeLabel, ParentWave, XWaveKind};
pub use grouped_structure::{GroupedStructure, ValidityScore, ValidityTier};
pub use projection::{
    ProjectionContext, ProjectionKind, ProjectionLevel, ProjectionVariant, WaveRole,
};
pub use suggestion::{Confidence, SuggestionSource, WaveStackSuggestion};
