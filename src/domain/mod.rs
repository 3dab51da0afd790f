// Domain types and value objects
mod degree;
mod wave_entry;
mod wave_sequence;

// Re-export commonly used types to the world
pub use degree::{Degree, DegreeHierarchy};
pub use wave_entry::{Direction, PatternKind, WaveEntry};
pub use wave_sequence::WaveSequence;
