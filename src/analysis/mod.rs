// Wave structure analysis: classification, grouping, projections and the stack cascade
pub mod archetype_classifier;
pub(crate) mod degree_stack;
pub mod fib_projection;
pub mod structure_grouper;
pub mod wave_stack;

pub use {
    archetype_classifier::{classify_archetype, classify_sequence},
    fib_projection::{FibCalculator, ProjectionRequest},
    structure_grouper::{group_structures, score_structure},
    wave_stack::{analyze_instruments, analyze_stack, analyze_stack_with},
};
