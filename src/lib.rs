#![allow(clippy::const_is_empty)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod utils;

// Re-export the engine surface used by hosts (drawing tool, analyze binary)
pub use analysis::{
    FibCalculator, ProjectionRequest, analyze_instruments, analyze_stack, analyze_stack_with,
    classify_archetype, group_structures,
};
pub use domain::{DegreeHierarchy, Direction, PatternKind, WaveEntry};
pub use models::{GroupedStructure, ProjectionContext, WaveStackSuggestion};

// CLI argument parsing
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON array of wave entries exported from the chart
    #[arg(short, long)]
    pub input: PathBuf,

    /// Emit structures and suggestion as JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Only show grouped structures of this degree
    #[arg(long)]
    pub degree: Option<String>,
}
