use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use wave_stack::{
    Cli, GroupedStructure, WaveStackSuggestion, analyze_stack, data::load_entries,
    group_structures, domain::DegreeHierarchy, utils::epoch_ms_to_utc,
};

#[derive(Tabled)]
struct StructureRow {
    #[tabled(rename = "Degree")]
    degree: String,
    #[tabled(rename = "Structure")]
    label: String,
    #[tabled(rename = "Seq")]
    sequence: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Move")]
    pct_move: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Dir")]
    direction: String,
}

impl From<&GroupedStructure> for StructureRow {
    fn from(g: &GroupedStructure) -> Self {
        Self {
            degree: g.degree.clone(),
            label: g.label.to_string(),
            sequence: g.sequence.to_string(),
            start: format!("{} @ {:.4}", epoch_ms_to_utc(g.start_ts), g.start_price),
            end: format!("{} @ {:.4}", epoch_ms_to_utc(g.end_ts), g.end_price),
            pct_move: g
                .pct_move()
                .map(|p| format!("{:+.2}%", p))
                .unwrap_or_else(|| "-".to_string()),
            duration: g.duration_label(),
            score: format!("{} ({})", g.validity, g.tier),
            direction: g.direction.to_string(),
        }
    }
}

#[derive(Tabled)]
struct ProjectionRow {
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "From")]
    launch: String,
    #[tabled(rename = "Levels")]
    levels: String,
    #[tabled(rename = "Measured off")]
    source: String,
}

#[derive(Serialize)]
struct Report<'a> {
    structures: &'a [GroupedStructure],
    suggestion: &'a WaveStackSuggestion,
}

fn print_tables(structures: &[GroupedStructure], suggestion: &WaveStackSuggestion) {
    if structures.is_empty() {
        println!("No grouped structures.");
    } else {
        let rows: Vec<StructureRow> = structures.iter().map(StructureRow::from).collect();
        println!("{}", Table::new(rows).with(Style::rounded()));
    }

    println!();
    println!("[{}] {}", suggestion.confidence, suggestion.sequence);
    println!("{}", suggestion.message);

    if suggestion.projections.is_empty() {
        return;
    }
    let rows: Vec<ProjectionRow> = suggestion
        .projections
        .iter()
        .map(|p| ProjectionRow {
            role: p.role.to_string(),
            kind: format!("{} {}", p.kind, p.direction),
            launch: format!("{:.4}", p.launch_price),
            levels: p
                .levels
                .iter()
                .map(|l| format!("{} {:.4}", l.label, l.price))
                .collect::<Vec<_>>()
                .join("\n"),
            source: p.source.clone(),
        })
        .collect();
    println!("{}", Table::new(rows).with(Style::rounded()));
}

fn main() -> Result<()> {
    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Error, log::LevelFilter::Warn)
    };

    env_logger::Builder::new()
        .filter(None, global_level)
        .filter(Some("wave_stack"), my_code_level)
        .init();

    let args = Cli::parse();
    let entries = load_entries(&args.input)?;

    let mut structures = group_structures(&entries, &DegreeHierarchy::elliott());
    let suggestion = analyze_stack(&entries);

    if let Some(degree) = &args.degree {
        structures.retain(|g| g.degree.eq_ignore_ascii_case(degree));
        if structures.is_empty() {
            log::warn!("No structures at degree '{}'", degree);
        }
    }

    if args.json {
        let report = Report {
            structures: &structures,
            suggestion: &suggestion,
        };
        let out = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", out);
    } else {
        print_tables(&structures, &suggestion);
    }

    Ok(())
}
