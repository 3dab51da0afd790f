use {
    crate::domain::WaveEntry,
    anyhow::{Context, Result},
    std::{fs::File, io::BufReader, path::Path},
};

/// Reads a JSON array of entries and rejects the snapshot if any entry is malformed.
pub fn load_entries(path: &Path) -> Result<Vec<WaveEntry>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open entry snapshot {}", path.display()))?;
    let entries: Vec<WaveEntry> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse entry snapshot {}", path.display()))?;
    check(entries)
}

pub fn parse_entries(json: &str) -> Result<Vec<WaveEntry>> {
    let entries: Vec<WaveEntry> =
        serde_json::from_str(json).context("Failed to parse entry snapshot")?;
    check(entries)
}

fn check(entries: Vec<WaveEntry>) -> Result<Vec<WaveEntry>> {
    for entry in &entries {
        entry.validate()?;
    }
    log::info!("Loaded {} wave entries", entries.len());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PatternKind;

    const SNAPSHOT: &str = r#"[
        {"id": "w1", "timeframe": "4h", "degree": "Minor", "kind": "impulse",
         "start_price": 100.0, "end_price": 120.0, "start_ts": 0, "end_ts": 3600000},
        {"id": "w2", "timeframe": "4h", "degree": "Minor", "kind": "zigzag",
         "start_price": 120.0, "end_price": 110.0, "start_ts": 3600000, "end_ts": 7200000}
    ]"#;

    #[test]
    fn parses_a_snapshot() {
        let entries = parse_entries(SNAPSHOT).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].kind, PatternKind::Correction);
    }

    #[test]
    fn rejects_non_positive_prices() {
        let bad = SNAPSHOT.replace("\"end_price\": 110.0", "\"end_price\": 0.0");
        let err = parse_entries(&bad).unwrap_err();
        assert!(err.to_string().contains("w2"));
    }

    #[test]
    fn missing_file_has_context() {
        let err = load_entries(Path::new("/nonexistent/entries.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to open entry snapshot"));
    }
}
