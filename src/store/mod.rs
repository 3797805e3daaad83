pub mod seed;
pub use seed::{nfl_teams, TeamDirectory};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use crate::models::{TeamInfo, TeamWeek};

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Column names of a persisted record type, in field order.
pub trait CsvRecord: Serialize {
    const HEADERS: &'static [&'static str];
}

impl CsvRecord for TeamWeek {
    const HEADERS: &'static [&'static str] = &["team", "week", "wins", "losses", "differential"];
}

impl CsvRecord for TeamInfo {
    const HEADERS: &'static [&'static str] = &["abbreviation", "full_name", "conference", "division"];
}

fn write_records<T: CsvRecord>(path: &Path, records: &[T]) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("opening {} for writing", path.display()))?;
    // serialize() only emits the header alongside the first record.
    if records.is_empty() {
        writer.write_record(T::HEADERS)?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record.with_context(|| format!("reading {}", path.display()))?);
    }
    Ok(records)
}

/// Overwrites `path` with header `team,week,wins,losses,differential`.
pub fn write_differentials(path: &Path, rows: &[TeamWeek]) -> Result<()> {
    write_records(path, rows)?;
    tracing::info!("Wrote {} team-week rows to {}", rows.len(), path.display());
    Ok(())
}

pub fn read_differentials(path: &Path) -> Result<Vec<TeamWeek>> {
    read_records(path)
}

pub fn write_teams(path: &Path, teams: &[TeamInfo]) -> Result<()> {
    write_records(path, teams)?;
    tracing::info!("Wrote {} teams to {}", teams.len(), path.display());
    Ok(())
}

pub fn read_teams(path: &Path) -> Result<Vec<TeamInfo>> {
    read_records(path)
}

/// Reference teams from `path`, or the built-in list when the file is absent.
pub fn load_teams_or_default(path: &Path) -> Result<Vec<TeamInfo>> {
    if path.exists() {
        read_teams(path)
    } else {
        tracing::debug!("{} not found, using built-in team list", path.display());
        Ok(nfl_teams())
    }
}
