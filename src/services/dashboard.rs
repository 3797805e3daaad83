use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::{Conference, DashboardRow, Division, TeamWeek, UnmatchedTeam};
use crate::store::TeamDirectory;
use crate::utils::axis_limits;

#[derive(Debug, Clone, Serialize)]
pub struct Filters {
    pub conferences: Vec<Conference>,
    pub divisions: Vec<Division>,
    pub min_week: u32,
    pub max_week: u32,
}

/// Immutable, read-only view of one pipeline run joined with reference data.
#[derive(Debug, Clone)]
pub struct Dashboard {
    rows: Vec<DashboardRow>,
    unmatched: Vec<UnmatchedTeam>,
    y_limits: (i32, i32),
    max_week: u32,
}

impl Dashboard {
    pub fn new(series: &[TeamWeek], directory: &TeamDirectory) -> Self {
        let mut rows = Vec::with_capacity(series.len());
        let mut missing = BTreeSet::new();

        for tw in series {
            match directory.get(&tw.team) {
                Some(info) => rows.push(DashboardRow {
                    team: tw.team.clone(),
                    abbreviation: info.abbreviation.clone(),
                    conference: info.conference,
                    division: info.division,
                    week: tw.week,
                    wins: tw.wins,
                    losses: tw.losses,
                    differential: tw.differential,
                }),
                None => {
                    missing.insert(tw.team.as_str());
                }
            }
        }

        let unmatched: Vec<UnmatchedTeam> = missing
            .into_iter()
            .map(|team| {
                let suggestion = directory.suggest(team).map(str::to_string);
                match &suggestion {
                    Some(s) => tracing::warn!("No reference data for '{}' (did you mean '{}'?)", team, s),
                    None => tracing::warn!("No reference data for '{}'", team),
                }
                UnmatchedTeam {
                    team: team.to_string(),
                    suggestion,
                }
            })
            .collect();

        rows.sort_by(|a, b| (&a.team, a.week).cmp(&(&b.team, b.week)));

        Self {
            rows,
            unmatched,
            // Limits span the whole season, unmatched teams included.
            y_limits: axis_limits(series),
            max_week: series.iter().map(|r| r.week).max().unwrap_or(0),
        }
    }

    pub fn filters(&self) -> Filters {
        Filters {
            conferences: Conference::ALL.to_vec(),
            divisions: Division::ALL.to_vec(),
            min_week: self.max_week.min(1),
            max_week: self.max_week,
        }
    }

    pub fn max_week(&self) -> u32 {
        self.max_week
    }

    pub fn y_limits(&self) -> (i32, i32) {
        self.y_limits
    }

    pub fn unmatched(&self) -> &[UnmatchedTeam] {
        &self.unmatched
    }

    /// Every week for the teams of one division, ordered by team then week.
    pub fn series(&self, conference: Conference, division: Division) -> Vec<DashboardRow> {
        self.rows
            .iter()
            .filter(|r| r.conference == conference && r.division == division)
            .cloned()
            .collect()
    }

    /// One division at one week, best differential first.
    pub fn table(&self, conference: Conference, division: Division, week: u32) -> Vec<DashboardRow> {
        let mut rows: Vec<DashboardRow> = self
            .series(conference, division)
            .into_iter()
            .filter(|r| r.week == week)
            .collect();
        rows.sort_by(|a, b| b.differential.cmp(&a.differential).then_with(|| a.team.cmp(&b.team)));
        rows
    }

    /// Full series for one team, matched exactly or case-insensitively by name
    /// or abbreviation.
    pub fn team(&self, name: &str) -> Vec<DashboardRow> {
        let needle = name.trim().to_lowercase();
        self.rows
            .iter()
            .filter(|r| r.team.to_lowercase() == needle || r.abbreviation.to_lowercase() == needle)
            .cloned()
            .collect()
    }
}
