use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Outcome, OutcomeRecord, TeamWeek};

/// One cell of the dense grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell<'a> {
    pub team: &'a str,
    pub week: u32,
}

/// A grid cell after the join. Byes have zero wins and zero losses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyTally<'a> {
    pub team: &'a str,
    pub week: u32,
    pub wins: u32,
    pub losses: u32,
}

/// Turns outcome records into a gap-free weekly series per team. Each stage
/// takes its input by reference and returns a new collection: team set and
/// week range, dense grid, left join against outcome tallies, then running
/// totals with the week 0 baseline.
pub struct DifferentialBuilder;

impl DifferentialBuilder {
    pub fn build(outcomes: &[OutcomeRecord]) -> Vec<TeamWeek> {
        let teams = team_set(outcomes);
        let Some(max_week) = max_week(outcomes) else {
            return Vec::new();
        };

        let grid = dense_grid(&teams, 1..=max_week);
        let joined = left_join(&grid, &tally_outcomes(outcomes));
        let series = accumulate(&teams, &joined);

        tracing::debug!(
            "Built {} team-week rows for {} teams through week {}",
            series.len(),
            teams.len(),
            max_week
        );
        series
    }
}

/// Distinct team names, sorted.
pub fn team_set(outcomes: &[OutcomeRecord]) -> BTreeSet<&str> {
    outcomes.iter().map(|o| o.team.as_str()).collect()
}

pub fn max_week(outcomes: &[OutcomeRecord]) -> Option<u32> {
    outcomes.iter().map(|o| o.week).max()
}

pub fn dense_grid<'a, I>(teams: &BTreeSet<&'a str>, weeks: I) -> Vec<GridCell<'a>>
where
    I: IntoIterator<Item = u32> + Clone,
{
    teams
        .iter()
        .flat_map(|&team| weeks.clone().into_iter().map(move |week| GridCell { team, week }))
        .collect()
}

/// Group-by (team, week) counting wins and losses.
pub fn tally_outcomes(outcomes: &[OutcomeRecord]) -> BTreeMap<(&str, u32), (u32, u32)> {
    let mut tallies: BTreeMap<(&str, u32), (u32, u32)> = BTreeMap::new();
    for o in outcomes {
        let entry = tallies.entry((o.team.as_str(), o.week)).or_default();
        match o.outcome {
            Outcome::Win => entry.0 += 1,
            Outcome::Loss => entry.1 += 1,
        }
    }
    tallies
}

pub fn left_join<'a>(
    grid: &[GridCell<'a>],
    tallies: &BTreeMap<(&str, u32), (u32, u32)>,
) -> Vec<WeeklyTally<'a>> {
    grid.iter()
        .map(|cell| {
            let (wins, losses) = tallies.get(&(cell.team, cell.week)).copied().unwrap_or((0, 0));
            WeeklyTally {
                team: cell.team,
                week: cell.week,
                wins,
                losses,
            }
        })
        .collect()
}

/// Running totals per team, each series prefixed with the week 0 baseline.
pub fn accumulate(teams: &BTreeSet<&str>, joined: &[WeeklyTally<'_>]) -> Vec<TeamWeek> {
    let mut by_team: BTreeMap<&str, Vec<&WeeklyTally<'_>>> =
        teams.iter().map(|&t| (t, Vec::new())).collect();
    for row in joined {
        by_team.entry(row.team).or_default().push(row);
    }

    let mut series = Vec::with_capacity(joined.len() + teams.len());
    for (team, mut rows) in by_team {
        rows.sort_by_key(|r| r.week);

        series.push(TeamWeek::baseline(team));
        let (mut wins, mut losses) = (0u32, 0u32);
        for row in rows {
            wins += row.wins;
            losses += row.losses;
            series.push(TeamWeek {
                team: team.to_string(),
                week: row.week,
                wins,
                losses,
                differential: wins as i32 - losses as i32,
            });
        }
    }
    series
}
