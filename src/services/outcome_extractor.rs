use std::collections::HashSet;

use crate::error::{PipelineError, Result};
use crate::models::{GameRecord, Outcome, OutcomeRecord};

/// Splits every regular-season game into one win and one loss.
pub struct OutcomeExtractor {
    excluded_rounds: HashSet<String>,
}

impl OutcomeExtractor {
    pub fn new<I, S>(excluded_rounds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded_rounds: excluded_rounds.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_excluded(&self, week_label: &str) -> bool {
        self.excluded_rounds.contains(week_label.trim())
    }

    /// Fails on the first tie or unparseable week; nothing is returned in that case.
    pub fn extract(&self, games: &[GameRecord]) -> Result<Vec<OutcomeRecord>> {
        // Ties are checked over the whole input, playoffs included.
        if let Some(tie) = games.iter().find(|g| g.is_tie()) {
            return Err(PipelineError::TiedGame {
                week_label: tie.week_label.clone(),
                winner: tie.winner.clone(),
                loser: tie.loser.clone(),
                points: tie.points_winner,
            });
        }

        let mut outcomes = Vec::with_capacity(games.len() * 2);
        let mut skipped = 0usize;

        for game in games {
            if self.is_excluded(&game.week_label) {
                skipped += 1;
                continue;
            }

            let week = parse_week(game)?;
            outcomes.push(OutcomeRecord {
                team: game.winner.clone(),
                week,
                outcome: Outcome::Win,
            });
            outcomes.push(OutcomeRecord {
                team: game.loser.clone(),
                week,
                outcome: Outcome::Loss,
            });
        }

        tracing::debug!(
            "Extracted {} outcomes from {} games ({} outside the regular season)",
            outcomes.len(),
            games.len(),
            skipped
        );
        Ok(outcomes)
    }
}

fn parse_week(game: &GameRecord) -> Result<u32> {
    let invalid = || PipelineError::InvalidWeek {
        label: game.week_label.clone(),
        winner: game.winner.clone(),
        loser: game.loser.clone(),
    };

    // Week 0 is the synthetic baseline.
    match game.week_label.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(week) => Ok(week),
    }
}
