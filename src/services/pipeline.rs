use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{GameRecord, TeamWeek};
use crate::services::{DifferentialBuilder, OutcomeExtractor};

/// Games in, weekly differentials out. Nothing is written on failure.
pub fn run_pipeline(games: &[GameRecord], config: &PipelineConfig) -> Result<Vec<TeamWeek>> {
    let extractor = OutcomeExtractor::new(config.excluded_rounds.iter().cloned());
    let outcomes = extractor.extract(games)?;

    if outcomes.is_empty() {
        tracing::warn!("No regular-season games in input; season {} produces no rows", config.season);
    }

    let series = DifferentialBuilder::build(&outcomes);
    tracing::info!(
        "Season {}: {} games → {} outcomes → {} team-week rows",
        config.season,
        games.len(),
        outcomes.len(),
        series.len()
    );
    Ok(series)
}
