use thiserror::Error;

/// Domain errors for the differential pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("tied game in week {week_label}: {winner} {points}-{points} {loser}")]
    TiedGame {
        week_label: String,
        winner: String,
        loser: String,
        points: u32,
    },

    #[error("unparseable week label '{label}' ({winner} vs {loser})")]
    InvalidWeek {
        label: String,
        winner: String,
        loser: String,
    },

    #[error("results table is missing column '{0}'")]
    MissingColumn(String),

    #[error("invalid points value '{value}' in row {row}")]
    InvalidPoints { row: usize, value: String },

    #[error("no results table found in page")]
    TableNotFound,

    #[error("unknown conference: {0}")]
    UnknownConference(String),

    #[error("unknown division: {0}")]
    UnknownDivision(String),
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;
