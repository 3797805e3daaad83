use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PipelineError;

/// One finished game as read from the results table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub date: Option<NaiveDate>,
    pub week_label: String, // "1".."18" or a playoff round name
    pub winner: String,
    pub loser: String,
    pub points_winner: u32,
    pub points_loser: u32,
}

impl GameRecord {
    pub fn is_tie(&self) -> bool {
        self.points_winner == self.points_loser
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Loss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeRecord {
    pub team: String,
    pub week: u32,
    pub outcome: Outcome,
}

/// A row of the persisted output: one team through one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamWeek {
    pub team: String,
    pub week: u32,
    pub wins: u32,
    pub losses: u32,
    pub differential: i32,
}

impl TeamWeek {
    pub fn baseline(team: &str) -> Self {
        Self {
            team: team.to_string(),
            week: 0,
            wins: 0,
            losses: 0,
            differential: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Conference {
    #[serde(rename = "AFC")]
    Afc,
    #[serde(rename = "NFC")]
    Nfc,
}

impl Conference {
    pub const ALL: [Conference; 2] = [Conference::Afc, Conference::Nfc];

    pub fn as_str(&self) -> &'static str {
        match self {
            Conference::Afc => "AFC",
            Conference::Nfc => "NFC",
        }
    }
}

impl fmt::Display for Conference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Conference {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AFC" => Ok(Conference::Afc),
            "NFC" => Ok(Conference::Nfc),
            _ => Err(PipelineError::UnknownConference(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Division {
    East,
    North,
    South,
    West,
}

impl Division {
    pub const ALL: [Division; 4] = [Division::East, Division::North, Division::South, Division::West];

    pub fn as_str(&self) -> &'static str {
        match self {
            Division::East => "East",
            Division::North => "North",
            Division::South => "South",
            Division::West => "West",
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Division {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "east" => Ok(Division::East),
            "north" => Ok(Division::North),
            "south" => Ok(Division::South),
            "west" => Ok(Division::West),
            _ => Err(PipelineError::UnknownDivision(s.to_string())),
        }
    }
}

/// Static reference data for one franchise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub abbreviation: String,
    pub full_name: String,
    pub conference: Conference,
    pub division: Division,
}

/// A Team-Week row joined with its reference data, as served to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardRow {
    pub team: String,
    pub abbreviation: String,
    pub conference: Conference,
    pub division: Division,
    pub week: u32,
    pub wins: u32,
    pub losses: u32,
    pub differential: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnmatchedTeam {
    pub team: String,
    pub suggestion: Option<String>,
}

// API Response types
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conference_parses_case_insensitively() {
        assert_eq!("afc".parse::<Conference>().unwrap(), Conference::Afc);
        assert_eq!(" NFC ".parse::<Conference>().unwrap(), Conference::Nfc);
        assert!("XFL".parse::<Conference>().is_err());
    }

    #[test]
    fn division_parses_case_insensitively() {
        assert_eq!("EAST".parse::<Division>().unwrap(), Division::East);
        assert_eq!("west".parse::<Division>().unwrap(), Division::West);
        assert!("Central".parse::<Division>().is_err());
    }

    #[test]
    fn conference_serializes_as_upper_case_label() {
        let json = serde_json::to_string(&Conference::Nfc).unwrap();
        assert_eq!(json, "\"NFC\"");
    }
}
