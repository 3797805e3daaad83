use std::env;
use std::path::PathBuf;

pub const DEFAULT_SEASON: u16 = 2023;

/// Round labels that are not part of the regular season. "Week" is the
/// header row the results page repeats inside its table body.
pub const DEFAULT_EXCLUDED_ROUNDS: [&str; 5] = ["ConfChamp", "Division", "SuperBowl", "Week", "WildCard"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub season: u16,
    pub source_url: String,
    pub excluded_rounds: Vec<String>,
    pub data_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            season: DEFAULT_SEASON,
            source_url: source_url_for(DEFAULT_SEASON),
            excluded_rounds: DEFAULT_EXCLUDED_ROUNDS.iter().map(|s| s.to_string()).collect(),
            data_dir: PathBuf::from("data"),
        }
    }
}

impl PipelineConfig {
    /// Build from `NFL_*` environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(season) = env::var("NFL_SEASON").ok().and_then(|s| s.trim().parse().ok()) {
            config = config.with_season(season);
        }
        if let Ok(url) = env::var("NFL_SOURCE_URL") {
            if !url.trim().is_empty() {
                config.source_url = url.trim().to_string();
            }
        }
        if let Ok(rounds) = env::var("NFL_EXCLUDED_ROUNDS") {
            config.excluded_rounds = parse_round_list(&rounds);
        }
        if let Ok(dir) = env::var("NFL_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        config
    }

    /// Switch season. The source URL follows unless it was overridden.
    pub fn with_season(mut self, season: u16) -> Self {
        if self.source_url == source_url_for(self.season) {
            self.source_url = source_url_for(season);
        }
        self.season = season;
        self
    }

    pub fn differentials_path(&self) -> PathBuf {
        self.data_dir.join("nfl.csv")
    }

    pub fn teams_path(&self) -> PathBuf {
        self.data_dir.join("teams.csv")
    }
}

pub fn source_url_for(season: u16) -> String {
    format!("https://www.pro-football-reference.com/years/{}/games.htm", season)
}

fn parse_round_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_excludes_playoff_rounds() {
        let rounds = PipelineConfig::default().excluded_rounds;
        for label in ["WildCard", "Division", "ConfChamp", "SuperBowl", "Week"] {
            assert!(rounds.iter().any(|r| r == label), "{label}");
        }
        assert!(!rounds.iter().any(|r| r == "7"));
    }

    #[test]
    fn with_season_moves_default_url() {
        let config = PipelineConfig::default().with_season(2024);
        assert_eq!(config.season, 2024);
        assert_eq!(config.source_url, source_url_for(2024));
    }

    #[test]
    fn with_season_keeps_custom_url() {
        let mut config = PipelineConfig::default();
        config.source_url = "http://localhost/games.htm".to_string();
        let config = config.with_season(2020);
        assert_eq!(config.source_url, "http://localhost/games.htm");
    }

    #[test]
    fn round_list_ignores_blanks() {
        assert_eq!(parse_round_list(" WildCard, ,SuperBowl,"), vec!["WildCard", "SuperBowl"]);
    }
}
