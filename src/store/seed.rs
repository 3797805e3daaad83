use std::collections::HashMap;

use crate::models::{Conference, Division, TeamInfo};

/// Suggestions scoring below this are not worth showing.
const SUGGESTION_THRESHOLD: f64 = 0.85;

const NFL_TEAMS: [(&str, &str, Conference, Division); 32] = [
    ("BUF", "Buffalo Bills", Conference::Afc, Division::East),
    ("MIA", "Miami Dolphins", Conference::Afc, Division::East),
    ("NYJ", "New York Jets", Conference::Afc, Division::East),
    ("NE", "New England Patriots", Conference::Afc, Division::East),
    ("BAL", "Baltimore Ravens", Conference::Afc, Division::North),
    ("CLE", "Cleveland Browns", Conference::Afc, Division::North),
    ("PIT", "Pittsburgh Steelers", Conference::Afc, Division::North),
    ("CIN", "Cincinnati Bengals", Conference::Afc, Division::North),
    ("HOU", "Houston Texans", Conference::Afc, Division::South),
    ("JAX", "Jacksonville Jaguars", Conference::Afc, Division::South),
    ("IND", "Indianapolis Colts", Conference::Afc, Division::South),
    ("TEN", "Tennessee Titans", Conference::Afc, Division::South),
    ("KC", "Kansas City Chiefs", Conference::Afc, Division::West),
    ("LV", "Las Vegas Raiders", Conference::Afc, Division::West),
    ("DEN", "Denver Broncos", Conference::Afc, Division::West),
    ("LAC", "Los Angeles Chargers", Conference::Afc, Division::West),
    ("DAL", "Dallas Cowboys", Conference::Nfc, Division::East),
    ("PHI", "Philadelphia Eagles", Conference::Nfc, Division::East),
    ("NYG", "New York Giants", Conference::Nfc, Division::East),
    ("WAS", "Washington Commanders", Conference::Nfc, Division::East),
    ("DET", "Detroit Lions", Conference::Nfc, Division::North),
    ("GB", "Green Bay Packers", Conference::Nfc, Division::North),
    ("MIN", "Minnesota Vikings", Conference::Nfc, Division::North),
    ("CHI", "Chicago Bears", Conference::Nfc, Division::North),
    ("TB", "Tampa Bay Buccaneers", Conference::Nfc, Division::South),
    ("NO", "New Orleans Saints", Conference::Nfc, Division::South),
    ("ATL", "Atlanta Falcons", Conference::Nfc, Division::South),
    ("CAR", "Carolina Panthers", Conference::Nfc, Division::South),
    ("SF", "San Francisco 49ers", Conference::Nfc, Division::West),
    ("LAR", "Los Angeles Rams", Conference::Nfc, Division::West),
    ("SEA", "Seattle Seahawks", Conference::Nfc, Division::West),
    ("ARI", "Arizona Cardinals", Conference::Nfc, Division::West),
];

/// The 32 franchises, grouped by conference and division.
pub fn nfl_teams() -> Vec<TeamInfo> {
    NFL_TEAMS
        .iter()
        .map(|&(abbreviation, full_name, conference, division)| TeamInfo {
            abbreviation: abbreviation.to_string(),
            full_name: full_name.to_string(),
            conference,
            division,
        })
        .collect()
}

/// Reference lookup keyed by full team name.
#[derive(Debug, Clone)]
pub struct TeamDirectory {
    by_name: HashMap<String, TeamInfo>,
}

impl TeamDirectory {
    pub fn new(teams: Vec<TeamInfo>) -> Self {
        Self {
            by_name: teams.into_iter().map(|t| (t.full_name.clone(), t)).collect(),
        }
    }

    #[cfg(test)]
    pub fn nfl() -> Self {
        Self::new(nfl_teams())
    }

    pub fn get(&self, full_name: &str) -> Option<&TeamInfo> {
        self.by_name.get(full_name)
    }

    /// Closest reference name for a team the schedule spells differently,
    /// e.g. a relocated or renamed franchise.
    pub fn suggest(&self, name: &str) -> Option<&str> {
        let lowered = name.to_lowercase();
        self.by_name
            .keys()
            .map(|k| (k, strsim::jaro_winkler(&lowered, &k.to_lowercase())))
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(k, _)| k.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_divisions_of_four() {
        let teams = nfl_teams();
        assert_eq!(teams.len(), 32);
        for conference in Conference::ALL {
            for division in Division::ALL {
                let n = teams
                    .iter()
                    .filter(|t| t.conference == conference && t.division == division)
                    .count();
                assert_eq!(n, 4, "{conference} {division}");
            }
        }
    }

    #[test]
    fn lookup_by_full_name() {
        let directory = TeamDirectory::nfl();
        let niners = directory.get("San Francisco 49ers").unwrap();
        assert_eq!(niners.abbreviation, "SF");
        assert_eq!(niners.conference, Conference::Nfc);
        assert!(directory.get("Oakland Raiders").is_none());
    }

    #[test]
    fn suggests_close_spelling() {
        let directory = TeamDirectory::nfl();
        assert_eq!(directory.suggest("Washington Commandos"), Some("Washington Commanders"));
        assert_eq!(directory.suggest("Hamilton Tiger-Cats"), None);
    }
}
