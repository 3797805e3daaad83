use crate::models::TeamWeek;

/// Signed differential for display, e.g. "+3", "0", "-2"
pub fn format_differential(differential: i32) -> String {
    if differential > 0 {
        format!("+{}", differential)
    } else {
        differential.to_string()
    }
}

/// Win-loss record, e.g. "12-5"
pub fn format_record(wins: u32, losses: u32) -> String {
    format!("{}-{}", wins, losses)
}

/// Calculate win percentage from wins and losses
pub fn calculate_win_percentage(wins: u32, losses: u32) -> f64 {
    let total_games = wins + losses;
    if total_games == 0 {
        return 0.0;
    }
    wins as f64 / total_games as f64 * 100.0
}

/// Symmetric y-axis limits so every filter shares the same scale.
pub fn axis_limits(rows: &[TeamWeek]) -> (i32, i32) {
    let max_abs = rows
        .iter()
        .map(|r| r.differential.abs())
        .max()
        .unwrap_or(0);
    (-max_abs, max_abs)
}

/// Validate team name format
pub fn validate_team_name(name: &str) -> bool {
    !name.trim().is_empty() && name.len() <= 100
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(differential: i32) -> TeamWeek {
        TeamWeek {
            team: "A".to_string(),
            week: 1,
            wins: differential.max(0) as u32,
            losses: (-differential).max(0) as u32,
            differential,
        }
    }

    #[test]
    fn test_format_differential() {
        assert_eq!(format_differential(3), "+3");
        assert_eq!(format_differential(0), "0");
        assert_eq!(format_differential(-2), "-2");
    }

    #[test]
    fn test_calculate_win_percentage() {
        assert_eq!(calculate_win_percentage(3, 1), 75.0);
        assert_eq!(calculate_win_percentage(0, 0), 0.0);
    }

    #[test]
    fn test_axis_limits() {
        assert_eq!(axis_limits(&[row(5), row(-9), row(2)]), (-9, 9));
        assert_eq!(axis_limits(&[]), (0, 0));
    }

    #[test]
    fn test_validate_team_name() {
        assert!(validate_team_name("Detroit Lions"));
        assert!(!validate_team_name("   "));
    }
}
