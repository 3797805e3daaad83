use anyhow::Result;
use std::path::Path;

use crate::api::load_dashboard;
use crate::config::PipelineConfig;
use crate::models::{Conference, DashboardRow, Division, GameRecord};
use crate::services::{games_from_table, load_html, parse_schedule_table, run_pipeline, save_html, ScheduleFetcher};
use crate::store::{nfl_teams, write_differentials, write_teams};
use crate::utils::{calculate_win_percentage, format_differential, format_record, validate_team_name};

pub async fn fetch_data(config: &PipelineConfig, save_page: Option<&Path>) -> Result<()> {
    let fetcher = ScheduleFetcher::new()?;

    println!("🏈 Fetching {} season results...", config.season);
    let html = fetcher.fetch_html(&config.source_url).await?;

    if let Some(path) = save_page {
        save_html(path, &html)?;
        println!("💾 Saved page to {}", path.display());
    }

    let table = parse_schedule_table(&html)?;
    let games = games_from_table(&table)?;
    build_and_write(&games, config)
}

pub fn process_page(config: &PipelineConfig, html_path: &Path) -> Result<()> {
    println!("📄 Processing saved page {}...", html_path.display());

    let html = load_html(html_path)?;
    let table = parse_schedule_table(&html)?;
    let games = games_from_table(&table)?;
    build_and_write(&games, config)
}

fn build_and_write(games: &[GameRecord], config: &PipelineConfig) -> Result<()> {
    let series = run_pipeline(games, config)?;

    let path = config.differentials_path();
    write_differentials(&path, &series)?;

    let teams = series.iter().filter(|r| r.week == 0).count();
    let max_week = series.iter().map(|r| r.week).max().unwrap_or(0);
    println!(
        "✅ Wrote {} rows ({} teams, weeks 0-{}) to {}",
        series.len(),
        teams,
        max_week,
        path.display()
    );
    Ok(())
}

pub fn write_reference_teams(config: &PipelineConfig) -> Result<()> {
    let path = config.teams_path();
    let teams = nfl_teams();
    write_teams(&path, &teams)?;
    println!("✅ Wrote {} teams to {}", teams.len(), path.display());
    Ok(())
}

pub fn query_team(config: &PipelineConfig, team_name: &str) -> Result<()> {
    if !validate_team_name(team_name) {
        println!("❌ Invalid team name '{}'", team_name);
        return Ok(());
    }

    let dashboard = load_dashboard(config)?;

    println!("🔍 Searching for team: {}", team_name);
    let rows = dashboard.team(team_name);

    if rows.is_empty() {
        println!("❌ No team found matching '{}'", team_name);
        if let Some(suggestion) = dashboard
            .unmatched()
            .iter()
            .find(|u| u.team.eq_ignore_ascii_case(team_name.trim()))
            .and_then(|u| u.suggestion.as_deref())
        {
            println!("💡 The schedule lists it without reference data; closest match: {}", suggestion);
        }
        return Ok(());
    }

    let first = &rows[0];
    println!("📊 {} ({}) - {} {}", first.team, first.abbreviation, first.conference, first.division);
    println!("\n   Week  Record  Diff");
    for row in &rows {
        println!(
            "   {:>4}  {:>6}  {:>4}",
            row.week,
            format_record(row.wins, row.losses),
            format_differential(row.differential)
        );
    }

    if let Some(last) = rows.last() {
        println!(
            "\n   Win percentage through week {}: {:.1}%",
            last.week,
            calculate_win_percentage(last.wins, last.losses)
        );
    }

    Ok(())
}

pub fn show_standings(
    config: &PipelineConfig,
    conference: Conference,
    division: Division,
    week: Option<u32>,
) -> Result<()> {
    let dashboard = load_dashboard(config)?;
    let week = week.unwrap_or(dashboard.max_week()).min(dashboard.max_week());

    println!("🏆 {} {} after week {}:\n", conference, division, week);

    let rows = dashboard.table(conference, division, week);
    if rows.is_empty() {
        println!("📭 No teams found. Try fetching data first with: nfldiff fetch");
        return Ok(());
    }

    for (i, row) in rows.iter().enumerate() {
        print_standing(i + 1, row);
    }

    if !dashboard.unmatched().is_empty() {
        println!("\n⚠️  {} team(s) in the results have no reference data:", dashboard.unmatched().len());
        for u in dashboard.unmatched() {
            match &u.suggestion {
                Some(s) => println!("   • {} (did you mean {}?)", u.team, s),
                None => println!("   • {}", u.team),
            }
        }
    }

    Ok(())
}

fn print_standing(rank: usize, row: &DashboardRow) {
    println!(
        "{}. {:<24} {:>6}  {:>4}",
        rank,
        row.team,
        format_record(row.wins, row.losses),
        format_differential(row.differential)
    );
}
