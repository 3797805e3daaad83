use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::path::Path;
use std::time::Duration;

use crate::error::PipelineError;
use crate::models::GameRecord;

const COL_WEEK: &str = "Week";
const COL_DATE: &str = "Date";
const COL_WINNER: &str = "Winner/tie";
const COL_LOSER: &str = "Loser/tie";
const COL_PTS_WINNER: &str = "PtsW";
const COL_PTS_LOSER: &str = "PtsL";

/// Header names plus the text of every body cell, untyped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    fn require(&self, name: &str) -> Result<usize, PipelineError> {
        self.column(name)
            .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))
    }
}

// ── ScheduleFetcher ──────────────────────────────────────────────────────────

pub struct ScheduleFetcher {
    client: Client,
}

impl ScheduleFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent("nfl-differential/0.1")
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client })
    }

    pub async fn fetch_html(&self, url: &str) -> Result<String> {
        tracing::info!("Fetching season results from {}…", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Results page error {}: {}", status, body));
        }

        let html = response.text().await?;
        tracing::debug!("Fetched {} bytes", html.len());
        Ok(html)
    }
}

pub fn save_html(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, html).with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!("Saved page to {}", path.display());
    Ok(())
}

pub fn load_html(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

// ── HTML → RawTable ──────────────────────────────────────────────────────────

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector '{}': {:?}", css, e))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Locate the results table (`#games`, else the first table) and read it.
pub fn parse_schedule_table(html: &str) -> Result<RawTable> {
    let document = Html::parse_document(html);

    let table = document
        .select(&selector("table#games")?)
        .next()
        .or_else(|| document.select(&selector("table").ok()?).next())
        .ok_or(PipelineError::TableNotFound)?;

    let cells = selector("th, td")?;
    let headers: Vec<String> = table
        .select(&selector("thead tr")?)
        .last()
        .map(|tr| tr.select(&cells).map(cell_text).collect())
        .unwrap_or_default();

    let body_rows: Vec<ElementRef<'_>> = {
        let in_body: Vec<_> = table.select(&selector("tbody tr")?).collect();
        if in_body.is_empty() {
            // No tbody in the markup: every row after the header row.
            table.select(&selector("tr")?).skip(1).collect()
        } else {
            in_body
        }
    };

    let mut rows = Vec::with_capacity(body_rows.len());
    for tr in body_rows {
        if tr.value().classes().any(|c| c == "thead") {
            continue;
        }
        let row: Vec<String> = tr.select(&cells).map(cell_text).collect();
        if row.is_empty() || (!headers.is_empty() && row == headers) {
            continue;
        }
        rows.push(row);
    }

    tracing::debug!("Parsed results table: {} columns, {} rows", headers.len(), rows.len());
    Ok(RawTable { headers, rows })
}

// ── RawTable → GameRecord ────────────────────────────────────────────────────

/// Map the named columns into typed games. Rows without scores (unplayed
/// games, the "Playoffs" separator) are skipped.
pub fn games_from_table(table: &RawTable) -> Result<Vec<GameRecord>, PipelineError> {
    let week = table.require(COL_WEEK)?;
    let winner = table.require(COL_WINNER)?;
    let loser = table.require(COL_LOSER)?;
    let pts_w = table.require(COL_PTS_WINNER)?;
    let pts_l = table.require(COL_PTS_LOSER)?;
    let date = table.column(COL_DATE);

    let mut games = Vec::with_capacity(table.rows.len());
    for (i, row) in table.rows.iter().enumerate() {
        let get = |idx: usize| row.get(idx).map(|s| s.trim()).unwrap_or("");

        if get(pts_w).is_empty() || get(pts_l).is_empty() {
            tracing::debug!("Skipping row {} without scores: {:?}", i + 1, row);
            continue;
        }

        let parse_points = |idx: usize| {
            get(idx).parse::<u32>().map_err(|_| PipelineError::InvalidPoints {
                row: i + 1,
                value: get(idx).to_string(),
            })
        };

        games.push(GameRecord {
            date: date.and_then(|d| NaiveDate::parse_from_str(get(d), "%Y-%m-%d").ok()),
            week_label: get(week).to_string(),
            winner: get(winner).to_string(),
            loser: get(loser).to_string(),
            points_winner: parse_points(pts_w)?,
            points_loser: parse_points(pts_l)?,
        });
    }

    tracing::info!("Read {} completed games", games.len());
    Ok(games)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <table id="games">
          <thead>
            <tr><th>Week</th><th>Day</th><th>Date</th><th>Time</th><th>Winner/tie</th><th></th>
                <th>Loser/tie</th><th></th><th>PtsW</th><th>PtsL</th></tr>
          </thead>
          <tbody>
            <tr><th>1</th><td>Thu</td><td>2023-09-07</td><td>8:20PM</td><td>Detroit Lions</td><td>@</td>
                <td>Kansas City Chiefs</td><td>boxscore</td><td>21</td><td>20</td></tr>
            <tr class="thead"><th>Week</th><td>Day</td><td>Date</td><td>Time</td><td>Winner/tie</td><td></td>
                <td>Loser/tie</td><td></td><td>PtsW</td><td>PtsL</td></tr>
            <tr><th>2</th><td>Sun</td><td>2023-09-17</td><td>1:00PM</td><td>Buffalo Bills</td><td></td>
                <td>Las Vegas Raiders</td><td>boxscore</td><td>38</td><td>10</td></tr>
            <tr><th></th><td></td><td>Playoffs</td><td></td><td></td><td></td>
                <td></td><td></td><td></td><td></td></tr>
            <tr><th>WildCard</th><td>Sat</td><td>2024-01-13</td><td>4:30PM</td><td>Houston Texans</td><td></td>
                <td>Cleveland Browns</td><td>boxscore</td><td>45</td><td>14</td></tr>
          </tbody>
        </table>
        </body></html>
    "#;

    #[test]
    fn parses_headers_and_skips_repeated_header_rows() {
        let table = parse_schedule_table(PAGE).unwrap();
        assert_eq!(table.headers.len(), 10);
        assert_eq!(table.column("PtsW"), Some(8));
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[0][4], "Detroit Lions");
    }

    #[test]
    fn converts_rows_into_games() {
        let table = parse_schedule_table(PAGE).unwrap();
        let games = games_from_table(&table).unwrap();

        assert_eq!(games.len(), 3);
        assert_eq!(games[0].winner, "Detroit Lions");
        assert_eq!(games[0].loser, "Kansas City Chiefs");
        assert_eq!((games[0].points_winner, games[0].points_loser), (21, 20));
        assert_eq!(games[0].date, NaiveDate::from_ymd_opt(2023, 9, 7));
        assert_eq!(games[2].week_label, "WildCard");
    }

    #[test]
    fn missing_column_is_reported() {
        let table = RawTable {
            headers: vec!["Week".into(), "Winner/tie".into(), "Loser/tie".into(), "PtsW".into()],
            rows: vec![],
        };
        let err = games_from_table(&table).unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumn(ref c) if c == "PtsL"));
    }

    #[test]
    fn non_numeric_points_are_fatal() {
        let table = RawTable {
            headers: ["Week", "Winner/tie", "Loser/tie", "PtsW", "PtsL"].map(String::from).to_vec(),
            rows: vec![["1", "A", "B", "twenty", "3"].map(String::from).to_vec()],
        };
        let err = games_from_table(&table).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidPoints { row: 1, .. }));
    }

    #[test]
    fn page_without_table_is_an_error() {
        assert!(parse_schedule_table("<html><body><p>nothing</p></body></html>").is_err());
    }
}
