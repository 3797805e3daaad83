use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::PipelineConfig;
use crate::models::{ApiResponse, Conference, DashboardRow, Division, UnmatchedTeam};
use crate::services::{Dashboard, Filters};
use crate::store::{load_teams_or_default, read_differentials, TeamDirectory};

type SharedDashboard = Arc<Dashboard>;

pub async fn serve(port: u16, config: &PipelineConfig) -> anyhow::Result<()> {
    let dashboard = load_dashboard(config)?;
    tracing::info!(
        "Loaded dashboard data through week {} ({} unmatched teams)",
        dashboard.max_week(),
        dashboard.unmatched().len()
    );

    let app = create_router().with_state(Arc::new(dashboard));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    tracing::info!("Dashboard API listening on port {}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

pub fn load_dashboard(config: &PipelineConfig) -> anyhow::Result<Dashboard> {
    let path = config.differentials_path();
    let series = read_differentials(&path)
        .with_context(|| format!("no differentials at {}; run `nfldiff fetch` first", path.display()))?;
    let teams = load_teams_or_default(&config.teams_path())?;
    Ok(Dashboard::new(&series, &TeamDirectory::new(teams)))
}

fn create_router() -> Router<SharedDashboard> {
    Router::new()
        .route("/health", get(health_check))
        .route("/filters", get(get_filters_handler))
        .route("/series", get(get_series_handler))
        .route("/table", get(get_table_handler))
        .route("/unmatched", get(get_unmatched_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
        )
}

// Health check endpoint
async fn health_check() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("Dashboard API is running"))
}

#[derive(Debug, Default, Deserialize)]
struct FilterQuery {
    conference: Option<String>,
    division: Option<String>,
    week: Option<u32>,
}

impl FilterQuery {
    /// Defaults to AFC East, like the dashboard's initial selection.
    fn selection(&self) -> Result<(Conference, Division), StatusCode> {
        let conference = match self.conference.as_deref() {
            Some(c) => c.parse::<Conference>().map_err(bad_request)?,
            None => Conference::Afc,
        };
        let division = match self.division.as_deref() {
            Some(d) => d.parse::<Division>().map_err(bad_request)?,
            None => Division::East,
        };
        Ok((conference, division))
    }
}

fn bad_request(e: crate::error::PipelineError) -> StatusCode {
    tracing::warn!("Rejected dashboard query: {}", e);
    StatusCode::BAD_REQUEST
}

// GET /filters - Dropdown and slider ranges
async fn get_filters_handler(
    State(dashboard): State<SharedDashboard>,
) -> Json<ApiResponse<Filters>> {
    Json(ApiResponse::success(dashboard.filters()))
}

#[derive(Debug, Serialize)]
struct SeriesResponse {
    conference: Conference,
    division: Division,
    y_min: i32,
    y_max: i32,
    rows: Vec<DashboardRow>,
}

// GET /series - Line chart data for one division
async fn get_series_handler(
    State(dashboard): State<SharedDashboard>,
    Query(params): Query<FilterQuery>,
) -> Result<Json<ApiResponse<SeriesResponse>>, StatusCode> {
    let (conference, division) = params.selection()?;
    let (y_min, y_max) = dashboard.y_limits();

    Ok(Json(ApiResponse::success(SeriesResponse {
        conference,
        division,
        y_min,
        y_max,
        rows: dashboard.series(conference, division),
    })))
}

#[derive(Debug, Serialize)]
struct TableResponse {
    conference: Conference,
    division: Division,
    week: u32,
    rows: Vec<DashboardRow>,
}

// GET /table - Division snapshot at the selected week
async fn get_table_handler(
    State(dashboard): State<SharedDashboard>,
    Query(params): Query<FilterQuery>,
) -> Result<Json<ApiResponse<TableResponse>>, StatusCode> {
    let (conference, division) = params.selection()?;
    let week = params.week.unwrap_or(dashboard.max_week());

    if week > dashboard.max_week() {
        tracing::warn!("Week {} is past the last week ({})", week, dashboard.max_week());
        return Err(StatusCode::BAD_REQUEST);
    }

    Ok(Json(ApiResponse::success(TableResponse {
        conference,
        division,
        week,
        rows: dashboard.table(conference, division, week),
    })))
}

// GET /unmatched - Observed teams missing from the reference list
async fn get_unmatched_handler(
    State(dashboard): State<SharedDashboard>,
) -> Json<ApiResponse<Vec<UnmatchedTeam>>> {
    Json(ApiResponse::success(dashboard.unmatched().to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeamWeek;

    fn shared() -> SharedDashboard {
        let series: Vec<TeamWeek> = ["Kansas City Chiefs", "Denver Broncos", "Los Angeles Rams"]
            .iter()
            .enumerate()
            .flat_map(|(i, team)| {
                (0..=3u32).map(move |week| {
                    let wins = if week == 0 { 0 } else { week.saturating_sub(i as u32) };
                    let losses = week - wins;
                    TeamWeek {
                        team: team.to_string(),
                        week,
                        wins,
                        losses,
                        differential: wins as i32 - losses as i32,
                    }
                })
            })
            .collect();
        Arc::new(Dashboard::new(&series, &TeamDirectory::nfl()))
    }

    fn query(conference: Option<&str>, division: Option<&str>, week: Option<u32>) -> Query<FilterQuery> {
        Query(FilterQuery {
            conference: conference.map(str::to_string),
            division: division.map(str::to_string),
            week,
        })
    }

    #[tokio::test]
    async fn series_defaults_to_afc_east() {
        let Json(resp) = get_series_handler(State(shared()), query(None, None, None)).await.unwrap();
        let data = resp.data.unwrap();
        assert_eq!((data.conference, data.division), (Conference::Afc, Division::East));
        assert!(data.rows.is_empty());
    }

    #[tokio::test]
    async fn series_for_afc_west() {
        let Json(resp) = get_series_handler(State(shared()), query(Some("AFC"), Some("West"), None))
            .await
            .unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data.rows.len(), 8);
        assert_eq!((data.y_min, data.y_max), (-3, 3));
    }

    #[tokio::test]
    async fn table_defaults_to_last_week() {
        let Json(resp) = get_table_handler(State(shared()), query(Some("afc"), Some("west"), None))
            .await
            .unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data.week, 3);
        assert_eq!(data.rows[0].team, "Kansas City Chiefs");
        assert_eq!(data.rows[0].differential, 3);
        assert_eq!(data.rows[1].team, "Denver Broncos");
    }

    #[tokio::test]
    async fn bad_filters_are_rejected() {
        let err = get_series_handler(State(shared()), query(Some("XFL"), None, None)).await.unwrap_err();
        assert_eq!(err, StatusCode::BAD_REQUEST);

        let err = get_table_handler(State(shared()), query(None, None, Some(19))).await.unwrap_err();
        assert_eq!(err, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn filters_report_week_range() {
        let Json(resp) = get_filters_handler(State(shared())).await;
        let data = resp.data.unwrap();
        assert_eq!((data.min_week, data.max_week), (1, 3));
        assert_eq!(data.divisions.len(), 4);
    }
}
