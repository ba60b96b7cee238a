use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::DashboardError;
use crate::models::ApiResponse;
use crate::services::{select, ChartKind, ChartSpec, Dashboard};

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
    pub default_team: String,
}

pub async fn serve(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    tracing::info!("Dashboard API server listening on port {}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/teams", get(list_teams_handler))
        .route("/charts/{kind}", get(chart_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            DashboardError::UnknownTeam { .. } => StatusCode::NOT_FOUND,
            DashboardError::UnknownChartKind(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}

// Health check endpoint
async fn health_check() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("Dashboard API is running"))
}

#[derive(Serialize)]
struct TeamList {
    default_team: String,
    teams: Vec<String>,
}

// GET /teams - Team selector options
async fn list_teams_handler(State(state): State<AppState>) -> Json<ApiResponse<TeamList>> {
    Json(ApiResponse::success(TeamList {
        default_team: state.default_team.clone(),
        teams: state.dashboard.team_names().map(str::to_string).collect(),
    }))
}

#[derive(Deserialize)]
struct ChartQuery {
    team: Option<String>,
    compare: Option<String>,
}

// GET /charts/{kind}?team=&compare= - Chart description for one tab
async fn chart_handler(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(params): Query<ChartQuery>,
) -> Result<Json<ApiResponse<ChartSpec>>, DashboardError> {
    let kind: ChartKind = kind.parse()?;
    let team = params.team.as_deref().unwrap_or(&state.default_team);

    let spec = select(&state.dashboard, kind, team, params.compare.as_deref())?;
    Ok(Json(ApiResponse::success(spec)))
}
