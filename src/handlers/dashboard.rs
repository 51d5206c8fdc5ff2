use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::services::{DashboardService, DashboardSummary};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub summary: DashboardSummary,
    /// Parts of the catalog that could not be loaded
    pub warnings: Vec<String>,
}

/// Dashboard summary of the whole catalog
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Dashboard summary, possibly degraded", body = DashboardResponse)
    ),
    tag = "Dashboard"
)]
pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let loaded =
        DashboardService::load(state.store.as_ref(), time::OffsetDateTime::now_utc()).await;

    Json(DashboardResponse {
        summary: loaded.data,
        warnings: loaded.warnings,
    })
}
