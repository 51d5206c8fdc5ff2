use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::Category;
use crate::state::AppState;

// ============ Response DTOs ============

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub color: String,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            color: c.color,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryListResponse {
    pub data: Vec<CategoryResponse>,
    pub total: u64,
}

// ============ Handlers ============

/// List all categories
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List of categories", body = CategoryListResponse),
        (status = 500, description = "Store unavailable")
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<CategoryListResponse>> {
    let categories = state.store.fetch_categories().await?;

    Ok(Json(CategoryListResponse {
        total: categories.len() as u64,
        data: categories.into_iter().map(|c| c.into()).collect(),
    }))
}
