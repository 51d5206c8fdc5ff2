use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::CategoryResponse;
use crate::models::{
    ApiListing, ApiStats, AuthType, CreateApi, CreateEndpoint, CreateStats, Endpoint,
};
use crate::services::{AssemblyService, CreateListing, FilterQuery, ListingService, SortKey, ALL};
use crate::state::AppState;

// ============ Request/Response DTOs ============

/// Browse criteria; every field is optional
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListApisParams {
    /// Case-insensitive match against name, description and tags
    pub query: Option<String>,
    /// Category id, or `all`
    pub category: Option<String>,
    /// `apiKey`, `oauth2`, `none` or `all`
    pub auth_type: Option<String>,
    /// `name`, `date`, `popularity` or `rating`
    pub sort_by: Option<String>,
}

impl TryFrom<ListApisParams> for FilterQuery {
    type Error = AppError;

    fn try_from(params: ListApisParams) -> Result<Self, Self::Error> {
        let category = params
            .category
            .filter(|c| !c.is_empty() && c != ALL);

        let auth_type = match params.auth_type.as_deref() {
            None | Some("") | Some(ALL) => None,
            Some(value) => Some(AuthType::parse(value).ok_or_else(|| {
                AppError::Validation(format!("Unknown authType: {}", value))
            })?),
        };

        let sort_by = match params.sort_by.as_deref() {
            None | Some("") => SortKey::default(),
            Some(value) => SortKey::parse(value)
                .ok_or_else(|| AppError::Validation(format!("Unknown sortBy: {}", value)))?,
        };

        Ok(FilterQuery {
            query: params.query.unwrap_or_default(),
            category,
            auth_type,
            sort_by,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStatsRequest {
    #[serde(default)]
    pub total_calls: i64,
    #[serde(default)]
    pub last_week_calls: i64,
    pub uptime: f64,
    #[serde(default)]
    pub avg_response_time: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEndpointRequest {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiRequest {
    pub name: String,
    pub description: String,
    pub version: String,
    pub owner: String,
    pub base_url: String,
    pub documentation_url: Option<String>,
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub auth_type: AuthType,
    pub auth_description: Option<String>,
    /// Initial usage statistics; defaults apply when omitted
    pub stats: Option<CreateStatsRequest>,
    #[serde(default)]
    pub endpoints: Vec<CreateEndpointRequest>,
}

impl From<CreateApiRequest> for CreateListing {
    fn from(payload: CreateApiRequest) -> Self {
        Self {
            api: CreateApi {
                name: payload.name,
                description: payload.description,
                version: payload.version,
                owner: payload.owner,
                base_url: payload.base_url,
                documentation_url: payload.documentation_url,
                category_id: payload.category_id,
                tags: payload.tags,
                auth_type: payload.auth_type,
                auth_description: payload.auth_description,
            },
            stats: payload.stats.map(|s| CreateStats {
                total_calls: s.total_calls,
                last_week_calls: s.last_week_calls,
                uptime: s.uptime,
                avg_response_time: s.avg_response_time,
            }),
            endpoints: payload
                .endpoints
                .into_iter()
                .map(|e| CreateEndpoint {
                    method: e.method,
                    path: e.path,
                    description: e.description,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_calls: i64,
    pub last_week_calls: i64,
    pub uptime: f64,
    pub avg_response_time: f64,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub last_updated: time::OffsetDateTime,
}

impl From<ApiStats> for StatsResponse {
    fn from(s: ApiStats) -> Self {
        Self {
            total_calls: s.total_calls,
            last_week_calls: s.last_week_calls,
            uptime: s.uptime,
            avg_response_time: s.avg_response_time,
            last_updated: s.last_updated,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EndpointResponse {
    pub id: Uuid,
    pub method: String,
    pub path: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
}

impl From<Endpoint> for EndpointResponse {
    fn from(e: Endpoint) -> Self {
        Self {
            id: e.id,
            method: e.method,
            path: e.path,
            description: e.description,
            created_at: e.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiListingResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub version: String,
    pub owner: String,
    pub base_url: String,
    pub documentation_url: Option<String>,
    pub category_id: Option<Uuid>,
    pub category: Option<CategoryResponse>,
    pub tags: Vec<String>,
    pub auth_type: AuthType,
    pub auth_description: Option<String>,
    pub stats: Option<StatsResponse>,
    pub endpoints: Vec<EndpointResponse>,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub updated_at: time::OffsetDateTime,
}

impl From<ApiListing> for ApiListingResponse {
    fn from(l: ApiListing) -> Self {
        let api = l.api;
        Self {
            id: api.id,
            name: api.name,
            description: api.description,
            version: api.version,
            owner: api.owner,
            base_url: api.base_url,
            documentation_url: api.documentation_url,
            category_id: api.category_id,
            category: l.category.map(|c| c.into()),
            tags: api.tags,
            auth_type: api.auth_type,
            auth_description: api.auth_description,
            stats: l.stats.map(|s| s.into()),
            endpoints: l.endpoints.into_iter().map(|e| e.into()).collect(),
            created_at: api.created_at,
            updated_at: api.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiListResponse {
    pub data: Vec<ApiListingResponse>,
    pub total: u64,
    /// Parts of the catalog that could not be loaded
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiDetailResponse {
    pub data: ApiListingResponse,
    pub warnings: Vec<String>,
}

// ============ Handlers ============

/// Browse listings with optional search, filters and sort
#[utoipa::path(
    get,
    path = "/api/apis",
    params(ListApisParams),
    responses(
        (status = 200, description = "Filtered and sorted listings", body = ApiListResponse),
        (status = 400, description = "Unknown filter or sort value"),
        (status = 500, description = "API collection unavailable")
    ),
    tag = "APIs"
)]
pub async fn list_apis(
    State(state): State<AppState>,
    Query(params): Query<ListApisParams>,
) -> AppResult<Json<ApiListResponse>> {
    let filter = FilterQuery::try_from(params)?;

    let loaded = AssemblyService::load_all(state.store.as_ref()).await?;
    let listings = filter.apply(&loaded.data);
    tracing::debug!(
        total = loaded.data.len(),
        matched = listings.len(),
        sort_by = ?filter.sort_by,
        "Filtered listings"
    );

    Ok(Json(ApiListResponse {
        total: listings.len() as u64,
        data: listings.into_iter().map(|l| l.into()).collect(),
        warnings: loaded.warnings,
    }))
}

/// Get a listing by ID
#[utoipa::path(
    get,
    path = "/api/apis/{id}",
    params(
        ("id" = Uuid, Path, description = "API ID")
    ),
    responses(
        (status = 200, description = "Listing details", body = ApiDetailResponse),
        (status = 404, description = "API not found")
    ),
    tag = "APIs"
)]
pub async fn get_api(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiDetailResponse>> {
    let loaded = AssemblyService::load_one(state.store.as_ref(), id).await?;

    Ok(Json(ApiDetailResponse {
        data: loaded.data.into(),
        warnings: loaded.warnings,
    }))
}

/// Register a new listing
#[utoipa::path(
    post,
    path = "/api/apis",
    request_body = CreateApiRequest,
    responses(
        (status = 201, description = "Listing created", body = ApiListingResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found"),
        (status = 500, description = "Store unavailable")
    ),
    tag = "APIs"
)]
pub async fn create_api(
    State(state): State<AppState>,
    Json(payload): Json<CreateApiRequest>,
) -> AppResult<(StatusCode, Json<ApiListingResponse>)> {
    let listing = ListingService::create(state.store.as_ref(), payload.into()).await?;
    Ok((StatusCode::CREATED, Json(listing.into())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_default_to_no_filtering() {
        let filter = FilterQuery::try_from(ListApisParams::default()).unwrap();
        assert_eq!(filter, FilterQuery::default());
    }

    #[test]
    fn test_params_all_sentinel_disables_filters() {
        let params = ListApisParams {
            query: Some("pay".to_string()),
            category: Some("all".to_string()),
            auth_type: Some("all".to_string()),
            sort_by: Some("popularity".to_string()),
        };

        let filter = FilterQuery::try_from(params).unwrap();
        assert_eq!(filter.query, "pay");
        assert_eq!(filter.category, None);
        assert_eq!(filter.auth_type, None);
        assert_eq!(filter.sort_by, SortKey::Popularity);
    }

    #[test]
    fn test_params_reject_unknown_values() {
        let bad_auth = ListApisParams {
            auth_type: Some("basic".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            FilterQuery::try_from(bad_auth),
            Err(AppError::Validation(_))
        ));

        let bad_sort = ListApisParams {
            sort_by: Some("stars".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            FilterQuery::try_from(bad_sort),
            Err(AppError::Validation(_))
        ));
    }
}
