pub mod api;
pub mod category;
pub mod dashboard;
pub mod health;

pub use api::{
    create_api, get_api, list_apis, ApiDetailResponse, ApiListResponse, ApiListingResponse,
    CreateApiRequest, CreateEndpointRequest, CreateStatsRequest, EndpointResponse,
    ListApisParams, StatsResponse,
};
pub use category::{list_categories, CategoryListResponse, CategoryResponse};
pub use dashboard::{get_dashboard, DashboardResponse};
pub use health::{health_check, HealthResponse};
