use anyhow::Context;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_hub::config::Config;
use api_hub::handlers::{
    ApiDetailResponse, ApiListResponse, ApiListingResponse, CategoryListResponse,
    CategoryResponse, CreateApiRequest, CreateEndpointRequest, CreateStatsRequest,
    DashboardResponse, EndpointResponse, HealthResponse, StatsResponse,
};
use api_hub::models::AuthType;
use api_hub::services::{CategoryShare, DashboardSummary, SortKey, TopApi, TrendPoint};
use api_hub::state::AppState;
use api_hub::{build_router, handlers};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::api::list_apis,
        handlers::api::get_api,
        handlers::api::create_api,
        handlers::category::list_categories,
        handlers::dashboard::get_dashboard,
    ),
    components(schemas(
        HealthResponse,
        AuthType,
        SortKey,
        CreateApiRequest,
        CreateStatsRequest,
        CreateEndpointRequest,
        ApiListingResponse,
        ApiListResponse,
        ApiDetailResponse,
        StatsResponse,
        EndpointResponse,
        CategoryResponse,
        CategoryListResponse,
        DashboardResponse,
        DashboardSummary,
        CategoryShare,
        TopApi,
        TrendPoint,
    )),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "APIs", description = "Browse, search and register API listings"),
        (name = "Categories", description = "Listing categories"),
        (name = "Dashboard", description = "Catalog summary statistics")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    let addr = config.server_addr();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("api_hub=info,tower_http=info"));
    if config.log_json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // Initialize application state (connects to the database, runs migrations)
    tracing::info!("Connecting to database...");
    let state = AppState::new(config)
        .await
        .context("Failed to initialize application state")?;
    tracing::info!("Database connection established");

    // Build the main application router
    let app = build_router(state)
        // Add Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
