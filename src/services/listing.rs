use url::Url;

use crate::error::{AppError, AppResult};
use crate::models::{ApiListing, CreateApi, CreateEndpoint, CreateStats};
use crate::store::RecordStore;

const HTTP_METHODS: [&str; 7] = ["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

/// Everything submitted by the add-listing form
#[derive(Debug, Clone)]
pub struct CreateListing {
    pub api: CreateApi,
    /// Defaults to [`CreateStats::default`] when absent
    pub stats: Option<CreateStats>,
    pub endpoints: Vec<CreateEndpoint>,
}

pub struct ListingService;

impl ListingService {
    /// Register a new listing: API row, then stats row, then endpoint rows.
    ///
    /// The first failing step aborts the sequence. Rows written by earlier
    /// steps are kept.
    pub async fn create(store: &dyn RecordStore, input: CreateListing) -> AppResult<ApiListing> {
        let input = Self::validate(input)?;

        let category = match input.api.category_id {
            Some(category_id) => Some(store.fetch_category(category_id).await?),
            None => None,
        };

        let api = store.insert_api(&input.api).await?;
        tracing::info!(api_id = %api.id, name = %api.name, "Inserted API listing");

        let stats_input = input.stats.unwrap_or_default();
        let stats = store
            .insert_stats(api.id, &stats_input)
            .await
            .inspect_err(
                |e| tracing::error!(api_id = %api.id, error = %e, "Failed to insert stats"),
            )?;

        let endpoints = store
            .insert_endpoints(api.id, &input.endpoints)
            .await
            .inspect_err(
                |e| tracing::error!(api_id = %api.id, error = %e, "Failed to insert endpoints"),
            )?;
        tracing::info!(api_id = %api.id, endpoints = endpoints.len(), "Listing created");

        Ok(ApiListing {
            api,
            category,
            stats: Some(stats),
            endpoints,
        })
    }

    /// Check and normalize a submission
    pub fn validate(input: CreateListing) -> AppResult<CreateListing> {
        let CreateListing {
            api,
            stats,
            endpoints,
        } = input;

        let api = CreateApi {
            name: validate_required("name", &api.name)?,
            description: validate_required("description", &api.description)?,
            version: validate_required("version", &api.version)?,
            owner: validate_required("owner", &api.owner)?,
            base_url: validate_url("base_url", &api.base_url)?,
            documentation_url: validate_optional(api.documentation_url.as_deref())
                .map(|url| validate_url("documentation_url", &url))
                .transpose()?,
            category_id: api.category_id,
            tags: api
                .tags
                .iter()
                .map(|tag| tag.trim())
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
            auth_type: api.auth_type,
            auth_description: validate_optional(api.auth_description.as_deref()),
        };

        if let Some(stats) = &stats {
            validate_stats(stats)?;
        }

        let endpoints = endpoints
            .iter()
            .enumerate()
            .map(|(i, endpoint)| validate_endpoint(i, endpoint))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(CreateListing {
            api,
            stats,
            endpoints,
        })
    }
}

/// Trimmed value of a required text field
pub fn validate_required(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Trimmed value of an optional text field; blank reads as absent
pub fn validate_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn validate_url(field: &str, value: &str) -> AppResult<String> {
    let value = validate_required(field, value)?;
    let url = Url::parse(&value)
        .map_err(|e| AppError::Validation(format!("{} is not a valid URL: {}", field, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(value),
        scheme => Err(AppError::Validation(format!(
            "{} must use http or https, got {}",
            field, scheme
        ))),
    }
}

fn validate_stats(stats: &CreateStats) -> AppResult<()> {
    if !(0.0..=100.0).contains(&stats.uptime) {
        return Err(AppError::Validation(
            "uptime must be between 0 and 100".to_string(),
        ));
    }
    if stats.total_calls < 0 || stats.last_week_calls < 0 {
        return Err(AppError::Validation(
            "call counts must not be negative".to_string(),
        ));
    }
    if !(stats.avg_response_time >= 0.0) {
        return Err(AppError::Validation(
            "avg_response_time must not be negative".to_string(),
        ));
    }
    Ok(())
}

fn validate_endpoint(index: usize, endpoint: &CreateEndpoint) -> AppResult<CreateEndpoint> {
    let method = endpoint.method.trim().to_uppercase();
    if !HTTP_METHODS.contains(&method.as_str()) {
        return Err(AppError::Validation(format!(
            "endpoints[{}]: unsupported HTTP method {}",
            index, endpoint.method
        )));
    }

    let path = validate_required(&format!("endpoints[{}].path", index), &endpoint.path)?;
    if !path.starts_with('/') {
        return Err(AppError::Validation(format!(
            "endpoints[{}]: path must start with /",
            index
        )));
    }

    Ok(CreateEndpoint {
        method,
        path,
        description: endpoint.description.trim().to_string(),
    })
}
