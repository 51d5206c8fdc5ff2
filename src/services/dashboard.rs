use std::collections::HashMap;

use serde::Serialize;
use time::{Duration, OffsetDateTime};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{ApiListing, DEFAULT_UPTIME};
use crate::services::assembly::{AssemblyService, Loaded};
use crate::store::RecordStore;

/// Window counted as "new" on the dashboard
pub const NEW_API_WINDOW: Duration = Duration::days(30);
const POPULAR_CATEGORY_LIMIT: usize = 5;
const TOP_API_LIMIT: usize = 3;
const TREND_DAYS: i64 = 7;
const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_apis: u64,
    pub total_api_calls: i64,
    pub new_apis_last_month: u64,
    pub popular_categories: Vec<CategoryShare>,
    pub top_apis: Vec<TopApi>,
    /// Placeholder series: labels only, no historical call data is recorded yet
    pub api_calls_trend: Vec<TrendPoint>,
    pub trend_is_placeholder: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategoryShare {
    pub name: String,
    /// Rounded share of all listings, 0..=100
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TopApi {
    pub id: Uuid,
    pub name: String,
    pub calls: i64,
    pub uptime: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TrendPoint {
    pub label: String,
    pub calls: Option<i64>,
}

pub struct DashboardService;

impl DashboardService {
    /// Compute the dashboard summary of `listings` as seen at `now`
    pub fn summarize(listings: &[ApiListing], now: OffsetDateTime) -> DashboardSummary {
        let total_apis = listings.len() as u64;
        let total_api_calls = listings
            .iter()
            .map(ApiListing::total_calls)
            .fold(0i64, i64::saturating_add);

        let window_start = now - NEW_API_WINDOW;
        let new_apis_last_month = listings
            .iter()
            .filter(|l| l.api.created_at >= window_start && l.api.created_at <= now)
            .count() as u64;

        DashboardSummary {
            total_apis,
            total_api_calls,
            new_apis_last_month,
            popular_categories: Self::popular_categories(listings),
            top_apis: Self::top_apis(listings),
            api_calls_trend: Self::trend_placeholder(now),
            trend_is_placeholder: true,
        }
    }

    /// Summary reported when nothing could be loaded
    pub fn empty(now: OffsetDateTime) -> DashboardSummary {
        Self::summarize(&[], now)
    }

    /// Load listings and summarize them. Never fails: an unavailable store
    /// yields the empty summary with a warning.
    pub async fn load(store: &dyn RecordStore, now: OffsetDateTime) -> Loaded<DashboardSummary> {
        match AssemblyService::load_all(store).await {
            Ok(loaded) => Loaded {
                data: Self::summarize(&loaded.data, now),
                warnings: loaded.warnings,
            },
            Err(err) => {
                tracing::warn!(error = %err, "Dashboard data unavailable, returning empty summary");
                Loaded {
                    data: Self::empty(now),
                    warnings: vec!["Failed to load dashboard data".to_string()],
                }
            }
        }
    }

    fn popular_categories(listings: &[ApiListing]) -> Vec<CategoryShare> {
        if listings.is_empty() {
            return Vec::new();
        }

        // (key, name, count) in order of first appearance
        let mut groups: Vec<(Option<Uuid>, String, usize)> = Vec::new();
        let mut index: HashMap<Option<Uuid>, usize> = HashMap::new();

        for listing in listings {
            let key = listing.category.as_ref().map(|c| c.id);
            match index.get(&key) {
                Some(&i) => groups[i].2 += 1,
                None => {
                    let name = listing
                        .category
                        .as_ref()
                        .map_or_else(|| UNCATEGORIZED.to_string(), |c| c.name.clone());
                    index.insert(key, groups.len());
                    groups.push((key, name, 1));
                }
            }
        }

        groups.sort_by(|a, b| b.2.cmp(&a.2));

        let total = listings.len() as f64;
        groups
            .into_iter()
            .take(POPULAR_CATEGORY_LIMIT)
            .map(|(_, name, count)| CategoryShare {
                name,
                percentage: (100.0 * count as f64 / total).round() as u32,
            })
            .collect()
    }

    fn top_apis(listings: &[ApiListing]) -> Vec<TopApi> {
        let mut ranked: Vec<&ApiListing> = listings.iter().collect();
        ranked.sort_by(|a, b| b.total_calls().cmp(&a.total_calls()));

        ranked
            .into_iter()
            .take(TOP_API_LIMIT)
            .map(|l| TopApi {
                id: l.api.id,
                name: l.api.name.clone(),
                calls: l.total_calls(),
                uptime: l.uptime().unwrap_or(DEFAULT_UPTIME),
            })
            .collect()
    }

    // TODO: back this with recorded daily call counts once api_stats keeps history
    fn trend_placeholder(now: OffsetDateTime) -> Vec<TrendPoint> {
        (0..TREND_DAYS)
            .rev()
            .map(|days_ago| TrendPoint {
                label: (now - Duration::days(days_ago)).date().to_string(),
                calls: None,
            })
            .collect()
    }
}
