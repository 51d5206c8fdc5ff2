use crate::models::{Api, ApiStats, Category, Endpoint};

/// An API record joined with its category, stats and endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct ApiListing {
    pub api: Api,
    pub category: Option<Category>,
    pub stats: Option<ApiStats>,
    pub endpoints: Vec<Endpoint>,
}

impl ApiListing {
    /// Total call count, zero when no stats row is attached
    pub fn total_calls(&self) -> i64 {
        self.stats.as_ref().map_or(0, |s| s.total_calls)
    }

    pub fn uptime(&self) -> Option<f64> {
        self.stats.as_ref().map(|s| s.uptime)
    }
}
