use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{ApiListing, AuthType};

/// Sentinel accepted by the category and auth filters to disable them
pub const ALL: &str = "all";

/// Ordering applied after filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Name, ascending
    #[default]
    Name,
    /// Creation time, newest first
    Date,
    /// Total calls, highest first
    Popularity,
    /// Uptime, highest first
    Rating,
}

impl SortKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(SortKey::Name),
            "date" => Some(SortKey::Date),
            "popularity" => Some(SortKey::Popularity),
            "rating" => Some(SortKey::Rating),
            _ => None,
        }
    }

    fn compare(&self, a: &ApiListing, b: &ApiListing) -> Ordering {
        match self {
            SortKey::Name => a.api.name.cmp(&b.api.name),
            SortKey::Date => b.api.created_at.cmp(&a.api.created_at),
            SortKey::Popularity => b.total_calls().cmp(&a.total_calls()),
            SortKey::Rating => b
                .uptime()
                .unwrap_or(0.0)
                .total_cmp(&a.uptime().unwrap_or(0.0)),
        }
    }
}

/// Browse criteria. `None` on a filter means "all".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterQuery {
    pub query: String,
    pub category: Option<String>,
    pub auth_type: Option<AuthType>,
    pub sort_by: SortKey,
}

impl FilterQuery {
    /// Whether a listing passes every active filter
    pub fn matches(&self, listing: &ApiListing) -> bool {
        self.matches_text(listing) && self.matches_category(listing) && self.matches_auth(listing)
    }

    fn matches_text(&self, listing: &ApiListing) -> bool {
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        let api = &listing.api;
        api.name.to_lowercase().contains(&needle)
            || api.description.to_lowercase().contains(&needle)
            || api
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
    }

    fn matches_category(&self, listing: &ApiListing) -> bool {
        match &self.category {
            None => true,
            Some(category) => listing
                .api
                .category_id
                .is_some_and(|id| id.to_string() == *category),
        }
    }

    fn matches_auth(&self, listing: &ApiListing) -> bool {
        self.auth_type
            .is_none_or(|auth_type| listing.api.auth_type == auth_type)
    }

    /// Filter, then sort. The input is left untouched and equal keys keep
    /// their input order.
    pub fn apply(&self, listings: &[ApiListing]) -> Vec<ApiListing> {
        let mut result: Vec<ApiListing> = listings
            .iter()
            .filter(|listing| self.matches(listing))
            .cloned()
            .collect();

        result.sort_by(|a, b| self.sort_by.compare(a, b));
        result
    }
}
