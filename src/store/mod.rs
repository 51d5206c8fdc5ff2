pub mod database;
pub mod memory;

pub use database::DatabaseStore;
pub use memory::InMemoryStore;

use std::fmt;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Api, ApiStats, Category, CreateApi, CreateEndpoint, CreateStats, Endpoint};

/// The four collections backing the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Apis,
    Categories,
    Stats,
    Endpoints,
}

impl Collection {
    pub fn table_name(&self) -> &'static str {
        match self {
            Collection::Apis => "apis",
            Collection::Categories => "api_categories",
            Collection::Stats => "api_stats",
            Collection::Endpoints => "api_endpoints",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Record store trait for abstracting storage backends
/// Follows the async_trait pattern of the repositories
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch every API row
    async fn fetch_apis(&self) -> AppResult<Vec<Api>>;

    /// Fetch one API row; `NotFound` when absent
    async fn fetch_api(&self, id: Uuid) -> AppResult<Api>;

    /// Fetch every category
    async fn fetch_categories(&self) -> AppResult<Vec<Category>>;

    /// Fetch one category; `NotFound` when absent
    async fn fetch_category(&self, id: Uuid) -> AppResult<Category>;

    /// Fetch every stats row
    async fn fetch_stats(&self) -> AppResult<Vec<ApiStats>>;

    /// Fetch the stats row of one API, if present
    async fn fetch_stats_for_api(&self, api_id: Uuid) -> AppResult<Option<ApiStats>>;

    /// Fetch every endpoint row
    async fn fetch_endpoints(&self) -> AppResult<Vec<Endpoint>>;

    /// Fetch the endpoints of one API
    async fn fetch_endpoints_for_api(&self, api_id: Uuid) -> AppResult<Vec<Endpoint>>;

    /// Insert an API row
    async fn insert_api(&self, input: &CreateApi) -> AppResult<Api>;

    /// Insert the stats row of an API
    async fn insert_stats(&self, api_id: Uuid, input: &CreateStats) -> AppResult<ApiStats>;

    /// Insert endpoint rows of an API
    async fn insert_endpoints(
        &self,
        api_id: Uuid,
        inputs: &[CreateEndpoint],
    ) -> AppResult<Vec<Endpoint>>;
}
