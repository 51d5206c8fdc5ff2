use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Api, ApiStats, Category, CreateApi, CreateEndpoint, CreateStats, Endpoint};
use crate::repositories::{
    ApiRepository, CategoryRepository, EndpointRepository, Repository, StatsRepository,
};
use crate::store::RecordStore;

/// PostgreSQL-backed store delegating to the SeaORM repositories
#[derive(Clone)]
pub struct DatabaseStore {
    db: DatabaseConnection,
}

impl DatabaseStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordStore for DatabaseStore {
    async fn fetch_apis(&self) -> AppResult<Vec<Api>> {
        ApiRepository::find_all(&self.db).await
    }

    async fn fetch_api(&self, id: Uuid) -> AppResult<Api> {
        ApiRepository::find_by_id(&self.db, id).await
    }

    async fn fetch_categories(&self) -> AppResult<Vec<Category>> {
        CategoryRepository::find_all(&self.db).await
    }

    async fn fetch_category(&self, id: Uuid) -> AppResult<Category> {
        CategoryRepository::find_by_id(&self.db, id).await
    }

    async fn fetch_stats(&self) -> AppResult<Vec<ApiStats>> {
        StatsRepository::find_all(&self.db).await
    }

    async fn fetch_stats_for_api(&self, api_id: Uuid) -> AppResult<Option<ApiStats>> {
        StatsRepository::find_by_api(&self.db, api_id).await
    }

    async fn fetch_endpoints(&self) -> AppResult<Vec<Endpoint>> {
        EndpointRepository::find_all(&self.db).await
    }

    async fn fetch_endpoints_for_api(&self, api_id: Uuid) -> AppResult<Vec<Endpoint>> {
        EndpointRepository::list_by_api(&self.db, api_id).await
    }

    async fn insert_api(&self, input: &CreateApi) -> AppResult<Api> {
        ApiRepository::create(&self.db, input).await
    }

    async fn insert_stats(&self, api_id: Uuid, input: &CreateStats) -> AppResult<ApiStats> {
        StatsRepository::create(&self.db, api_id, input).await
    }

    async fn insert_endpoints(
        &self,
        api_id: Uuid,
        inputs: &[CreateEndpoint],
    ) -> AppResult<Vec<Endpoint>> {
        EndpointRepository::create_many(&self.db, api_id, inputs).await
    }
}
