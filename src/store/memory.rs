use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Api, ApiStats, Category, CreateApi, CreateEndpoint, CreateStats, Endpoint};
use crate::store::{Collection, RecordStore};

/// In-memory store for tests and local demos.
/// Individual collections can be switched into a failing state.
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<Mutex<InMemoryStoreInner>>,
}

#[derive(Default)]
struct InMemoryStoreInner {
    apis: Vec<Api>,
    categories: Vec<Category>,
    stats: Vec<ApiStats>,
    endpoints: Vec<Endpoint>,
    failing: HashSet<Collection>,
}

impl InMemoryStoreInner {
    fn ensure_available(&self, collection: Collection) -> AppResult<()> {
        if self.failing.contains(&collection) {
            return Err(AppError::Database(format!("{} unavailable", collection)));
        }
        Ok(())
    }

    fn ensure_api_exists(&self, api_id: Uuid) -> AppResult<()> {
        if self.apis.iter().any(|a| a.id == api_id) {
            Ok(())
        } else {
            Err(AppError::Database(format!(
                "foreign key violation: api {} does not exist",
                api_id
            )))
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(InMemoryStoreInner::default())),
        }
    }

    /// Add a category (categories have no insert path in the catalog itself)
    pub async fn add_category(&self, name: &str, color: &str) -> Category {
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            color: color.to_string(),
        };
        self.inner.lock().await.categories.push(category.clone());
        category
    }

    /// Make every read and write against `collection` fail
    pub async fn fail(&self, collection: Collection) {
        self.inner.lock().await.failing.insert(collection);
    }

    /// Undo a previous [`InMemoryStore::fail`]
    pub async fn recover(&self, collection: Collection) {
        self.inner.lock().await.failing.remove(&collection);
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn fetch_apis(&self) -> AppResult<Vec<Api>> {
        let inner = self.inner.lock().await;
        inner.ensure_available(Collection::Apis)?;
        Ok(inner.apis.clone())
    }

    async fn fetch_api(&self, id: Uuid) -> AppResult<Api> {
        let inner = self.inner.lock().await;
        inner.ensure_available(Collection::Apis)?;
        inner
            .apis
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Api".to_string()))
    }

    async fn fetch_categories(&self) -> AppResult<Vec<Category>> {
        let inner = self.inner.lock().await;
        inner.ensure_available(Collection::Categories)?;
        let mut categories = inner.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn fetch_category(&self, id: Uuid) -> AppResult<Category> {
        let inner = self.inner.lock().await;
        inner.ensure_available(Collection::Categories)?;
        inner
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Category".to_string()))
    }

    async fn fetch_stats(&self) -> AppResult<Vec<ApiStats>> {
        let inner = self.inner.lock().await;
        inner.ensure_available(Collection::Stats)?;
        Ok(inner.stats.clone())
    }

    async fn fetch_stats_for_api(&self, api_id: Uuid) -> AppResult<Option<ApiStats>> {
        let inner = self.inner.lock().await;
        inner.ensure_available(Collection::Stats)?;
        Ok(inner.stats.iter().find(|s| s.api_id == api_id).cloned())
    }

    async fn fetch_endpoints(&self) -> AppResult<Vec<Endpoint>> {
        let inner = self.inner.lock().await;
        inner.ensure_available(Collection::Endpoints)?;
        Ok(inner.endpoints.clone())
    }

    async fn fetch_endpoints_for_api(&self, api_id: Uuid) -> AppResult<Vec<Endpoint>> {
        let inner = self.inner.lock().await;
        inner.ensure_available(Collection::Endpoints)?;
        Ok(inner
            .endpoints
            .iter()
            .filter(|e| e.api_id == api_id)
            .cloned()
            .collect())
    }

    async fn insert_api(&self, input: &CreateApi) -> AppResult<Api> {
        let mut inner = self.inner.lock().await;
        inner.ensure_available(Collection::Apis)?;

        let now = time::OffsetDateTime::now_utc();
        let api = Api {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            description: input.description.clone(),
            version: input.version.clone(),
            owner: input.owner.clone(),
            base_url: input.base_url.clone(),
            documentation_url: input.documentation_url.clone(),
            category_id: input.category_id,
            tags: input.tags.clone(),
            auth_type: input.auth_type,
            auth_description: input.auth_description.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.apis.push(api.clone());
        Ok(api)
    }

    async fn insert_stats(&self, api_id: Uuid, input: &CreateStats) -> AppResult<ApiStats> {
        let mut inner = self.inner.lock().await;
        inner.ensure_available(Collection::Stats)?;
        inner.ensure_api_exists(api_id)?;

        if inner.stats.iter().any(|s| s.api_id == api_id) {
            return Err(AppError::Database(format!(
                "unique violation: stats for api {} already exist",
                api_id
            )));
        }

        let stats = ApiStats {
            id: Uuid::new_v4(),
            api_id,
            total_calls: input.total_calls,
            last_week_calls: input.last_week_calls,
            uptime: input.uptime,
            avg_response_time: input.avg_response_time,
            last_updated: time::OffsetDateTime::now_utc(),
        };
        inner.stats.push(stats.clone());
        Ok(stats)
    }

    async fn insert_endpoints(
        &self,
        api_id: Uuid,
        inputs: &[CreateEndpoint],
    ) -> AppResult<Vec<Endpoint>> {
        let mut inner = self.inner.lock().await;
        inner.ensure_available(Collection::Endpoints)?;
        inner.ensure_api_exists(api_id)?;

        let now = time::OffsetDateTime::now_utc();
        let created: Vec<Endpoint> = inputs
            .iter()
            .map(|input| Endpoint {
                id: Uuid::new_v4(),
                api_id,
                method: input.method.clone(),
                path: input.path.clone(),
                description: input.description.clone(),
                created_at: now,
            })
            .collect();

        inner.endpoints.extend(created.iter().cloned());
        Ok(created)
    }
}
