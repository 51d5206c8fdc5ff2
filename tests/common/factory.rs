use api_hub::models::{ApiListing, AuthType, Category, CreateApi, CreateEndpoint, CreateStats};
use api_hub::services::{CreateListing, ListingService};
use api_hub::store::InMemoryStore;

/// Factory for creating test data
pub struct Factory<'a> {
    store: &'a InMemoryStore,
}

#[allow(dead_code)]
impl<'a> Factory<'a> {
    pub fn new(store: &'a InMemoryStore) -> Self {
        Self { store }
    }

    /// Create a category
    pub async fn create_category(&self, name: &str) -> Category {
        self.store.add_category(name, "#3b82f6").await
    }

    /// Create a listing with default stats and one endpoint
    pub async fn create_api(&self, name: &str) -> ApiListing {
        self.create_api_with(name, None, AuthType::None, None).await
    }

    /// Create a listing with explicit category, auth mode and call count
    pub async fn create_api_with(
        &self,
        name: &str,
        category: Option<&Category>,
        auth_type: AuthType,
        total_calls: Option<i64>,
    ) -> ApiListing {
        let input = CreateListing {
            api: CreateApi {
                name: name.to_string(),
                description: format!("{} description", name),
                version: "1.0.0".to_string(),
                owner: "Test Owner".to_string(),
                base_url: "https://api.example.com".to_string(),
                documentation_url: Some("https://docs.example.com".to_string()),
                category_id: category.map(|c| c.id),
                tags: vec!["test".to_string()],
                auth_type,
                auth_description: None,
            },
            stats: total_calls.map(|total_calls| CreateStats {
                total_calls,
                last_week_calls: total_calls / 10,
                uptime: 99.0,
                avg_response_time: 150.0,
            }),
            endpoints: vec![CreateEndpoint {
                method: "GET".to_string(),
                path: "/status".to_string(),
                description: "Service status".to_string(),
            }],
        };

        ListingService::create(self.store, input).await.unwrap()
    }
}
