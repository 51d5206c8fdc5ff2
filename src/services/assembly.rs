use std::collections::HashMap;

use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Api, ApiListing, ApiStats, Category, Endpoint};
use crate::store::{Collection, RecordStore};

/// A read result together with the user-facing warnings collected while
/// some of its parts were unavailable
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub data: T,
    pub warnings: Vec<String>,
}

pub struct AssemblyService;

impl AssemblyService {
    /// Join the four collections into enriched listings, keeping the order of `apis`
    pub fn assemble(
        apis: Vec<Api>,
        categories: Vec<Category>,
        stats: Vec<ApiStats>,
        endpoints: Vec<Endpoint>,
    ) -> Vec<ApiListing> {
        let categories: HashMap<Uuid, Category> =
            categories.into_iter().map(|c| (c.id, c)).collect();
        let mut stats: HashMap<Uuid, ApiStats> =
            stats.into_iter().map(|s| (s.api_id, s)).collect();

        let mut endpoints_by_api: HashMap<Uuid, Vec<Endpoint>> = HashMap::new();
        for endpoint in endpoints {
            endpoints_by_api
                .entry(endpoint.api_id)
                .or_default()
                .push(endpoint);
        }

        apis.into_iter()
            .map(|api| {
                let category = api
                    .category_id
                    .and_then(|id| categories.get(&id).cloned());
                let stats = stats.remove(&api.id);
                let endpoints = endpoints_by_api.remove(&api.id).unwrap_or_default();

                ApiListing {
                    api,
                    category,
                    stats,
                    endpoints,
                }
            })
            .collect()
    }

    /// Load and join every listing.
    ///
    /// The API fetch is primary: its failure fails the read. Categories, stats
    /// and endpoints are fetched concurrently afterwards, and any of them that
    /// fails is replaced by an empty collection plus a warning.
    pub async fn load_all(store: &dyn RecordStore) -> AppResult<Loaded<Vec<ApiListing>>> {
        let apis = store.fetch_apis().await?;

        let (categories, stats, endpoints) = futures::join!(
            store.fetch_categories(),
            store.fetch_stats(),
            store.fetch_endpoints()
        );

        let mut warnings = Vec::new();
        let categories = degrade(Collection::Categories, categories, &mut warnings);
        let stats = degrade(Collection::Stats, stats, &mut warnings);
        let endpoints = degrade(Collection::Endpoints, endpoints, &mut warnings);

        Ok(Loaded {
            data: Self::assemble(apis, categories, stats, endpoints),
            warnings,
        })
    }

    /// Load a single listing by API id, with the same degradation policy as
    /// [`AssemblyService::load_all`]
    pub async fn load_one(store: &dyn RecordStore, id: Uuid) -> AppResult<Loaded<ApiListing>> {
        let api = store.fetch_api(id).await?;

        let category_fetch = async {
            match api.category_id {
                Some(category_id) => store.fetch_category(category_id).await.map(Some),
                None => Ok(None),
            }
        };
        let (category, stats, endpoints) = futures::join!(
            category_fetch,
            store.fetch_stats_for_api(id),
            store.fetch_endpoints_for_api(id)
        );

        let mut warnings = Vec::new();
        let category = match category {
            // A dangling category reference is tolerated
            Err(err) if err.is_not_found() => None,
            other => degrade(Collection::Categories, other, &mut warnings),
        };
        let stats = degrade(Collection::Stats, stats, &mut warnings);
        let endpoints = degrade(Collection::Endpoints, endpoints, &mut warnings);

        Ok(Loaded {
            data: ApiListing {
                api,
                category,
                stats,
                endpoints,
            },
            warnings,
        })
    }
}

/// Replace a failed secondary fetch by its empty value and record a warning
fn degrade<T: Default>(
    collection: Collection,
    result: AppResult<T>,
    warnings: &mut Vec<String>,
) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(collection = %collection, error = %err, "Degrading to empty collection");
            warnings.push(format!("Failed to load {}", collection));
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthType, CreateApi, CreateEndpoint, CreateStats};
    use crate::store::InMemoryStore;
    use time::macros::datetime;

    fn api(name: &str, category_id: Option<Uuid>) -> Api {
        Api {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: format!("{} description", name),
            version: "1.0.0".to_string(),
            owner: "Acme".to_string(),
            base_url: "https://api.example.com".to_string(),
            documentation_url: None,
            category_id,
            tags: vec![],
            auth_type: AuthType::None,
            auth_description: None,
            created_at: datetime!(2024-01-01 0:00 UTC),
            updated_at: datetime!(2024-01-01 0:00 UTC),
        }
    }

    fn stats(api_id: Uuid, total_calls: i64) -> ApiStats {
        ApiStats {
            id: Uuid::new_v4(),
            api_id,
            total_calls,
            last_week_calls: 0,
            uptime: 99.5,
            avg_response_time: 120.0,
            last_updated: datetime!(2024-01-02 0:00 UTC),
        }
    }

    fn endpoint(api_id: Uuid, path: &str) -> Endpoint {
        Endpoint {
            id: Uuid::new_v4(),
            api_id,
            method: "GET".to_string(),
            path: path.to_string(),
            description: String::new(),
            created_at: datetime!(2024-01-01 0:00 UTC),
        }
    }

    #[test]
    fn test_assemble_attaches_related_rows() {
        let finance = Category {
            id: Uuid::new_v4(),
            name: "Finance".to_string(),
            color: "#10b981".to_string(),
        };
        let payment = api("Payment API", Some(finance.id));
        let weather = api("Weather API", None);

        let listings = AssemblyService::assemble(
            vec![payment.clone(), weather.clone()],
            vec![finance.clone()],
            vec![stats(payment.id, 500)],
            vec![
                endpoint(payment.id, "/charges"),
                endpoint(weather.id, "/forecast"),
                endpoint(payment.id, "/refunds"),
            ],
        );

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].api.id, payment.id);
        assert_eq!(listings[0].category, Some(finance));
        assert_eq!(listings[0].total_calls(), 500);
        let paths: Vec<&str> = listings[0]
            .endpoints
            .iter()
            .map(|e| e.path.as_str())
            .collect();
        assert_eq!(paths, vec!["/charges", "/refunds"]);

        assert_eq!(listings[1].api.id, weather.id);
        assert!(listings[1].category.is_none());
        assert!(listings[1].stats.is_none());
        assert_eq!(listings[1].endpoints.len(), 1);
    }

    #[test]
    fn test_assemble_tolerates_dangling_category() {
        let orphan = api("Orphan API", Some(Uuid::new_v4()));
        let listings = AssemblyService::assemble(vec![orphan], vec![], vec![], vec![]);

        assert_eq!(listings.len(), 1);
        assert!(listings[0].category.is_none());
        assert!(listings[0].endpoints.is_empty());
    }

    #[test]
    fn test_assemble_duplicate_stats_last_wins() {
        let a = api("Dup API", None);
        let listings = AssemblyService::assemble(
            vec![a.clone()],
            vec![],
            vec![stats(a.id, 1), stats(a.id, 2)],
            vec![],
        );

        assert_eq!(listings[0].total_calls(), 2);
    }

    async fn seeded_store() -> (InMemoryStore, Uuid) {
        let store = InMemoryStore::new();
        let category = store.add_category("Weather", "#3b82f6").await;
        let api = store
            .insert_api(&CreateApi {
                name: "Weather API".to_string(),
                description: "Forecasts".to_string(),
                version: "2.1".to_string(),
                owner: "Meteo".to_string(),
                base_url: "https://weather.example.com".to_string(),
                documentation_url: None,
                category_id: Some(category.id),
                tags: vec!["weather".to_string()],
                auth_type: AuthType::ApiKey,
                auth_description: None,
            })
            .await
            .unwrap();
        store
            .insert_stats(api.id, &CreateStats::default())
            .await
            .unwrap();
        store
            .insert_endpoints(
                api.id,
                &[CreateEndpoint {
                    method: "GET".to_string(),
                    path: "/forecast".to_string(),
                    description: "Daily forecast".to_string(),
                }],
            )
            .await
            .unwrap();
        (store, api.id)
    }

    #[tokio::test]
    async fn test_load_all_without_failures() {
        let (store, api_id) = seeded_store().await;

        let loaded = AssemblyService::load_all(&store).await.unwrap();
        assert!(loaded.warnings.is_empty());
        assert_eq!(loaded.data.len(), 1);
        assert_eq!(loaded.data[0].api.id, api_id);
        assert!(loaded.data[0].category.is_some());
        assert!(loaded.data[0].stats.is_some());
        assert_eq!(loaded.data[0].endpoints.len(), 1);
    }

    #[tokio::test]
    async fn test_load_all_degrades_secondary_collections() {
        let (store, _) = seeded_store().await;
        store.fail(Collection::Stats).await;
        store.fail(Collection::Endpoints).await;

        let loaded = AssemblyService::load_all(&store).await.unwrap();
        assert_eq!(loaded.data.len(), 1);
        assert!(loaded.data[0].category.is_some());
        assert!(loaded.data[0].stats.is_none());
        assert!(loaded.data[0].endpoints.is_empty());
        assert_eq!(
            loaded.warnings,
            vec![
                "Failed to load api_stats".to_string(),
                "Failed to load api_endpoints".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_load_all_fails_when_apis_unavailable() {
        let (store, _) = seeded_store().await;
        store.fail(Collection::Apis).await;

        assert!(AssemblyService::load_all(&store).await.is_err());
    }

    #[tokio::test]
    async fn test_load_one_degrades_category() {
        let (store, api_id) = seeded_store().await;
        store.fail(Collection::Categories).await;

        let loaded = AssemblyService::load_one(&store, api_id).await.unwrap();
        assert!(loaded.data.category.is_none());
        assert!(loaded.data.stats.is_some());
        assert_eq!(loaded.warnings, vec!["Failed to load api_categories".to_string()]);
    }

    #[tokio::test]
    async fn test_load_one_tolerates_dangling_category() {
        let store = InMemoryStore::new();
        let api = store
            .insert_api(&CreateApi {
                name: "Orphan API".to_string(),
                description: "Category was removed".to_string(),
                version: "1.0".to_string(),
                owner: "Acme".to_string(),
                base_url: "https://orphan.example.com".to_string(),
                documentation_url: None,
                category_id: Some(Uuid::new_v4()),
                tags: vec![],
                auth_type: AuthType::None,
                auth_description: None,
            })
            .await
            .unwrap();

        let loaded = AssemblyService::load_one(&store, api.id).await.unwrap();
        assert_eq!(loaded.data.api.id, api.id);
        assert!(loaded.data.category.is_none());
        assert!(loaded.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_load_one_not_found() {
        let store = InMemoryStore::new();

        let err = AssemblyService::load_one(&store, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
