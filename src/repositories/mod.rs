pub mod api;
pub mod category;
pub mod endpoint;
pub mod stats;

pub use api::ApiRepository;
pub use category::CategoryRepository;
pub use endpoint::EndpointRepository;
pub use stats::StatsRepository;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::error::AppResult;

/// Base repository trait for the read side shared by every collection
#[async_trait]
pub trait Repository<T>
where
    T: Send + Sync,
{
    /// Find entity by ID
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<T>;

    /// Fetch every row of the collection
    async fn find_all(db: &DatabaseConnection) -> AppResult<Vec<T>>;
}
