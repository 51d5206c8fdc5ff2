use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::entity::endpoint::{self, ActiveModel, Column, Entity as EndpointEntity};
use crate::error::{AppError, AppResult};
use crate::models::{CreateEndpoint, Endpoint};
use crate::repositories::Repository;

/// Endpoint repository for documented routes of an API
pub struct EndpointRepository;

#[async_trait]
impl Repository<Endpoint> for EndpointRepository {
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<Endpoint> {
        let model = EndpointEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Endpoint".to_string()))?;

        Ok(model.into())
    }

    async fn find_all(db: &DatabaseConnection) -> AppResult<Vec<Endpoint>> {
        let models = EndpointEntity::find()
            .order_by_asc(Column::CreatedAt)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}

impl EndpointRepository {
    /// List endpoints for a specific API
    pub async fn list_by_api(db: &DatabaseConnection, api_id: Uuid) -> AppResult<Vec<Endpoint>> {
        let models = EndpointEntity::find()
            .filter(Column::ApiId.eq(api_id))
            .order_by_asc(Column::CreatedAt)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Insert a batch of endpoints for an API.
    /// The batch is all-or-nothing; earlier rows of the listing are not covered.
    pub async fn create_many(
        db: &DatabaseConnection,
        api_id: Uuid,
        inputs: &[CreateEndpoint],
    ) -> AppResult<Vec<Endpoint>> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let txn = db.begin().await?;
        let now = time::OffsetDateTime::now_utc();
        let mut created = Vec::with_capacity(inputs.len());

        for input in inputs {
            let model = ActiveModel {
                id: Set(Uuid::new_v4()),
                api_id: Set(api_id),
                method: Set(input.method.clone()),
                path: Set(input.path.clone()),
                description: Set(input.description.clone()),
                created_at: Set(now),
            };
            created.push(model.insert(&txn).await?.into());
        }

        txn.commit().await?;
        Ok(created)
    }
}

impl From<endpoint::Model> for Endpoint {
    fn from(m: endpoint::Model) -> Self {
        Self {
            id: m.id,
            api_id: m.api_id,
            method: m.method,
            path: m.path,
            description: m.description,
            created_at: m.created_at,
        }
    }
}
