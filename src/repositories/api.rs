use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::api::{self, ActiveModel, Column, Entity as ApiEntity};
use crate::error::{AppError, AppResult};
use crate::models::{Api, AuthType, CreateApi};
use crate::repositories::Repository;

/// API listing repository for database operations
pub struct ApiRepository;

#[async_trait]
impl Repository<Api> for ApiRepository {
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<Api> {
        let model = ApiEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Api".to_string()))?;

        Ok(model.into())
    }

    async fn find_all(db: &DatabaseConnection) -> AppResult<Vec<Api>> {
        let models = ApiEntity::find()
            .order_by_asc(Column::CreatedAt)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}

impl ApiRepository {
    /// Insert a new API row
    pub async fn create(db: &DatabaseConnection, input: &CreateApi) -> AppResult<Api> {
        let now = time::OffsetDateTime::now_utc();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name.clone()),
            description: Set(input.description.clone()),
            version: Set(input.version.clone()),
            owner: Set(input.owner.clone()),
            base_url: Set(input.base_url.clone()),
            documentation_url: Set(input.documentation_url.clone()),
            category_id: Set(input.category_id),
            tags: Set(input.tags.clone()),
            auth_type: Set(input.auth_type.as_str().to_string()),
            auth_description: Set(input.auth_description.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }
}

// Conversion from SeaORM model to our domain model
impl From<api::Model> for Api {
    fn from(m: api::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            version: m.version,
            owner: m.owner,
            base_url: m.base_url,
            documentation_url: m.documentation_url,
            category_id: m.category_id,
            tags: m.tags,
            auth_type: AuthType::from_stored(&m.auth_type),
            auth_description: m.auth_description,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
