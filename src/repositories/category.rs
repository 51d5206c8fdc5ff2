use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::entity::category::{self, Column, Entity as CategoryEntity};
use crate::error::{AppError, AppResult};
use crate::models::Category;
use crate::repositories::Repository;

/// Category repository. Categories are seeded by migrations and read-only here.
pub struct CategoryRepository;

#[async_trait]
impl Repository<Category> for CategoryRepository {
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<Category> {
        let model = CategoryEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Category".to_string()))?;

        Ok(model.into())
    }

    async fn find_all(db: &DatabaseConnection) -> AppResult<Vec<Category>> {
        let models = CategoryEntity::find()
            .order_by_asc(Column::Name)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}

impl From<category::Model> for Category {
    fn from(m: category::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            color: m.color,
        }
    }
}
