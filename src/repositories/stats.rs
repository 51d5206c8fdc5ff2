use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entity::stats::{self, ActiveModel, Column, Entity as StatsEntity};
use crate::error::{AppError, AppResult};
use crate::models::{ApiStats, CreateStats};
use crate::repositories::Repository;

/// Usage statistics repository (at most one row per API)
pub struct StatsRepository;

#[async_trait]
impl Repository<ApiStats> for StatsRepository {
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<ApiStats> {
        let model = StatsEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Stats".to_string()))?;

        Ok(model.into())
    }

    async fn find_all(db: &DatabaseConnection) -> AppResult<Vec<ApiStats>> {
        let models = StatsEntity::find().all(db).await?;
        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}

impl StatsRepository {
    /// Find the stats row of an API, if any
    pub async fn find_by_api(db: &DatabaseConnection, api_id: Uuid) -> AppResult<Option<ApiStats>> {
        let model = StatsEntity::find()
            .filter(Column::ApiId.eq(api_id))
            .one(db)
            .await?;

        Ok(model.map(|m| m.into()))
    }

    /// Insert the stats row for an API
    pub async fn create(
        db: &DatabaseConnection,
        api_id: Uuid,
        input: &CreateStats,
    ) -> AppResult<ApiStats> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            api_id: Set(api_id),
            total_calls: Set(input.total_calls),
            last_week_calls: Set(input.last_week_calls),
            uptime: Set(input.uptime),
            avg_response_time: Set(input.avg_response_time),
            last_updated: Set(time::OffsetDateTime::now_utc()),
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }
}

impl From<stats::Model> for ApiStats {
    fn from(m: stats::Model) -> Self {
        Self {
            id: m.id,
            api_id: m.api_id,
            total_calls: m.total_calls,
            last_week_calls: m.last_week_calls,
            uptime: m.uptime,
            avg_response_time: m.avg_response_time,
            last_updated: m.last_updated,
        }
    }
}
