use super::entities::{evaluation, Evaluation};
use crate::domain::{EvaluationRecord, HistoryEntry};
use ideanest_errors::AppError;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use uuid::Uuid;

#[derive(Clone)]
pub struct EvaluationRepository {
    db: DatabaseConnection,
}

impl EvaluationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, entry: &HistoryEntry) -> Result<evaluation::Model, DbErr> {
        let active = evaluation::ActiveModel {
            id: Set(entry.id),
            user_id: Set(entry.user_id.clone()),
            idea_title: Set(entry.idea_title.clone()),
            idea_description: Set(entry.idea_description.clone()),
            evaluation_data: Set(entry.evaluation.clone().into_value()),
            created_at: Set(Some(chrono::Utc::now())),
        };
        active.insert(&self.db).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<evaluation::Model>, DbErr> {
        Evaluation::find_by_id(id).one(&self.db).await
    }

    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<evaluation::Model>, DbErr> {
        Evaluation::find()
            .filter(evaluation::Column::UserId.eq(user_id))
            .order_by_desc(evaluation::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = Evaluation::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

impl TryFrom<evaluation::Model> for HistoryEntry {
    type Error = AppError;

    fn try_from(row: evaluation::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            idea_title: row.idea_title,
            idea_description: row.idea_description,
            evaluation: EvaluationRecord::from_stored(row.evaluation_data)?,
            created_at: row.created_at,
        })
    }
}
