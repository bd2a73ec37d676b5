//! Evaluation history, backed by Postgres or kept in memory.

mod memory;

pub use memory::MemoryHistory;

use super::db::EvaluationRepository;
use crate::domain::{EvaluationRecord, HistoryEntry};
use ideanest_errors::AppError;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("stored evaluation {id} is unreadable: {reason}")]
    Corrupt { id: Uuid, reason: String },
}

impl From<HistoryError> for AppError {
    fn from(err: HistoryError) -> Self {
        tracing::error!("History store failed: {}", err);
        AppError::Database(err.to_string())
    }
}

#[derive(Clone)]
pub enum HistoryStore {
    Postgres(EvaluationRepository),
    Memory(MemoryHistory),
}

impl HistoryStore {
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    pub async fn save(
        &self,
        user_id: &str,
        idea_title: &str,
        idea_description: &str,
        evaluation: EvaluationRecord,
    ) -> Result<Uuid, HistoryError> {
        let entry = HistoryEntry::new(
            user_id.to_string(),
            idea_title.to_string(),
            idea_description.to_string(),
            evaluation,
        );

        let id = match self {
            Self::Postgres(repo) => repo.create(&entry).await?.id,
            Self::Memory(memory) => memory.insert(entry),
        };

        tracing::info!(evaluation_id = %id, user_id = %user_id, "Saved evaluation to history");
        Ok(id)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<HistoryEntry>, HistoryError> {
        match self {
            Self::Postgres(repo) => match repo.find_by_id(id).await? {
                Some(row) => Ok(Some(into_entry(row)?)),
                None => Ok(None),
            },
            Self::Memory(memory) => Ok(memory.get(id)),
        }
    }

    /// Every entry saved for `user_id`, newest first.
    pub async fn list_for_owner(&self, user_id: &str) -> Result<Vec<HistoryEntry>, HistoryError> {
        match self {
            Self::Postgres(repo) => repo
                .find_by_user(user_id)
                .await?
                .into_iter()
                .map(into_entry)
                .collect(),
            Self::Memory(memory) => Ok(memory.for_user(user_id)),
        }
    }

    /// Returns whether an entry existed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, HistoryError> {
        let removed = match self {
            Self::Postgres(repo) => repo.delete(id).await?,
            Self::Memory(memory) => memory.remove(id),
        };

        if removed {
            tracing::info!(evaluation_id = %id, "Deleted evaluation");
        }
        Ok(removed)
    }
}

fn into_entry(
    row: super::db::entities::evaluation::Model,
) -> Result<HistoryEntry, HistoryError> {
    let id = row.id;
    HistoryEntry::try_from(row).map_err(|e| HistoryError::Corrupt {
        id,
        reason: e.to_string(),
    })
}
