use crate::application::{EvaluateIdea, LlmBackend};
use crate::config::AppConfig;
use crate::domain::{EvaluationOutcome, HistoryEntry, IdeaSubmission};
use crate::infrastructure::db::{create_connection, run_migrations, EvaluationRepository};
use crate::infrastructure::history::{HistoryStore, MemoryHistory};
use crate::infrastructure::security::{CostTracker, InputSanitizer, RateLimiter};
use ideanest_errors::AppError;
use std::net::IpAddr;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct AppContext {
    pub evaluate_idea: Arc<EvaluateIdea>,
    pub history: HistoryStore,
    pub rate_limiter: RateLimiter,
    pub cost_tracker: Arc<CostTracker>,
    pub min_description_chars: usize,
}

impl AppContext {
    pub fn new(backend: LlmBackend, history: HistoryStore, min_description_chars: usize) -> Self {
        Self {
            evaluate_idea: Arc::new(EvaluateIdea::new(backend, history.clone())),
            history,
            rate_limiter: RateLimiter::new(),
            cost_tracker: Arc::new(CostTracker::new()),
            min_description_chars,
        }
    }

    pub async fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let backend = LlmBackend::from_config(config)?;
        tracing::info!("Using {} backend", backend.describe());

        let history = match &config.database_url {
            Some(url) => {
                let db = create_connection(url)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                run_migrations(&db)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                HistoryStore::Postgres(EvaluationRepository::new(db))
            }
            None => {
                tracing::warn!("DATABASE_URL not set, evaluation history is kept in memory");
                HistoryStore::Memory(MemoryHistory::new())
            }
        };
        tracing::info!("History backend: {}", history.backend_name());

        Ok(Self::new(backend, history, config.min_description_chars))
    }

    pub fn validate_idea(&self, title: &str, description: &str) -> Result<IdeaSubmission, AppError> {
        InputSanitizer::validate_idea(title, description, self.min_description_chars)
    }

    /// Per-client limit first, then the shared daily budget.
    pub fn check_quota(&self, ip: IpAddr) -> Result<(), AppError> {
        self.rate_limiter.check_rate_limit(ip).map_err(|e| {
            tracing::warn!(%ip, "Rate limit hit: {}", e);
            AppError::from(e)
        })?;
        self.cost_tracker.check_and_increment().map_err(|e| {
            tracing::warn!("Daily budget hit: {}", e);
            AppError::from(e)
        })
    }

    /// Validates the submission, charges the caller's quota, then evaluates.
    /// A blank `user_id` means the result is not saved.
    pub async fn evaluate(
        &self,
        ip: IpAddr,
        title: &str,
        description: &str,
        user_id: Option<&str>,
    ) -> Result<EvaluationOutcome, AppError> {
        let submission = self.validate_idea(title, description)?;
        let owner = user_id
            .filter(|id| !id.trim().is_empty())
            .map(InputSanitizer::validate_user_id)
            .transpose()?;

        self.check_quota(ip)?;
        self.evaluate_idea.execute(submission, owner).await
    }

    pub async fn find_evaluation(&self, id: &str) -> Result<HistoryEntry, AppError> {
        let id = parse_id(id)?;
        self.history.get(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn history_for(&self, user_id: &str) -> Result<Vec<HistoryEntry>, AppError> {
        let user_id = InputSanitizer::validate_user_id(user_id)?;
        Ok(self.history.list_for_owner(&user_id).await?)
    }

    pub async fn delete_evaluation(&self, id: &str) -> Result<(), AppError> {
        let id = parse_id(id)?;
        if self.history.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }
}

fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id.trim()).map_err(|_| AppError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EvaluationRecord;
    use crate::infrastructure::gemini::GeminiClient;
    use serde_json::json;
    use std::net::Ipv4Addr;

    fn context() -> AppContext {
        let backend = LlmBackend::Gemini(GeminiClient::new("test-key".to_string(), None).unwrap());
        AppContext::new(backend, HistoryStore::Memory(MemoryHistory::new()), 150)
    }

    fn record() -> EvaluationRecord {
        EvaluationRecord::from_stored(json!({
            "pitchSummary": "p",
            "scores": { "innovation": 8, "feasibility": 7, "scalability": 9 }
        }))
        .unwrap()
    }

    fn localhost() -> IpAddr {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    }

    #[tokio::test]
    async fn test_short_description_rejected_before_quota() {
        let ctx = context();
        let err = ctx
            .evaluate(localhost(), "FarmCold", "too short", None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(ctx.cost_tracker.remaining_requests(), CostTracker::new().remaining_requests());
    }

    #[tokio::test]
    async fn test_invalid_owner_rejected() {
        let ctx = context();
        let description = "d".repeat(200);
        let err = ctx
            .evaluate(localhost(), "FarmCold", &description, Some("../admin"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_history_round_trip() {
        let ctx = context();
        let id = ctx.history.save("user_1", "FarmCold", "desc", record()).await.unwrap();

        let entry = ctx.find_evaluation(&id.to_string()).await.unwrap();
        assert_eq!(entry.idea_title, "FarmCold");
        assert_eq!(ctx.history_for("user_1").await.unwrap().len(), 1);

        ctx.delete_evaluation(&id.to_string()).await.unwrap();
        assert_eq!(ctx.find_evaluation(&id.to_string()).await, Err(AppError::NotFound));
        assert_eq!(ctx.delete_evaluation(&id.to_string()).await, Err(AppError::NotFound));
    }

    #[tokio::test]
    async fn test_unknown_ids() {
        let ctx = context();
        assert_eq!(ctx.find_evaluation("not-a-uuid").await, Err(AppError::NotFound));
        assert!(matches!(ctx.history_for(" ").await, Err(AppError::InvalidInput(_))));
    }
}
