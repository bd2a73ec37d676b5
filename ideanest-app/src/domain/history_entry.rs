use super::EvaluationRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: uuid::Uuid,
    pub user_id: String,
    pub idea_title: String,
    pub idea_description: String,
    #[serde(rename = "evaluationData")]
    pub evaluation: EvaluationRecord,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl HistoryEntry {
    pub fn new(
        user_id: String,
        idea_title: String,
        idea_description: String,
        evaluation: EvaluationRecord,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            user_id,
            idea_title,
            idea_description,
            evaluation,
            created_at: None,
        }
    }
}

/// Evaluation result returned to the caller, with the history id when the
/// evaluation was saved for an owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationOutcome {
    pub evaluation: EvaluationRecord,
    pub evaluation_id: Option<uuid::Uuid>,
}
