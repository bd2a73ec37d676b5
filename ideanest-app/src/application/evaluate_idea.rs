use crate::config::{AppConfig, LlmProvider};
use crate::domain::{EvaluationOutcome, EvaluationRecord, IdeaSubmission};
use crate::infrastructure::gemini::GeminiClient;
use crate::infrastructure::history::HistoryStore;
use crate::infrastructure::openrouter::OpenRouterClient;
use crate::infrastructure::prompt::build_evaluation_prompt;
use crate::normalizer::{normalize_traced, Level, NormalizationFailure, Recovery, RequiredFields};
use ideanest_errors::AppError;

pub enum LlmBackend {
    Gemini(GeminiClient),
    OpenRouter(OpenRouterClient),
}

impl LlmBackend {
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let api_key = config.api_key.clone();
        let model = config.model.clone();

        Ok(match config.provider {
            LlmProvider::Gemini => Self::Gemini(GeminiClient::new(api_key, model)?),
            LlmProvider::OpenRouter => Self::OpenRouter(OpenRouterClient::new(api_key, model)?),
        })
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Gemini(client) => format!("gemini ({})", client.model()),
            Self::OpenRouter(client) => format!("openrouter ({})", client.model()),
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String, AppError> {
        match self {
            Self::Gemini(client) => client.complete(prompt).await,
            Self::OpenRouter(client) => client.complete(prompt).await,
        }
    }
}

pub struct EvaluateIdea {
    backend: LlmBackend,
    history: HistoryStore,
    required: RequiredFields,
}

impl EvaluateIdea {
    pub fn new(backend: LlmBackend, history: HistoryStore) -> Self {
        Self {
            backend,
            history,
            required: RequiredFields::evaluation(),
        }
    }

    /// Evaluates one idea and, when `owner` is given, records it in that
    /// owner's history.
    pub async fn execute(
        &self,
        submission: IdeaSubmission,
        owner: Option<String>,
    ) -> Result<EvaluationOutcome, AppError> {
        tracing::info!(
            title = %submission.title,
            description_chars = submission.description_chars(),
            "Evaluating idea"
        );

        let prompt = build_evaluation_prompt(&submission);
        let completion = self.backend.complete(&prompt).await?;
        let evaluation = interpret_completion(&completion, &self.required)?;

        let evaluation_id = match owner {
            Some(user_id) => Some(
                self.history
                    .save(
                        &user_id,
                        &submission.title,
                        &submission.description,
                        evaluation.clone(),
                    )
                    .await?,
            ),
            None => None,
        };

        Ok(EvaluationOutcome {
            evaluation,
            evaluation_id,
        })
    }
}

/// Normalizes a provider completion, logging how it went. Failures surface as
/// [`AppError::Normalization`]; the diagnostics only reach the log.
pub fn interpret_completion(
    completion: &str,
    required: &RequiredFields,
) -> Result<EvaluationRecord, AppError> {
    if completion.trim().is_empty() {
        return Err(AppError::LlmProvider("empty completion".to_string()));
    }

    match normalize_traced(completion, required) {
        Ok(normalized) => {
            if normalized.recovery != Recovery::Direct {
                tracing::info!(
                    recovery = ?normalized.recovery,
                    completion_chars = completion.len(),
                    "Completion needed recovery before it parsed"
                );
            }
            for diagnostic in &normalized.diagnostics {
                tracing::debug!("{}", diagnostic);
            }
            Ok(normalized.record)
        }
        Err(failure) => {
            log_failure(&failure, completion);
            Err(AppError::Normalization(failure.to_string()))
        }
    }
}

fn log_failure(failure: &NormalizationFailure, completion: &str) {
    tracing::error!(
        stage = %failure.stage(),
        missing = ?failure.missing_fields(),
        invalid = ?failure.invalid_fields(),
        completion_chars = completion.len(),
        "Completion could not be normalized: {}",
        failure
    );

    for diagnostic in failure.diagnostics() {
        match diagnostic.level {
            Level::Debug => tracing::debug!("{}", diagnostic),
            Level::Info => tracing::info!("{}", diagnostic),
            Level::Warn => tracing::warn!("{}", diagnostic),
        }
    }

    let head: String = completion.chars().take(200).collect();
    tracing::debug!(head = %head, "Start of rejected completion");
}
