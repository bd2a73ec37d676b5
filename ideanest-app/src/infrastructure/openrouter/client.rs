use super::types::{ChatCompletionRequest, ChatCompletionResponse};
use ideanest_errors::AppError;
use std::time::Duration;

const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-chat";
const MAX_TOKENS: u32 = 8192;
const REQUEST_TIMEOUT_SECS: u64 = 120;

pub struct OpenRouterClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenRouterClient {
    pub fn new(api_key: String, model: Option<String>) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn complete(&self, prompt: &str) -> Result<String, AppError> {
        let request = ChatCompletionRequest::new(&self.model, prompt.to_string(), MAX_TOKENS);

        let response = self
            .http_client
            .post(OPENROUTER_API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("HTTP-Referer", "https://ideanest.local")
            .header("X-Title", "IdeaNest")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout
                } else {
                    AppError::LlmProvider(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("OpenRouter error: {} - {}", status, body);
            return Err(AppError::LlmProvider(format!("API error: {}", status)));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::LlmProvider(e.to_string()))?;

        match completion.first_text() {
            Some(text) => Ok(text.to_string()),
            None => {
                tracing::error!(
                    finish_reason = ?completion.finish_reason(),
                    "OpenRouter response has no text"
                );
                Err(AppError::LlmProvider("No response from AI".to_string()))
            }
        }
    }
}
