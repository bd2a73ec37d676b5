use super::types::{GenerateContentRequest, GenerateContentResponse};
use ideanest_errors::AppError;
use std::time::Duration;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const MAX_OUTPUT_TOKENS: u32 = 16384;
const REQUEST_TIMEOUT_SECS: u64 = 120;

pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
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

    /// Sends one prompt and returns the raw completion text.
    pub async fn complete(&self, prompt: &str) -> Result<String, AppError> {
        let url = format!("{}/{}:generateContent", GEMINI_API_BASE, self.model);
        let request = GenerateContentRequest::new(prompt.to_string(), MAX_OUTPUT_TOKENS);

        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "Sending Gemini request");

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
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
            tracing::error!("Gemini error: {} - {}", status, body);
            return Err(AppError::LlmProvider(format!("API error: {}", status)));
        }

        let completion: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::LlmProvider(e.to_string()))?;

        match completion.first_text() {
            Some(text) => {
                tracing::debug!(
                    chars = text.len(),
                    finish_reason = ?completion.finish_reason(),
                    "Received Gemini completion"
                );
                Ok(text.to_string())
            }
            None => {
                tracing::error!(
                    finish_reason = ?completion.finish_reason(),
                    prompt_feedback = ?completion.prompt_feedback,
                    "Gemini response has no text"
                );
                Err(AppError::LlmProvider("No text in Gemini response".to_string()))
            }
        }
    }
}
