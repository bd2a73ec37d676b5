use serde::{Deserialize, Serialize};
use std::str::FromStr;

const RETRY_MESSAGE: &str = "We could not generate your evaluation. Please try again.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("LLM provider failed: {0}")]
    LlmProvider(String),

    #[error("Could not normalize completion: {0}")]
    Normalization(String),

    #[error("Evaluation not found")]
    NotFound,

    #[error("Request timeout")]
    Timeout,

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FromStr for AppError {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let detail = |prefix: &str| s.strip_prefix(prefix).unwrap_or(s).to_string();

        if s.starts_with("Invalid input") {
            Ok(AppError::InvalidInput(detail("Invalid input: ")))
        } else if s.starts_with("LLM provider failed") {
            Ok(AppError::LlmProvider(detail("LLM provider failed: ")))
        } else if s.starts_with("Could not normalize") {
            Ok(AppError::Normalization(detail("Could not normalize completion: ")))
        } else if s.starts_with("Rate limited") {
            Ok(AppError::RateLimited(detail("Rate limited: ")))
        } else if s.starts_with("Database error") {
            Ok(AppError::Database(detail("Database error: ")))
        } else if s == AppError::NotFound.to_string() {
            Ok(AppError::NotFound)
        } else if s == AppError::Timeout.to_string() {
            Ok(AppError::Timeout)
        } else {
            Ok(AppError::Internal(detail("Internal error: ")))
        }
    }
}

impl AppError {
    /// Text that is safe to show to the end user. Provider and normalization
    /// details stay in the logs.
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidInput(msg) => msg,
            Self::RateLimited(msg) => msg,
            Self::LlmProvider(_) | Self::Normalization(_) => RETRY_MESSAGE,
            Self::NotFound => "That evaluation does not exist.",
            Self::Timeout => "The request took too long. Please try again.",
            Self::Database(_) => "Your history is unavailable right now. Please try again later.",
            Self::Internal(_) => "Something went wrong on our side. Please try again later.",
        }
    }
}

#[cfg(feature = "ssr")]
mod ssr_impl {
    use super::AppError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    #[derive(serde::Serialize)]
    struct ErrorResponse {
        success: bool,
        error: String,
    }

    impl AppError {
        pub fn status_code(&self) -> StatusCode {
            match self {
                AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                AppError::LlmProvider(_) => StatusCode::BAD_GATEWAY,
                AppError::Normalization(_) => StatusCode::BAD_GATEWAY,
                AppError::NotFound => StatusCode::NOT_FOUND,
                AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                AppError::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
                AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let body = ErrorResponse {
                success: false,
                error: self.user_message().to_string(),
            };
            (self.status_code(), Json(body)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trips_through_from_str() {
        let errors = [
            AppError::InvalidInput("title is required".to_string()),
            AppError::LlmProvider("API error: 503".to_string()),
            AppError::Normalization("missing scores.feasibility".to_string()),
            AppError::RateLimited("wait 30 seconds".to_string()),
            AppError::Database("connection refused".to_string()),
            AppError::Internal("pool closed".to_string()),
            AppError::NotFound,
            AppError::Timeout,
        ];

        for err in errors {
            let parsed: AppError = err.to_string().parse().unwrap();
            assert_eq!(parsed, err);
        }
    }

    #[test]
    fn test_phrases_inside_details_do_not_change_the_variant() {
        let errors = [
            AppError::Internal("relation not found".to_string()),
            AppError::Internal("upstream timeout".to_string()),
        ];

        for err in errors {
            let parsed: AppError = err.to_string().parse().unwrap();
            assert_eq!(parsed, err);
        }
    }

    #[test]
    fn test_provider_and_normalization_details_stay_hidden() {
        let normalization = AppError::Normalization("stage=parse: EOF while parsing".to_string());
        let provider = AppError::LlmProvider("API error: 500 Internal Server Error".to_string());

        assert_eq!(normalization.user_message(), RETRY_MESSAGE);
        assert_eq!(provider.user_message(), RETRY_MESSAGE);
        assert!(!normalization.user_message().contains("EOF"));
    }

    #[test]
    fn test_invalid_input_is_shown_verbatim() {
        let err = AppError::InvalidInput("Idea description must be at least 150 characters".to_string());
        assert_eq!(err.user_message(), "Idea description must be at least 150 characters");
    }
}
