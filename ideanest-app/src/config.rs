use ideanest_errors::AppError;
use std::str::FromStr;

/// Shortest accepted idea description, in characters, unless configured otherwise.
pub const DEFAULT_MIN_DESCRIPTION_CHARS: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Gemini,
    OpenRouter,
}

impl LlmProvider {
    pub fn api_key_var(self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_API_KEY",
            Self::OpenRouter => "OPENROUTER_API_KEY",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "openrouter" => Ok(Self::OpenRouter),
            other => Err(AppError::Internal(format!(
                "LLM_PROVIDER must be gemini or openrouter, got {other:?}"
            ))),
        }
    }
}

/// Runtime settings read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub provider: LlmProvider,
    pub api_key: String,
    pub model: Option<String>,
    pub database_url: Option<String>,
    pub min_description_chars: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let provider = match non_empty("LLM_PROVIDER") {
            Some(value) => value.parse()?,
            None => LlmProvider::Gemini,
        };

        let api_key = non_empty(provider.api_key_var()).ok_or_else(|| {
            AppError::Internal(format!("{} must be set", provider.api_key_var()))
        })?;

        let min_description_chars = match non_empty("MIN_DESCRIPTION_CHARS") {
            Some(value) => value.trim().parse().map_err(|_| {
                AppError::Internal(format!(
                    "MIN_DESCRIPTION_CHARS must be a whole number, got {value:?}"
                ))
            })?,
            None => DEFAULT_MIN_DESCRIPTION_CHARS,
        };

        Ok(Self {
            provider,
            api_key,
            model: non_empty("LLM_MODEL"),
            database_url: non_empty("DATABASE_URL"),
            min_description_chars,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_to_gemini() {
        let config = config(&[("GEMINI_API_KEY", "g-key")]).unwrap();
        assert_eq!(config.provider, LlmProvider::Gemini);
        assert_eq!(config.api_key, "g-key");
        assert_eq!(config.min_description_chars, DEFAULT_MIN_DESCRIPTION_CHARS);
        assert_eq!(config.database_url, None);
        assert_eq!(config.model, None);
    }

    #[test]
    fn test_openrouter_needs_its_own_key() {
        let err = config(&[("LLM_PROVIDER", "OpenRouter"), ("GEMINI_API_KEY", "g")]).unwrap_err();
        assert_eq!(err, AppError::Internal("OPENROUTER_API_KEY must be set".to_string()));

        let config = config(&[("LLM_PROVIDER", "openrouter"), ("OPENROUTER_API_KEY", "o")]).unwrap();
        assert_eq!(config.provider, LlmProvider::OpenRouter);
    }

    #[test]
    fn test_optional_values() {
        let config = config(&[
            ("GEMINI_API_KEY", "g"),
            ("LLM_MODEL", "gemini-2.5-pro"),
            ("DATABASE_URL", "postgres://localhost/ideanest"),
            ("MIN_DESCRIPTION_CHARS", " 40 "),
        ])
        .unwrap();

        assert_eq!(config.model.as_deref(), Some("gemini-2.5-pro"));
        assert!(config.database_url.is_some());
        assert_eq!(config.min_description_chars, 40);
    }

    #[test]
    fn test_invalid_values() {
        assert!(config(&[("LLM_PROVIDER", "claude"), ("GEMINI_API_KEY", "g")]).is_err());
        assert!(config(&[("GEMINI_API_KEY", "g"), ("MIN_DESCRIPTION_CHARS", "many")]).is_err());
        assert!(config(&[("GEMINI_API_KEY", "   ")]).is_err());
    }
}
