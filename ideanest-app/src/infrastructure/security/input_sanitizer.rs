use crate::domain::IdeaSubmission;
use ideanest_errors::AppError;

const MAX_TITLE_CHARS: usize = 200;
const MAX_DESCRIPTION_CHARS: usize = 5000;
const MAX_USER_ID_CHARS: usize = 128;

const BLOCKED_KEYWORDS: &[&str] = &[
    "ignore previous",
    "ignore all",
    "disregard the above",
    "forget your",
    "new instructions",
    "system prompt",
    "you are now",
    "pretend to be",
    "jailbreak",
    "dan mode",
    "developer mode",
];

pub struct InputSanitizer;

impl InputSanitizer {
    pub fn validate_idea(
        title: &str,
        description: &str,
        min_description_chars: usize,
    ) -> Result<IdeaSubmission, AppError> {
        let title = title.trim();
        let description = description.trim();

        if title.is_empty() || description.is_empty() {
            return Err(AppError::InvalidInput(
                "Idea title and description are required".to_string(),
            ));
        }

        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(AppError::InvalidInput(format!(
                "Idea title must be at most {} characters",
                MAX_TITLE_CHARS
            )));
        }

        let description_chars = description.chars().count();
        if description_chars < min_description_chars {
            return Err(AppError::InvalidInput(format!(
                "Please describe your idea in at least {} characters ({} so far)",
                min_description_chars, description_chars
            )));
        }

        if description_chars > MAX_DESCRIPTION_CHARS {
            return Err(AppError::InvalidInput(format!(
                "Idea description must be at most {} characters",
                MAX_DESCRIPTION_CHARS
            )));
        }

        if Self::contains_injection_attempt(title) || Self::contains_injection_attempt(description) {
            tracing::warn!(title = %title, "Potential prompt injection detected in idea");
            return Err(AppError::InvalidInput(
                "Idea contains text that looks like instructions to the model".to_string(),
            ));
        }

        Ok(IdeaSubmission::new(title.to_string(), description.to_string()))
    }

    /// Owner ids travel in URLs, so only a conservative character set is accepted.
    pub fn validate_user_id(user_id: &str) -> Result<String, AppError> {
        let user_id = user_id.trim();

        if user_id.is_empty() {
            return Err(AppError::InvalidInput("User ID is required".to_string()));
        }

        if user_id.len() > MAX_USER_ID_CHARS {
            return Err(AppError::InvalidInput("User ID is too long".to_string()));
        }

        let valid = regex_lite::Regex::new(r"^[A-Za-z0-9_.@:-]+$")
            .map(|re| re.is_match(user_id))
            .unwrap_or(false);
        if !valid {
            return Err(AppError::InvalidInput(
                "User ID contains invalid characters".to_string(),
            ));
        }

        Ok(user_id.to_string())
    }

    fn contains_injection_attempt(input: &str) -> bool {
        let pattern = BLOCKED_KEYWORDS
            .iter()
            .map(|kw| regex_lite::escape(kw).replace(' ', r"\s+"))
            .collect::<Vec<_>>()
            .join("|");

        regex_lite::Regex::new(&format!("(?i){}", pattern))
            .map(|re| re.is_match(input))
            .unwrap_or(false)
    }
}
