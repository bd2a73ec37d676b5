use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: MessageContent,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MessageContent {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionRequest {
    pub fn new(model: &str, prompt: String, max_tokens: u32) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt,
            }],
            max_tokens,
            temperature: 0.7,
            response_format: ResponseFormat {
                kind: "json_object".to_string(),
            },
        }
    }
}

impl ChatCompletionResponse {
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()?
            .message
            .content
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.choices.first()?.finish_reason.as_deref()
    }
}
