use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaSubmission {
    pub title: String,
    pub description: String,
}

impl IdeaSubmission {
    pub fn new(title: String, description: String) -> Self {
        Self { title, description }
    }

    pub fn description_chars(&self) -> usize {
        self.description.chars().count()
    }
}
