pub mod db;
pub mod gemini;
pub mod history;
pub mod openrouter;
pub mod prompt;
pub mod security;
