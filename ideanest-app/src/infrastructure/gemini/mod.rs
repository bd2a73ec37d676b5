mod client;
mod types;

pub use client::{GeminiClient, DEFAULT_MODEL};
