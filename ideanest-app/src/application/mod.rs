mod evaluate_idea;

pub use evaluate_idea::{interpret_completion, EvaluateIdea, LlmBackend};
