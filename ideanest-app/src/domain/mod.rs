mod evaluation;
mod history_entry;
mod idea;

pub use evaluation::{
    Competitor, EvaluationRecord, MarketStrategy, PitchDeck, ProsConsImprovements,
    RefinedVersion, Scores, SwotAnalysis,
};
pub use history_entry::{EvaluationOutcome, HistoryEntry};
pub use idea::IdeaSubmission;

pub(crate) use evaluation::type_name;

pub mod fields {
    pub use super::evaluation::{
        BUSINESS_MODEL, EXISTING_SOLUTIONS, MARKET_POTENTIAL, PITCH_SUMMARY, PROBLEM_STATEMENT,
        PROPOSED_SOLUTION, PROS_CONS_IMPROVEMENTS, SCORES, SCORE_FIELDS, SWOT_ANALYSIS,
    };
}
