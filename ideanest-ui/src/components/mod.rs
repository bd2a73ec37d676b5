mod error_display;
mod evaluation_report;
mod idea_form;
mod loading_spinner;

pub use error_display::ErrorDisplay;
pub use evaluation_report::EvaluationReport;
pub use idea_form::IdeaForm;
pub use loading_spinner::LoadingSpinner;
