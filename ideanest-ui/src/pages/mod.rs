mod evaluation;
mod history;
mod home;

pub use evaluation::{DeleteEvaluationFn, EvaluationPage, GetEvaluationFn};
pub use history::{GetHistoryFn, HistoryPage};
pub use home::{HomePage, MinDescriptionCharsFn};
