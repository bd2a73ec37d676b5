pub mod evaluation;

pub use evaluation::Entity as Evaluation;
