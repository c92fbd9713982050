mod category;
mod question;

pub use category::{Category, CATEGORIES};
pub use question::{CorrectAnswer, Question, QuestionKind};
