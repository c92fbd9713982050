mod loader;

pub use loader::{load_bank_from_json, LoadError, QuizBank, DEFAULT_BANK_PATH};
