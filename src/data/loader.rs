use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::Question;

pub const DEFAULT_BANK_PATH: &str = "quiz_bank.json";

/// Errors raised while reading or validating a question bank file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} must contain at least one quiz set", path.display())]
    Empty { path: PathBuf },

    #[error("quiz set '{category}' has more than one question with id {id}")]
    DuplicateId { category: String, id: u32 },

    #[error("multiple-choice question {id} in quiz set '{category}' has no options")]
    MissingOptions { category: String, id: u32 },

    #[error("question {id} in quiz set '{category}' names option {index}, which does not exist")]
    AnswerOutOfRange {
        category: String,
        id: u32,
        index: usize,
    },
}

#[derive(Deserialize)]
struct BankFile {
    #[serde(rename = "quizSets")]
    quiz_sets: BTreeMap<String, Vec<Question>>,
}

/// Read-only mapping from category identifier to its ordered questions.
#[derive(Debug, Clone, Default)]
pub struct QuizBank {
    sets: BTreeMap<String, Vec<Question>>,
}

impl QuizBank {
    /// Build a bank from already parsed sets, applying the same checks as file loading.
    pub fn from_sets(sets: BTreeMap<String, Vec<Question>>) -> Result<Self, LoadError> {
        for (category, questions) in &sets {
            validate_set(category, questions)?;
        }
        Ok(Self { sets })
    }

    /// Questions for `category`, empty when the bank has no such set.
    pub fn questions(&self, category: &str) -> &[Question] {
        self.sets.get(category).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

pub fn load_bank_from_json<P: AsRef<Path>>(path: P) -> Result<QuizBank, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let file: BankFile = serde_json::from_str(&json_content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if file.quiz_sets.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let bank = QuizBank::from_sets(file.quiz_sets)?;
    info!(path = %path.display(), sets = bank.len(), "question bank loaded");
    Ok(bank)
}

fn validate_set(category: &str, questions: &[Question]) -> Result<(), LoadError> {
    let mut seen = HashSet::with_capacity(questions.len());

    for question in questions {
        if !seen.insert(question.id) {
            return Err(LoadError::DuplicateId {
                category: category.to_string(),
                id: question.id,
            });
        }

        if question.is_multiple_choice() && question.options().is_empty() {
            return Err(LoadError::MissingOptions {
                category: category.to_string(),
                id: question.id,
            });
        }

        if let Some(answer) = question.correct_answer.as_ref().filter(|_| question.is_multiple_choice()) {
            let option_count = question.options().len();
            if let Some(&index) = answer
                .option_indices()
                .iter()
                .find(|&&index| index >= option_count)
            {
                return Err(LoadError::AnswerOutOfRange {
                    category: category.to_string(),
                    id: question.id,
                    index,
                });
            }
        }
    }

    debug!(category, questions = questions.len(), "quiz set validated");
    Ok(())
}
