use serde::Deserialize;

/// How a question is answered.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum QuestionKind {
    /// Pick one of the listed options.
    MultipleChoice,
    /// Write the missing word; the answer can be revealed but is never scored.
    FillBlank,
    /// Any other kind from the data file, shown without interactive checking.
    Other(String),
}

impl From<String> for QuestionKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "multiple-choice" => Self::MultipleChoice,
            "fill-blank" => Self::FillBlank,
            _ => Self::Other(kind),
        }
    }
}

/// The expected answer, shaped by the question kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Index(usize),
    Indices(Vec<usize>),
    Text(String),
}

impl CorrectAnswer {
    /// Exact match of a single selected option against the expected answer.
    ///
    /// A set of indices only matches when it holds exactly that one option.
    pub fn matches_option(&self, selected: usize) -> bool {
        match self {
            Self::Index(index) => *index == selected,
            Self::Indices(indices) => indices.as_slice() == [selected],
            Self::Text(_) => false,
        }
    }

    /// Option indices named by this answer, if any.
    pub fn option_indices(&self) -> &[usize] {
        match self {
            Self::Index(index) => std::slice::from_ref(index),
            Self::Indices(indices) => indices,
            Self::Text(_) => &[],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub id: u32,
    #[serde(alias = "question")]
    pub prompt: String,
    #[serde(alias = "type")]
    pub kind: QuestionKind,
    #[serde(default, alias = "content")]
    pub body: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default, rename = "correctAnswer", alias = "answer")]
    pub correct_answer: Option<CorrectAnswer>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl Question {
    pub fn is_multiple_choice(&self) -> bool {
        self.kind == QuestionKind::MultipleChoice
    }

    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or_default()
    }

    /// Whether `index` is the (or one of the) expected options.
    pub fn is_correct_option(&self, index: usize) -> bool {
        self.correct_answer
            .as_ref()
            .is_some_and(|answer| answer.option_indices().contains(&index))
    }

    /// Human-readable form of the expected answer. Numbers only name options
    /// on multiple-choice questions; elsewhere they are the answer itself.
    pub fn answer_text(&self) -> Option<String> {
        let answer = self.correct_answer.as_ref()?;
        let text = match answer {
            CorrectAnswer::Text(text) => text.clone(),
            CorrectAnswer::Index(_) | CorrectAnswer::Indices(_) => answer
                .option_indices()
                .iter()
                .map(|&n| {
                    if !self.is_multiple_choice() {
                        return n.to_string();
                    }
                    match self.options().get(n) {
                        Some(option) => format!("{}. {}", n + 1, option),
                        None => format!("{}", n + 1),
                    }
                })
                .collect::<Vec<_>>()
                .join(", "),
        };
        Some(text)
    }
}
