use crate::domain::question::Question;
use crate::utils::error::Result;

/// Filters for listing questions. An empty query lists every public question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionQuery {
    pub theme: Option<String>,
    pub difficulty: Option<String>,
    pub include_private: bool,
    pub limit: Option<usize>,
}

impl QuestionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    pub fn include_private(mut self, include_private: bool) -> Self {
        self.include_private = include_private;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether `question` passes every filter except `limit`.
    pub fn matches(&self, question: &Question) -> bool {
        if question.is_private() && !self.include_private {
            return false;
        }
        if let Some(theme) = &self.theme {
            if question.theme() != theme {
                return false;
            }
        }
        if let Some(difficulty) = &self.difficulty {
            if question.difficulty() != Some(difficulty.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Access to the question store. Listing returns questions in store order.
pub trait QuestionsDao {
    fn get(&self, id: &str) -> Result<Option<Question>>;
    fn list(&self, query: &QuestionQuery) -> Result<Vec<Question>>;
    /// Stores `question` and returns its id, assigning one when absent.
    fn add(&mut self, question: Question) -> Result<String>;
    fn remove(&mut self, id: &str) -> Result<bool>;
}
