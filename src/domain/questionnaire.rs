use crate::domain::question::Question;
use crate::utils::error::{ReprovaError, Result};
use serde::Serialize;

/// An ordered collection of questions plus its summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Questionnaire {
    id: Option<String>,
    questions: Vec<Question>,
    total_estimated_time: u32,
    average_difficulty: Option<String>,
}

impl Questionnaire {
    pub fn builder() -> QuestionnaireBuilder {
        QuestionnaireBuilder::default()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total_estimated_time(&self) -> u32 {
        self.total_estimated_time
    }

    pub fn average_difficulty(&self) -> Option<&str> {
        self.average_difficulty.as_deref()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Assembles a questionnaire from explicit values. Nothing is derived:
/// time and difficulty are stored as given.
#[derive(Debug, Clone, Default)]
pub struct QuestionnaireBuilder {
    id: Option<String>,
    questions: Vec<Option<Question>>,
    total_estimated_time: u32,
    average_difficulty: Option<String>,
}

impl QuestionnaireBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Replaces the question list. Elements may be `Option<Question>` so
    /// that absent entries coming from callers are caught by `build`.
    pub fn questions<I, Q>(mut self, questions: I) -> Self
    where
        I: IntoIterator<Item = Q>,
        Q: Into<Option<Question>>,
    {
        self.questions = questions.into_iter().map(Into::into).collect();
        self
    }

    pub fn question(mut self, question: impl Into<Option<Question>>) -> Self {
        self.questions.push(question.into());
        self
    }

    pub fn total_estimated_time(mut self, total_estimated_time: u32) -> Self {
        self.total_estimated_time = total_estimated_time;
        self
    }

    pub fn average_difficulty(mut self, average_difficulty: impl Into<String>) -> Self {
        self.average_difficulty = Some(average_difficulty.into());
        self
    }

    pub fn build(self) -> Result<Questionnaire> {
        let questions = self
            .questions
            .into_iter()
            .enumerate()
            .map(|(index, question)| {
                question.ok_or_else(|| {
                    ReprovaError::invalid_argument(format!(
                        "question #{} of the questionnaire is absent",
                        index
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Questionnaire {
            id: self.id,
            questions,
            total_estimated_time: self.total_estimated_time,
            average_difficulty: self.average_difficulty,
        })
    }
}
