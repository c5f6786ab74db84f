// Domain layer: questions, questionnaires and the store port.

pub mod difficulty;
pub mod ports;
pub mod question;
pub mod questionnaire;

pub use difficulty::{DifficultyScale, NEUTRAL_DIFFICULTY};
pub use ports::{QuestionQuery, QuestionsDao};
pub use question::{GradeRecord, Question, QuestionBuilder};
pub use questionnaire::{Questionnaire, QuestionnaireBuilder};
