pub mod generator;

pub use crate::domain::ports::{QuestionQuery, QuestionsDao};
pub use crate::domain::question::Question;
pub use crate::domain::questionnaire::Questionnaire;
pub use crate::utils::error::Result;
pub use generator::QuestionnaireGenerator;
