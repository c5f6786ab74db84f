pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::InMemoryQuestionsDao;
pub use config::GenerationSettings;
pub use crate::core::generator::QuestionnaireGenerator;
pub use domain::{
    DifficultyScale, Question, QuestionBuilder, QuestionQuery, Questionnaire,
    QuestionnaireBuilder, QuestionsDao,
};
pub use utils::error::{ReprovaError, Result};
