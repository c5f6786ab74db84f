use crate::adapters::memory::InMemoryQuestionsDao;
use crate::domain::difficulty::DifficultyScale;
use crate::domain::ports::QuestionsDao;
use crate::domain::question::{GradeRecord, Question};
use crate::utils::error::{ReprovaError, Result};
use serde::Deserialize;
use std::path::Path;

/// On-disk layout of a question bank: a list of `[[questions]]` tables.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionBank {
    #[serde(default)]
    pub questions: Vec<QuestionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionEntry {
    pub id: Option<String>,
    pub theme: String,
    pub description: String,
    pub statement: Option<String>,
    #[serde(default)]
    pub record: GradeRecord,
    #[serde(default)]
    pub private: bool,
    pub difficulty: Option<String>,
    #[serde(default)]
    pub estimated_time: u32,
}

impl QuestionEntry {
    fn into_question(self, scale: Option<DifficultyScale>) -> Result<Question> {
        let mut builder = Question::builder()
            .theme(self.theme)
            .description(self.description)
            .record(self.record)
            .private(self.private)
            .estimated_time(self.estimated_time);

        if let Some(id) = self.id {
            builder = builder.id(id);
        }
        if let Some(statement) = self.statement {
            builder = builder.statement(statement);
        }
        if let Some(difficulty) = self.difficulty {
            builder = builder.difficulty(difficulty);
        }
        if let Some(scale) = scale {
            builder = builder.difficulty_scale(scale);
        }

        builder.build()
    }
}

/// 從 TOML 檔案載入題庫
pub fn load_bank_file<P: AsRef<Path>>(
    path: P,
    scale: Option<DifficultyScale>,
) -> Result<InMemoryQuestionsDao> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    tracing::info!("Loading question bank {}", path.display());
    load_bank_str(&content, scale)
}

/// Parses a bank and validates every entry. `scale` labels entries that
/// carry grades but no explicit difficulty.
pub fn load_bank_str(content: &str, scale: Option<DifficultyScale>) -> Result<InMemoryQuestionsDao> {
    let bank: QuestionBank = toml::from_str(content)?;
    let mut dao = InMemoryQuestionsDao::new();

    for (index, entry) in bank.questions.into_iter().enumerate() {
        let question = entry.into_question(scale).map_err(|e| match e {
            ReprovaError::InvalidArgument { message } => ReprovaError::InvalidArgument {
                message: format!("question entry #{}: {}", index, message),
            },
            other => other,
        })?;
        dao.add(question)?;
    }

    tracing::info!("Loaded {} questions", dao.len());
    Ok(dao)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::QuestionQuery;

    const BANK: &str = r#"
[[questions]]
theme = "graphs"
description = "shortest path"
difficulty = "Hard"
estimated_time = 15

[[questions]]
id = "q-42"
theme = "sorting"
description = "stable sorts"
statement = "Which of these sorts are stable?"
estimated_time = 5

[questions.record."2024/1"]
alice = 90.0
bob = 80.0
"#;

    #[test]
    fn test_load_bank_str() {
        let dao = load_bank_str(BANK, Some(DifficultyScale::Three)).unwrap();
        assert_eq!(dao.len(), 2);

        let sorting = dao.get("q-42").unwrap().unwrap();
        assert_eq!(sorting.statement(), Some("Which of these sorts are stable?"));
        assert_eq!(sorting.average_grade(), Some(85.0));
        assert_eq!(sorting.difficulty(), Some("Easy"));

        let hard = dao.list(&QuestionQuery::new().difficulty("Hard")).unwrap();
        assert_eq!(hard.len(), 1);
        assert_eq!(hard[0].estimated_time(), 15);
    }

    #[test]
    fn test_without_scale_difficulty_stays_unset() {
        let dao = load_bank_str(BANK, None).unwrap();
        assert_eq!(dao.get("q-42").unwrap().unwrap().difficulty(), None);
    }

    #[test]
    fn test_invalid_entry_reports_index() {
        let err = load_bank_str(
            "[[questions]]\ntheme = \"\"\ndescription = \"empty theme\"\n",
            None,
        )
        .unwrap_err();

        assert!(err.to_string().contains("question entry #0"));
    }

    #[test]
    fn test_malformed_toml() {
        let result = load_bank_str("[[questions]\n", None);
        assert!(matches!(result, Err(ReprovaError::TomlError(_))));
    }
}
