use crate::domain::difficulty::{DifficultyScale, MAX_GRADE};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range};
use serde::Serialize;
use std::collections::BTreeMap;

/// Grades per semester, then per student.
pub type GradeRecord = BTreeMap<String, BTreeMap<String, f64>>;

/// A single assessment item of the bank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    theme: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    statement: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    record: GradeRecord,
    private: bool,
    difficulty: Option<String>,
    estimated_time: u32,
}

impl Question {
    pub fn builder() -> QuestionBuilder {
        QuestionBuilder::default()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn statement(&self) -> Option<&str> {
        self.statement.as_deref()
    }

    pub fn record(&self) -> &GradeRecord {
        &self.record
    }

    pub fn is_private(&self) -> bool {
        self.private
    }

    pub fn difficulty(&self) -> Option<&str> {
        self.difficulty.as_deref()
    }

    pub fn estimated_time(&self) -> u32 {
        self.estimated_time
    }

    /// Mean over every grade of every semester.
    pub fn average_grade(&self) -> Option<f64> {
        average_grade(&self.record)
    }

    /// Copy of this question stored under `id`.
    pub(crate) fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

fn average_grade(record: &GradeRecord) -> Option<f64> {
    let grades: Vec<f64> = record
        .values()
        .flat_map(|students| students.values().copied())
        .collect();

    if grades.is_empty() {
        None
    } else {
        Some(grades.iter().sum::<f64>() / grades.len() as f64)
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuestionBuilder {
    id: Option<String>,
    theme: Option<String>,
    description: Option<String>,
    statement: Option<String>,
    record: GradeRecord,
    private: bool,
    difficulty: Option<String>,
    estimated_time: u32,
    difficulty_scale: Option<DifficultyScale>,
}

impl QuestionBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn statement(mut self, statement: impl Into<String>) -> Self {
        self.statement = Some(statement.into());
        self
    }

    pub fn record(mut self, record: GradeRecord) -> Self {
        self.record = record;
        self
    }

    pub fn grade(
        mut self,
        semester: impl Into<String>,
        student: impl Into<String>,
        grade: f64,
    ) -> Self {
        self.record
            .entry(semester.into())
            .or_default()
            .insert(student.into(), grade);
        self
    }

    pub fn private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    pub fn difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    pub fn estimated_time(mut self, estimated_time: u32) -> Self {
        self.estimated_time = estimated_time;
        self
    }

    /// Derive the difficulty from the grade record when none is given.
    pub fn difficulty_scale(mut self, scale: DifficultyScale) -> Self {
        self.difficulty_scale = Some(scale);
        self
    }

    pub fn build(self) -> Result<Question> {
        let theme = self.theme.unwrap_or_default();
        validate_non_empty_string("theme", &theme)?;

        let description = self.description.unwrap_or_default();
        validate_non_empty_string("description", &description)?;

        for (semester, grades) in &self.record {
            for (student, grade) in grades {
                validate_range(
                    &format!("grade of '{}' in {}", student, semester),
                    *grade,
                    0.0,
                    MAX_GRADE,
                )?;
            }
        }

        let difficulty = match (self.difficulty, self.difficulty_scale) {
            (Some(explicit), _) => Some(explicit),
            (None, Some(scale)) => {
                average_grade(&self.record).map(|grade| scale.classify(grade).to_string())
            }
            (None, None) => None,
        };

        Ok(Question {
            id: self.id,
            theme,
            description,
            statement: self.statement,
            record: self.record,
            private: self.private,
            difficulty,
            estimated_time: self.estimated_time,
        })
    }
}
