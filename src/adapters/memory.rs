use crate::domain::difficulty::DifficultyScale;
use crate::domain::ports::{QuestionQuery, QuestionsDao};
use crate::domain::question::Question;
use crate::utils::error::Result;

/// Vec-backed question store. Ids are assigned sequentially on `add`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuestionsDao {
    questions: Vec<Question>,
    next_id: u64,
}

impl InMemoryQuestionsDao {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding `per_bucket` public questions for every label of
    /// `scale`, each taking `estimated_time`.
    pub fn seeded(scale: DifficultyScale, per_bucket: usize, estimated_time: u32) -> Result<Self> {
        let mut dao = Self::new();

        for label in scale.labels() {
            for n in 1..=per_bucket {
                let question = Question::builder()
                    .theme(format!("{} theme", label))
                    .description(format!("{} question {}", label, n))
                    .difficulty(*label)
                    .estimated_time(estimated_time)
                    .build()?;
                dao.add(question)?;
            }
        }

        Ok(dao)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    fn next_free_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let candidate = self.next_id.to_string();
            if !self.questions.iter().any(|q| q.id() == Some(candidate.as_str())) {
                return candidate;
            }
        }
    }
}

impl QuestionsDao for InMemoryQuestionsDao {
    fn get(&self, id: &str) -> Result<Option<Question>> {
        Ok(self.questions.iter().find(|q| q.id() == Some(id)).cloned())
    }

    fn list(&self, query: &QuestionQuery) -> Result<Vec<Question>> {
        let matching = self.questions.iter().filter(|q| query.matches(q)).cloned();

        Ok(match query.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        })
    }

    /// Adding a question whose id is already stored replaces it in place.
    fn add(&mut self, question: Question) -> Result<String> {
        let question = match question.id() {
            Some(_) => question,
            None => {
                let id = self.next_free_id();
                question.with_id(id)
            }
        };
        let id = question.id().unwrap_or_default().to_string();

        match self.questions.iter_mut().find(|q| q.id() == Some(id.as_str())) {
            Some(existing) => {
                tracing::debug!("Replacing question {}", id);
                *existing = question;
            }
            None => self.questions.push(question),
        }

        Ok(id)
    }

    fn remove(&mut self, id: &str) -> Result<bool> {
        let before = self.questions.len();
        self.questions.retain(|q| q.id() != Some(id));
        Ok(self.questions.len() < before)
    }
}
