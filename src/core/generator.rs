use crate::config::settings::GenerationSettings;
use crate::core::{Question, QuestionQuery, Questionnaire, QuestionsDao};
use crate::domain::difficulty::{DifficultyScale, NEUTRAL_DIFFICULTY};
use crate::utils::error::{ReprovaError, Result};

/// Builds questionnaires by sampling a question store.
///
/// Sampling is deterministic: within a difficulty bucket questions are taken
/// in store order. With difficulty groups disabled the whole store is a
/// single bucket.
#[derive(Debug, Clone, Default)]
pub struct QuestionnaireGenerator {
    id: Option<String>,
    total_estimated_time: Option<u32>,
    average_difficulty: Option<String>,
    questions_count: Option<usize>,
}

impl QuestionnaireGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only logged: a generated questionnaire is unsaved and has no id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Upper bound on the summed estimated time of the picked questions.
    pub fn total_estimated_time(mut self, total_estimated_time: u32) -> Self {
        self.total_estimated_time = Some(total_estimated_time);
        self
    }

    pub fn average_difficulty(mut self, average_difficulty: impl Into<String>) -> Self {
        self.average_difficulty = Some(average_difficulty.into());
        self
    }

    pub fn questions_count(mut self, questions_count: usize) -> Self {
        self.questions_count = Some(questions_count);
        self
    }

    pub fn generate<D>(&self, dao: &D, settings: &GenerationSettings) -> Result<Questionnaire>
    where
        D: QuestionsDao + ?Sized,
    {
        let count = self
            .questions_count
            .unwrap_or(settings.default_questions_count);

        if let Some(id) = &self.id {
            tracing::debug!("Ignoring requested id {} for an unsaved questionnaire", id);
        }

        let mut selection = Selection::new(count, self.total_estimated_time);

        let average_difficulty = if settings.difficulty_groups_enabled {
            let scale = settings.scale()?;
            self.sample_by_difficulty(dao, scale, &mut selection)?
        } else {
            let pool = dao.list(&QuestionQuery::new())?;
            let taken = selection.take(pool, count);
            tracing::debug!("Took {} of {} questions in store order", taken, count);

            self.average_difficulty
                .clone()
                .or_else(|| (!selection.is_empty()).then(|| NEUTRAL_DIFFICULTY.to_string()))
        };

        if selection.len() < count {
            tracing::warn!(
                "Question store could only provide {} of {} requested questions",
                selection.len(),
                count
            );
        }

        let mut builder = Questionnaire::builder()
            .questions(selection.questions)
            .total_estimated_time(selection.total_time);
        if let Some(average_difficulty) = average_difficulty {
            builder = builder.average_difficulty(average_difficulty);
        }
        let questionnaire = builder.build()?;

        tracing::info!(
            "Generated questionnaire: {} questions, {} time units, difficulty {:?}",
            questionnaire.len(),
            questionnaire.total_estimated_time(),
            questionnaire.average_difficulty()
        );

        Ok(questionnaire)
    }

    fn sample_by_difficulty<D>(
        &self,
        dao: &D,
        scale: DifficultyScale,
        selection: &mut Selection,
    ) -> Result<Option<String>>
    where
        D: QuestionsDao + ?Sized,
    {
        let target = match &self.average_difficulty {
            Some(label) => Some(scale.position(label).ok_or_else(|| {
                ReprovaError::invalid_argument(format!(
                    "'{}' is not one of the difficulties {}",
                    label,
                    scale.labels().join(", ")
                ))
            })?),
            None => None,
        };

        let quotas = bucket_quotas(scale, selection.wanted, target);
        let mut shortfall = 0;

        for index in scale.priority_from(target.unwrap_or_else(|| scale.middle())) {
            let wanted = quotas[index] + shortfall;
            if wanted == 0 {
                continue;
            }

            let label = scale.labels()[index];
            let pool = dao.list(&QuestionQuery::new().difficulty(label))?;
            let available = pool.len();
            let taken = selection.take(pool, wanted);
            shortfall = wanted - taken;

            tracing::debug!(
                "Bucket {}: wanted {}, took {} of {} available",
                label,
                wanted,
                taken,
                available
            );
        }

        let average = match &self.average_difficulty {
            Some(label) => Some(label.clone()),
            None => scale
                .average_of(selection.questions.iter().filter_map(|q| q.difficulty()))
                .map(str::to_string),
        };

        Ok(average)
    }
}

/// Splits `count` across the buckets of `scale`. A target bucket gets
/// everything; otherwise the split is even and the remainder goes to the
/// buckets closest to the middle.
fn bucket_quotas(scale: DifficultyScale, count: usize, target: Option<usize>) -> Vec<usize> {
    let groups = scale.groups();
    let mut quotas = vec![0; groups];

    match target {
        Some(index) => quotas[index] = count,
        None => {
            quotas.iter_mut().for_each(|quota| *quota = count / groups);
            for index in scale
                .priority_from(scale.middle())
                .into_iter()
                .take(count % groups)
            {
                quotas[index] += 1;
            }
        }
    }

    quotas
}

struct Selection {
    questions: Vec<Question>,
    total_time: u32,
    budget: Option<u32>,
    wanted: usize,
}

impl Selection {
    fn new(wanted: usize, budget: Option<u32>) -> Self {
        Self {
            questions: Vec::new(),
            total_time: 0,
            budget,
            wanted,
        }
    }

    fn len(&self) -> usize {
        self.questions.len()
    }

    fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Takes up to `quota` questions from `pool` in order, skipping the ones
    /// that would overflow the time budget. Returns how many were taken.
    fn take(&mut self, pool: Vec<Question>, quota: usize) -> usize {
        let mut taken = 0;

        for question in pool {
            if taken == quota || self.len() == self.wanted {
                break;
            }

            let total = self.total_time.saturating_add(question.estimated_time());
            if self.budget.is_some_and(|budget| total > budget) {
                continue;
            }

            self.total_time = total;
            self.questions.push(question);
            taken += 1;
        }

        taken
    }
}
