use crate::utils::error::{ReprovaError, Result};

/// Middle label of every scale; also used when difficulty groups are disabled.
pub const NEUTRAL_DIFFICULTY: &str = "Average";

/// Highest grade a student can get on a question.
pub const MAX_GRADE: f64 = 100.0;

const THREE_GROUPS: [&str; 3] = ["Easy", "Average", "Hard"];
const FIVE_GROUPS: [&str; 5] = ["Very Easy", "Easy", "Average", "Hard", "Very Hard"];

/// The set of difficulty buckets questions are grouped by, easiest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DifficultyScale {
    #[default]
    Three,
    Five,
}

impl DifficultyScale {
    pub fn from_groups(groups: usize) -> Result<Self> {
        match groups {
            3 => Ok(DifficultyScale::Three),
            5 => Ok(DifficultyScale::Five),
            other => Err(ReprovaError::InvalidConfigValueError {
                field: "difficulty_groups".to_string(),
                value: other.to_string(),
                reason: "Only 3 or 5 difficulty groups are supported".to_string(),
            }),
        }
    }

    pub fn labels(self) -> &'static [&'static str] {
        match self {
            DifficultyScale::Three => &THREE_GROUPS,
            DifficultyScale::Five => &FIVE_GROUPS,
        }
    }

    pub fn groups(self) -> usize {
        self.labels().len()
    }

    pub fn middle(self) -> usize {
        self.groups() / 2
    }

    pub fn position(self, label: &str) -> Option<usize> {
        self.labels().iter().position(|known| *known == label)
    }

    pub fn label(self, index: usize) -> Option<&'static str> {
        self.labels().get(index).copied()
    }

    /// Maps an average grade to a label. The `0..=MAX_GRADE` range is cut in
    /// equal bands, one per group; the best band is the easiest group.
    pub fn classify(self, average_grade: f64) -> &'static str {
        let groups = self.groups();
        let band = MAX_GRADE / groups as f64;
        let grade = average_grade.clamp(0.0, MAX_GRADE);
        let from_hardest = ((grade / band) as usize).min(groups - 1);
        self.labels()[groups - 1 - from_hardest]
    }

    /// Mean position of the labels that belong to this scale, rounded to the
    /// nearest group. Unknown labels are ignored.
    pub fn average_of<'a, I>(self, labels: I) -> Option<&'static str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let positions: Vec<usize> = labels
            .into_iter()
            .filter_map(|label| self.position(label))
            .collect();

        if positions.is_empty() {
            return None;
        }

        let mean = positions.iter().sum::<usize>() as f64 / positions.len() as f64;
        self.label(mean.round() as usize)
    }

    /// Bucket indices ordered by distance from `start`, lower side first.
    pub fn priority_from(self, start: usize) -> Vec<usize> {
        let groups = self.groups();
        let start = start.min(groups - 1);
        let mut order = Vec::with_capacity(groups);
        order.push(start);

        for distance in 1..groups {
            if let Some(lower) = start.checked_sub(distance) {
                order.push(lower);
            }
            if start + distance < groups {
                order.push(start + distance);
            }
        }

        order
    }
}
