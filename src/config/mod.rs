pub mod settings;

pub use settings::GenerationSettings;

#[cfg(feature = "cli")]
use crate::core::QuestionnaireGenerator;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_file_extension, validate_one_of, validate_path, validate_positive_number,
    Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "reprova")]
#[command(about = "Generate a questionnaire from a TOML question bank")]
pub struct CliConfig {
    /// TOML question bank to sample from
    #[arg(long, env = "REPROVA_BANK")]
    pub bank: String,

    /// TOML settings file with a [generation] table; REPROVA_* variables are used otherwise
    #[arg(long, env = "REPROVA_SETTINGS")]
    pub settings: Option<String>,

    /// Number of questions to pick
    #[arg(long)]
    pub count: Option<usize>,

    /// Upper bound on the total estimated time
    #[arg(long)]
    pub time: Option<u32>,

    /// Target average difficulty, e.g. "Average"
    #[arg(long)]
    pub difficulty: Option<String>,

    /// Number of difficulty groups (3 or 5)
    #[arg(long)]
    pub difficulty_groups: Option<usize>,

    #[arg(long, help = "Sample per difficulty group")]
    pub enable_difficulty_groups: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Settings file (or environment) with command-line overrides applied.
    pub fn generation_settings(&self) -> Result<GenerationSettings> {
        let mut settings = match &self.settings {
            Some(path) => GenerationSettings::from_file(path)?,
            None => GenerationSettings::from_env(),
        };

        if self.enable_difficulty_groups {
            settings.difficulty_groups_enabled = true;
        }
        if let Some(groups) = self.difficulty_groups {
            settings.difficulty_groups = groups;
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn generator(&self) -> QuestionnaireGenerator {
        let mut generator = QuestionnaireGenerator::new();

        if let Some(count) = self.count {
            generator = generator.questions_count(count);
        }
        if let Some(time) = self.time {
            generator = generator.total_estimated_time(time);
        }
        if let Some(difficulty) = &self.difficulty {
            generator = generator.average_difficulty(difficulty.clone());
        }

        generator
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("bank", &self.bank)?;
        validate_file_extension("bank", &self.bank, &["toml"])?;

        if let Some(settings) = &self.settings {
            validate_path("settings", settings)?;
            validate_file_extension("settings", settings, &["toml"])?;
        }

        if let Some(count) = self.count {
            validate_positive_number("count", count, 1)?;
        }

        if let Some(groups) = self.difficulty_groups {
            validate_one_of("difficulty_groups", groups, &[3, 5])?;
        }

        Ok(())
    }
}
