use crate::domain::difficulty::DifficultyScale;
use crate::utils::error::{ReprovaError, Result};
use crate::utils::validation::{validate_one_of, validate_positive_number, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_DIFFICULTY_GROUPS_ENABLED: &str = "REPROVA_DIFFICULTY_GROUPS_ENABLED";
pub const ENV_DIFFICULTY_GROUPS: &str = "REPROVA_DIFFICULTY_GROUPS";
pub const ENV_DEFAULT_QUESTIONS_COUNT: &str = "REPROVA_DEFAULT_QUESTIONS_COUNT";

/// Settings consumed by questionnaire generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Sample per difficulty bucket instead of in plain store order
    pub difficulty_groups_enabled: bool,
    /// Number of difficulty buckets (3 or 5)
    pub difficulty_groups: usize,
    /// Questions per questionnaire when the generator asks for no count
    pub default_questions_count: usize,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            difficulty_groups_enabled: false,
            difficulty_groups: 3,
            default_questions_count: 5,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    generation: GenerationSettings,
}

impl GenerationSettings {
    /// 從環境變數載入設定，無法解析的值使用預設值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        Self {
            difficulty_groups_enabled: lookup(ENV_DIFFICULTY_GROUPS_ENABLED)
                .and_then(|v| parse_flag(&v))
                .unwrap_or(default.difficulty_groups_enabled),
            difficulty_groups: lookup(ENV_DIFFICULTY_GROUPS)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default.difficulty_groups),
            default_questions_count: lookup(ENV_DEFAULT_QUESTIONS_COUNT)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default.default_questions_count),
        }
    }

    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReprovaError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析 `[generation]` 表
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content, |key| std::env::var(key).ok())?;

        let file: SettingsFile =
            toml::from_str(&processed_content).map_err(|e| ReprovaError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;

        Ok(file.generation)
    }

    pub fn scale(&self) -> Result<DifficultyScale> {
        DifficultyScale::from_groups(self.difficulty_groups)
    }
}

impl Validate for GenerationSettings {
    fn validate(&self) -> Result<()> {
        validate_one_of("difficulty_groups", self.difficulty_groups, &[3, 5])?;
        validate_positive_number("default_questions_count", self.default_questions_count, 1)?;
        Ok(())
    }
}

/// 替換環境變數 (例如 ${REPROVA_GROUPS})，找不到的變數保持原樣
fn substitute_env_vars<F>(content: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReprovaError::ConfigError {
        message: format!("invalid substitution pattern: {}", e),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
    });

    Ok(result.to_string())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let settings = GenerationSettings::from_lookup(|_| None);
        assert_eq!(settings, GenerationSettings::default());
        assert!(!settings.difficulty_groups_enabled);
        assert_eq!(settings.difficulty_groups, 3);
        assert_eq!(settings.default_questions_count, 5);
    }

    #[test]
    fn test_from_lookup_reads_every_variable() {
        let settings = GenerationSettings::from_lookup(lookup_from(&[
            (ENV_DIFFICULTY_GROUPS_ENABLED, "true"),
            (ENV_DIFFICULTY_GROUPS, "5"),
            (ENV_DEFAULT_QUESTIONS_COUNT, "10"),
        ]));

        assert!(settings.difficulty_groups_enabled);
        assert_eq!(settings.difficulty_groups, 5);
        assert_eq!(settings.default_questions_count, 10);
        assert_eq!(settings.scale().unwrap(), DifficultyScale::Five);
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let settings = GenerationSettings::from_lookup(lookup_from(&[
            (ENV_DIFFICULTY_GROUPS_ENABLED, "maybe"),
            (ENV_DIFFICULTY_GROUPS, "three"),
        ]));

        assert_eq!(settings, GenerationSettings::default());
    }

    #[test]
    fn test_parse_toml_settings() {
        let settings = GenerationSettings::from_toml_str(
            r#"
[generation]
difficulty_groups_enabled = true
difficulty_groups = 5
"#,
        )
        .unwrap();

        assert!(settings.difficulty_groups_enabled);
        assert_eq!(settings.difficulty_groups, 5);
        assert_eq!(settings.default_questions_count, 5);
    }

    #[test]
    fn test_missing_generation_table_uses_defaults() {
        let settings = GenerationSettings::from_toml_str("").unwrap();
        assert_eq!(settings, GenerationSettings::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = GenerationSettings::from_toml_str("[generation\ndifficulty_groups = 3");
        assert!(matches!(result, Err(ReprovaError::ConfigError { .. })));
    }

    #[test]
    fn test_env_var_substitution() {
        let content = "[generation]\ndifficulty_groups = ${GROUPS}\nlabel = \"${UNKNOWN}\"";
        let processed = substitute_env_vars(content, lookup_from(&[("GROUPS", "5")])).unwrap();

        assert!(processed.contains("difficulty_groups = 5"));
        assert!(processed.contains("${UNKNOWN}"));
    }

    #[test]
    fn test_validation() {
        let mut settings = GenerationSettings::default();
        assert!(settings.validate().is_ok());

        settings.difficulty_groups = 4;
        assert!(settings.validate().is_err());

        settings.difficulty_groups = 5;
        settings.default_questions_count = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[generation]\ndefault_questions_count = 8\n")
            .unwrap();

        let settings = GenerationSettings::from_file(temp_file.path()).unwrap();
        assert_eq!(settings.default_questions_count, 8);
    }
}
