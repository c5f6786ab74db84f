use anyhow::Result;
use reprova::adapters::load_bank_file;
use reprova::{DifficultyScale, GenerationSettings, QuestionQuery, QuestionnaireGenerator, QuestionsDao};
use tempfile::TempDir;

const BANK: &str = r#"
[[questions]]
theme = "graphs"
description = "BFS order"
estimated_time = 10

[questions.record."2024/1"]
alice = 95.0
bob = 85.0

[[questions]]
theme = "graphs"
description = "Dijkstra with negative edges"
estimated_time = 20

[questions.record."2024/1"]
alice = 20.0
bob = 30.0

[[questions]]
theme = "sorting"
description = "quicksort pivot"
estimated_time = 15

[questions.record."2024/1"]
alice = 50.0
bob = 60.0

[[questions]]
theme = "sorting"
description = "exam draft"
private = true
difficulty = "Average"
estimated_time = 5
"#;

/// 將題庫與設定寫入暫存目錄，模擬 CLI 的檔案輸入
fn write_inputs(dir: &TempDir, settings: &str) -> Result<(String, String)> {
    let bank_path = dir.path().join("bank.toml");
    let settings_path = dir.path().join("settings.toml");
    std::fs::write(&bank_path, BANK)?;
    std::fs::write(&settings_path, settings)?;

    Ok((
        bank_path.to_string_lossy().to_string(),
        settings_path.to_string_lossy().to_string(),
    ))
}

#[test]
fn test_generate_from_bank_file_with_difficulty_groups() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let (bank_path, settings_path) = write_inputs(
        &temp_dir,
        "[generation]\ndifficulty_groups_enabled = true\ndifficulty_groups = 3\ndefault_questions_count = 3\n",
    )?;

    let settings = GenerationSettings::from_file(&settings_path)?;
    let dao = load_bank_file(&bank_path, Some(settings.scale()?))?;

    let labels: Vec<String> = dao
        .list(&QuestionQuery::new())?
        .iter()
        .filter_map(|q| q.difficulty().map(str::to_string))
        .collect();
    assert_eq!(labels, vec!["Easy", "Hard", "Average"]);

    let questionnaire = QuestionnaireGenerator::new().generate(&dao, &settings)?;

    assert_eq!(questionnaire.len(), 3);
    assert_eq!(questionnaire.total_estimated_time(), 45);
    assert_eq!(questionnaire.average_difficulty(), Some("Average"));
    assert!(questionnaire.questions().iter().all(|q| !q.is_private()));

    Ok(())
}

#[test]
fn test_generated_questionnaire_serializes_to_json() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let (bank_path, _) = write_inputs(&temp_dir, "")?;

    let dao = load_bank_file(&bank_path, Some(DifficultyScale::Five))?;
    let questionnaire = QuestionnaireGenerator::new()
        .questions_count(2)
        .total_estimated_time(25)
        .generate(&dao, &GenerationSettings::default())?;

    let json: serde_json::Value = serde_json::to_value(&questionnaire)?;

    assert_eq!(json["total_estimated_time"], 25);
    assert_eq!(json["average_difficulty"], "Average");
    assert!(json["id"].is_null());
    assert_eq!(json["questions"].as_array().map(|q| q.len()), Some(2));
    assert_eq!(json["questions"][0]["theme"], "graphs");

    Ok(())
}

#[test]
fn test_missing_bank_file_is_io_error() {
    let result = load_bank_file("/definitely/not/here/bank.toml", None);
    assert!(matches!(result, Err(reprova::ReprovaError::IoError(_))));
}
