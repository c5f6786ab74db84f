use clap::Parser;
use reprova::adapters::load_bank_file;
use reprova::utils::error::{ErrorSeverity, ReprovaError};
use reprova::utils::{logger, validation::Validate};
use reprova::{CliConfig, Questionnaire};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting reprova CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match run(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::error!(
                "❌ Questionnaire generation failed: {} (Severity: {:?})",
                e,
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}

fn run(config: &CliConfig) -> Result<String, ReprovaError> {
    // 驗證配置
    config.validate()?;
    let settings = config.generation_settings()?;
    tracing::debug!("Generation settings: {:?}", settings);

    let scale = if settings.difficulty_groups_enabled {
        Some(settings.scale()?)
    } else {
        None
    };
    let dao = load_bank_file(&config.bank, scale)?;

    let questionnaire: Questionnaire = config.generator().generate(&dao, &settings)?;
    tracing::info!(
        "✅ Questionnaire ready: {} questions",
        questionnaire.len()
    );

    Ok(serde_json::to_string_pretty(&questionnaire)?)
}
