use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReprovaError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ReprovaError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ReprovaError::InvalidArgument { .. } => ErrorSeverity::High,
            ReprovaError::ConfigError { .. } | ReprovaError::InvalidConfigValueError { .. } => {
                ErrorSeverity::High
            }
            // the bank file exists but needs editing
            ReprovaError::TomlError(_) => ErrorSeverity::Medium,
            ReprovaError::IoError(_) | ReprovaError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ReprovaError::InvalidArgument { .. } => {
                "Check the question data and the requested difficulty label"
            }
            ReprovaError::ConfigError { .. }
            | ReprovaError::InvalidConfigValueError { .. } => {
                "Review the settings file and the REPROVA_* environment variables"
            }
            ReprovaError::TomlError(_) => "Fix the TOML syntax of the question bank",
            ReprovaError::IoError(_) => "Check that the file exists and is readable",
            ReprovaError::SerializationError(_) => "Report this as a bug",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReprovaError::InvalidArgument { message } => format!("Invalid input: {}", message),
            ReprovaError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is not valid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReprovaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_message() {
        let err = ReprovaError::invalid_argument("question #0 is absent");
        assert_eq!(err.to_string(), "Invalid argument: question #0 is absent");
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_bank_syntax_error_is_medium() {
        let err: ReprovaError = toml::from_str::<toml::Table>("questions = [")
            .unwrap_err()
            .into();
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.recovery_suggestion(), "Fix the TOML syntax of the question bank");
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: ReprovaError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("gone"));
    }
}
