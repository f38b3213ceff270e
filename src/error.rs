use std::fmt::{self, Display};

use log4rs::config::runtime::ConfigErrors;

/// Provides `LogError` and maps other errors to
/// convert to a `LogError`
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum LogError {
    ConfigError(ConfigErrors),
    SetLoggerError(log::SetLoggerError),
    LogError(String),
}

impl From<ConfigErrors> for LogError {
    fn from(error: ConfigErrors) -> Self {
        LogError::ConfigError(error)
    }
}

impl From<log::SetLoggerError> for LogError {
    fn from(error: log::SetLoggerError) -> Self {
        LogError::SetLoggerError(error)
    }
}

impl From<String> for LogError {
    fn from(error: String) -> Self {
        LogError::LogError(error)
    }
}

impl From<&str> for LogError {
    fn from(error: &str) -> Self {
        LogError::LogError(error.to_string())
    }
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LogError::ConfigError(error) => Some(error),
            LogError::SetLoggerError(error) => Some(error),
            LogError::LogError(_) => None,
        }
    }
}

impl Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LogError::ConfigError(error) => write!(f, "invalid logger configuration: {error}"),
            LogError::SetLoggerError(error) => write!(f, "{error}"),
            LogError::LogError(message) => write!(f, "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LogError;
    use std::error::Error;

    #[test]
    fn test_from_str() {
        let error: LogError = "no sink".into();
        assert_eq!(error.to_string(), "no sink");
        assert!(error.source().is_none());
    }
}
