//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// No input text was given or found
    NoInput(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// Translation backend could not be set up
    BackendError(String),
    /// Output could not be written
    OutputError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NoInput(what) => write!(f, "No input: {what}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::BackendError(msg) => write!(f, "Backend error: {msg}"),
            CliError::OutputError(msg) => write!(f, "Output error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CliError::NoInput("nothing on stdin".to_string()).to_string(),
            "No input: nothing on stdin"
        );
        assert_eq!(
            CliError::InvalidPattern("[invalid".to_string()).to_string(),
            "Invalid file pattern: [invalid"
        );
        assert_eq!(
            CliError::ConfigError("overlap too large".to_string()).to_string(),
            "Configuration error: overlap too large"
        );
        assert_eq!(
            CliError::BackendError("tls init failed".to_string()).to_string(),
            "Backend error: tls init failed"
        );
    }

    #[test]
    fn test_converts_into_anyhow() {
        let failure: CliResult<()> = Err(CliError::OutputError("broken pipe".into()).into());
        let err = failure.unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
        assert_eq!(err.to_string(), "Output error: broken pipe");
    }

    #[test]
    fn test_error_with_cyrillic_path() {
        let error = CliError::NoInput("переклад/файл.txt".to_string());
        assert_eq!(error.to_string(), "No input: переклад/файл.txt");
    }
}
