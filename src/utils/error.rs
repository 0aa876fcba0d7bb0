use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParamError {
    #[error("Failed to read {}: {source}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid filter file {}: {message}", .path.display())]
    InvalidFilterFile { path: PathBuf, message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to read config file {}: {source}", .path.display())]
    ConfigFileError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Output,
    Internal,
}

/// Every run failure is fatal; severity only picks the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl ParamError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ParamError::ReadError { .. } | ParamError::InvalidFilterFile { .. } => {
                ErrorCategory::Input
            }
            ParamError::WriteError { .. } => ErrorCategory::Output,
            ParamError::SerializationError(_) => ErrorCategory::Internal,
            ParamError::ConfigFileError { .. }
            | ParamError::ConfigError { .. }
            | ParamError::ConfigValidationError { .. }
            | ParamError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Output | ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ParamError::ReadError { source, .. }
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                "Make sure the change-detection step wrote the filter file, or pass --filter-file"
                    .to_string()
            }
            ParamError::ReadError { .. } => "Check the filter file permissions".to_string(),
            ParamError::InvalidFilterFile { .. } => {
                "The filter file must be a JSON array of service names".to_string()
            }
            ParamError::WriteError { .. } => {
                "Make sure the output directory exists and is writable".to_string()
            }
            ParamError::SerializationError(_) => "Report this as a bug".to_string(),
            ParamError::ConfigFileError { .. } => {
                "Check the --config path, or drop the flag to use the built-in defaults"
                    .to_string()
            }
            ParamError::ConfigError { .. }
            | ParamError::ConfigValidationError { .. }
            | ParamError::InvalidConfigValueError { .. } => {
                "Check the command line flags and the [generator] table of the config file"
                    .to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ParamError::ReadError { path, source }
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                format!("Filter file not found: {}", path.display())
            }
            ParamError::ConfigFileError { path, source }
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                format!("Config file not found: {}", path.display())
            }
            ParamError::WriteError { path, .. } => {
                format!("Could not write parameters to {}", path.display())
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ParamError>;
