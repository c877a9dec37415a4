use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlertStoreError {
    #[error("Object not found: {key}")]
    ObjectNotFound { key: String },

    #[error("Alertmanager config not found for user {tenant}")]
    ConfigNotFound { tenant: String },

    #[error("failed to fetch alertmanager config for user {tenant}")]
    FetchConfigError {
        tenant: String,
        #[source]
        source: Box<AlertStoreError>,
    },

    #[error("Invalid tenant ID '{tenant}': {reason}")]
    InvalidTenantId { tenant: String, reason: String },

    #[error("Bucket {operation} failed for '{key}': {message}")]
    BucketError {
        operation: String,
        key: String,
        message: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    DecodeError(#[from] prost::DecodeError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, AlertStoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Storage,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AlertStoreError {
    pub fn bucket(operation: &str, key: &str, message: impl Into<String>) -> Self {
        Self::BucketError {
            operation: operation.to_string(),
            key: key.to_string(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ObjectNotFound { .. } | Self::ConfigNotFound { .. }
        )
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ObjectNotFound { .. } | Self::ConfigNotFound { .. } => ErrorCategory::NotFound,
            Self::FetchConfigError { source, .. } => source.category(),
            Self::BucketError { .. } | Self::IoError(_) => ErrorCategory::Storage,
            Self::DecodeError(_) | Self::SerializationError(_) | Self::InvalidTenantId { .. } => {
                ErrorCategory::Data
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::NotFound => ErrorSeverity::Low,
            ErrorCategory::Storage => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the CLI: not found 4, storage 2, data 1, configuration 3.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 4,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::NotFound => "Check the tenant ID, or store a configuration for it first",
            ErrorCategory::Storage => {
                "Check bucket connectivity and credentials, then retry the command"
            }
            ErrorCategory::Data => {
                "The stored object or input is malformed; re-upload the tenant configuration"
            }
            ErrorCategory::Configuration => {
                "Review the configuration file and command line flags"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ConfigNotFound { tenant } => {
                format!("No alertmanager configuration stored for tenant '{}'", tenant)
            }
            Self::InvalidTenantId { tenant, reason } => {
                format!("'{}' is not a valid tenant ID: {}", tenant, reason)
            }
            Self::FetchConfigError { source, .. } => {
                format!("{}: {}", self, source.user_friendly_message())
            }
            Self::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_variants() {
        let err = AlertStoreError::ObjectNotFound {
            key: "alerts/user-1".to_string(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.severity(), ErrorSeverity::Low);

        let err = AlertStoreError::bucket("get", "alerts/user-1", "connection reset");
        assert!(!err.is_not_found());
        assert_eq!(err.category(), ErrorCategory::Storage);
    }

    #[test]
    fn test_fetch_error_takes_category_of_source() {
        let err = AlertStoreError::FetchConfigError {
            tenant: "user-1".to_string(),
            source: Box::new(AlertStoreError::bucket("get", "user-1", "timeout")),
        };
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert_eq!(
            err.to_string(),
            "failed to fetch alertmanager config for user user-1"
        );

        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("timeout"));
        assert!(source.source().is_none());
    }

    #[test]
    fn test_exit_codes_follow_severity() {
        let not_found = AlertStoreError::ConfigNotFound {
            tenant: "ghost".to_string(),
        };
        let storage = AlertStoreError::bucket("get", "alerts/a", "timeout");
        let data = AlertStoreError::InvalidTenantId {
            tenant: "a/b".to_string(),
            reason: "unsupported character '/'".to_string(),
        };
        let config = AlertStoreError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: "expected a table".to_string(),
        };

        assert_eq!(not_found.exit_code(), 4);
        assert_eq!(storage.exit_code(), 2);
        assert_eq!(data.exit_code(), 1);
        assert_eq!(config.exit_code(), 3);
    }

    #[test]
    fn test_configuration_errors_are_critical() {
        let err = AlertStoreError::MissingConfigError {
            field: "storage.s3.bucket".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("storage.s3.bucket"));
    }
}
