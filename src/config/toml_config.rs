use crate::utils::error::{AlertStoreError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub storage: StorageConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Filesystem,
    S3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: Backend,
    pub filesystem: Option<FilesystemConfig>,
    pub s3: Option<S3Config>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesystemConfig {
    pub dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub endpoint: Option<String>,
    #[serde(default)]
    pub force_path_style: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl StoreConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AlertStoreError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses the configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AlertStoreError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AlertStoreError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Configuration for a local directory, used when no file is given.
    pub fn filesystem(dir: impl Into<String>) -> Self {
        Self {
            storage: StorageConfig {
                backend: Backend::Filesystem,
                filesystem: Some(FilesystemConfig { dir: dir.into() }),
                s3: None,
            },
            logging: None,
        }
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .is_some_and(|format| format == "json")
    }
}

impl Validate for StoreConfig {
    fn validate(&self) -> Result<()> {
        self.storage.validate()?;

        if let Some(logging) = &self.logging {
            if let Some(format) = &logging.format {
                validation::validate_one_of("logging.format", format, &["compact", "json"])?;
            }
            if let Some(level) = &logging.level {
                validation::validate_one_of(
                    "logging.level",
                    level,
                    &["trace", "debug", "info", "warn", "error"],
                )?;
            }
        }

        Ok(())
    }
}

impl Validate for StorageConfig {
    fn validate(&self) -> Result<()> {
        match self.backend {
            Backend::Filesystem => {
                let fs = validation::validate_required_field("storage.filesystem", &self.filesystem)?;
                validation::validate_path("storage.filesystem.dir", &fs.dir)?;
            }
            Backend::S3 => {
                let s3 = validation::validate_required_field("storage.s3", &self.s3)?;
                validation::validate_s3_bucket_name("storage.s3.bucket", &s3.bucket)?;
                validation::validate_aws_region("storage.s3.region", &s3.region)?;
                if let Some(endpoint) = &s3.endpoint {
                    validation::validate_url("storage.s3.endpoint", endpoint)?;
                }
            }
        }

        tracing::debug!(backend = ?self.backend, "storage configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filesystem_config() {
        let config = StoreConfig::from_toml_str(
            r#"
[storage]
backend = "filesystem"

[storage.filesystem]
dir = "./data"

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        assert_eq!(config.storage.backend, Backend::Filesystem);
        assert_eq!(config.storage.filesystem.as_ref().unwrap().dir, "./data");
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_s3_config_with_env_substitution() {
        std::env::set_var("ALERT_STORE_TEST_BUCKET", "tenant-alerts");

        let config = StoreConfig::from_toml_str(
            r#"
[storage]
backend = "s3"

[storage.s3]
bucket = "${ALERT_STORE_TEST_BUCKET}"
region = "eu-west-1"
endpoint = "http://localhost:9000"
force_path_style = true
"#,
        )
        .unwrap();

        let s3 = config.storage.s3.as_ref().unwrap();
        assert_eq!(s3.bucket, "tenant-alerts");
        assert!(s3.force_path_style);
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unset_env_var_is_left_verbatim() {
        let config = StoreConfig::from_toml_str(
            r#"
[storage]
backend = "filesystem"

[storage.filesystem]
dir = "${ALERT_STORE_TEST_UNSET_DIR}"
"#,
        )
        .unwrap();

        assert_eq!(
            config.storage.filesystem.unwrap().dir,
            "${ALERT_STORE_TEST_UNSET_DIR}"
        );
    }

    #[test]
    fn test_validation_catches_missing_sections() {
        let config = StoreConfig::from_toml_str(
            r#"
[storage]
backend = "s3"
"#,
        )
        .unwrap();

        assert!(matches!(
            config.validate(),
            Err(AlertStoreError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_backend() {
        let result = StoreConfig::from_toml_str(
            r#"
[storage]
backend = "gcs"
"#,
        );
        assert!(result.is_err());
    }
}
