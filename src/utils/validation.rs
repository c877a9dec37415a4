use crate::utils::error::{AlertStoreError, Result};
use url::Url;

/// Longest tenant ID accepted for storage.
pub const MAX_TENANT_ID_LENGTH: usize = 150;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(AlertStoreError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AlertStoreError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(AlertStoreError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AlertStoreError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AlertStoreError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| AlertStoreError::MissingConfigError {
            field: field_name.to_string(),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AlertStoreError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(AlertStoreError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

pub fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    let invalid = |reason: &str| AlertStoreError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: bucket_name.to_string(),
        reason: reason.to_string(),
    };

    if bucket_name.is_empty() {
        return Err(invalid("S3 bucket name cannot be empty"));
    }

    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(invalid("S3 bucket name must be between 3 and 63 characters"));
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(invalid(
            "S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots",
        ));
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(invalid("S3 bucket name cannot start or end with a hyphen"));
    }

    Ok(())
}

pub fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(AlertStoreError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

/// Checks that a tenant ID is safe to use as an object key.
///
/// Accepted characters are ASCII alphanumerics and `!-_.*'()`. The IDs `.`
/// and `..` are rejected because they collide with path segments.
pub fn validate_tenant_id(tenant: &str) -> Result<()> {
    let invalid = |reason: String| AlertStoreError::InvalidTenantId {
        tenant: tenant.to_string(),
        reason,
    };

    if tenant.is_empty() {
        return Err(invalid("tenant ID cannot be empty".to_string()));
    }

    if tenant.len() > MAX_TENANT_ID_LENGTH {
        return Err(invalid(format!(
            "tenant ID is longer than {} characters",
            MAX_TENANT_ID_LENGTH
        )));
    }

    if tenant == "." || tenant == ".." {
        return Err(invalid("tenant ID cannot be '.' or '..'".to_string()));
    }

    if let Some(c) = tenant.chars().find(|c| !is_tenant_id_char(*c)) {
        return Err(invalid(format!("unsupported character '{}'", c)));
    }

    Ok(())
}

fn is_tenant_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '!' | '-' | '_' | '.' | '*' | '\'' | '(' | ')')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("storage.s3.endpoint", "https://s3.example.com").is_ok());
        assert!(validate_url("storage.s3.endpoint", "http://localhost:9000").is_ok());
        assert!(validate_url("storage.s3.endpoint", "").is_err());
        assert!(validate_url("storage.s3.endpoint", "invalid-url").is_err());
        assert!(validate_url("storage.s3.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_s3_bucket_name() {
        assert!(validate_s3_bucket_name("storage.s3.bucket", "alertmanager-configs").is_ok());
        assert!(validate_s3_bucket_name("storage.s3.bucket", "ab").is_err());
        assert!(validate_s3_bucket_name("storage.s3.bucket", "Alerts").is_err());
        assert!(validate_s3_bucket_name("storage.s3.bucket", "-alerts").is_err());
    }

    #[test]
    fn test_validate_tenant_id() {
        assert!(validate_tenant_id("team-a").is_ok());
        assert!(validate_tenant_id("tenant_1.prod(eu)").is_ok());
        assert!(validate_tenant_id("").is_err());
        assert!(validate_tenant_id(".").is_err());
        assert!(validate_tenant_id("..").is_err());
        assert!(validate_tenant_id("team/a").is_err());
        assert!(validate_tenant_id(&"a".repeat(MAX_TENANT_ID_LENGTH)).is_ok());
        assert!(validate_tenant_id(&"a".repeat(MAX_TENANT_ID_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("logging.format", "json", &["compact", "json"]).is_ok());
        assert!(validate_one_of("logging.format", "pretty", &["compact", "json"]).is_err());
    }
}
