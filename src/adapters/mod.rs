// Adapters layer: concrete bucket backends behind the `Bucket` port.

pub mod filesystem;
pub mod memory;
#[cfg(feature = "s3")]
pub mod s3;

use crate::config::toml_config::{Backend, StorageConfig};
use crate::domain::ports::Bucket;
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use std::sync::Arc;

pub use filesystem::FilesystemBucket;
pub use memory::InMemoryBucket;
#[cfg(feature = "s3")]
pub use s3::S3Bucket;

/// Builds the bucket selected by the storage configuration.
pub async fn open_bucket(config: &StorageConfig) -> Result<Arc<dyn Bucket>> {
    match config.backend {
        Backend::Filesystem => {
            let fs = validate_required_field("storage.filesystem", &config.filesystem)?;
            tracing::info!(dir = %fs.dir, "using filesystem bucket");
            Ok(Arc::new(FilesystemBucket::new(&fs.dir)))
        }
        Backend::S3 => open_s3_bucket(config).await,
    }
}

#[cfg(feature = "s3")]
async fn open_s3_bucket(config: &StorageConfig) -> Result<Arc<dyn Bucket>> {
    use aws_config::BehaviorVersion;
    use aws_sdk_s3::config::Region;
    use aws_sdk_s3::Client as S3Client;

    let s3 = validate_required_field("storage.s3", &config.s3)?;

    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config)
        .region(Region::new(s3.region.clone()))
        .force_path_style(s3.force_path_style);
    if let Some(endpoint) = &s3.endpoint {
        builder = builder.endpoint_url(endpoint);
    }
    let client = S3Client::from_conf(builder.build());

    tracing::info!(bucket = %s3.bucket, region = %s3.region, "using s3 bucket");
    Ok(Arc::new(S3Bucket::new(client, s3.bucket.clone())))
}

#[cfg(not(feature = "s3"))]
async fn open_s3_bucket(_config: &StorageConfig) -> Result<Arc<dyn Bucket>> {
    Err(crate::utils::error::AlertStoreError::ConfigError {
        message: "the s3 backend requires building with the `s3` feature".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::FilesystemConfig;

    #[tokio::test]
    async fn test_filesystem_backend_requires_section() {
        let config = StorageConfig {
            backend: Backend::Filesystem,
            filesystem: None,
            s3: None,
        };
        assert!(open_bucket(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_opens_filesystem_backend() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = StorageConfig {
            backend: Backend::Filesystem,
            filesystem: Some(FilesystemConfig {
                dir: temp_dir.path().to_string_lossy().into_owned(),
            }),
            s3: None,
        };

        let bucket = open_bucket(&config).await.unwrap();
        assert_eq!(bucket.name(), "filesystem");
    }
}
