pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::StoreConfig;

#[cfg(feature = "s3")]
pub use adapters::S3Bucket;
pub use adapters::{open_bucket, FilesystemBucket, InMemoryBucket};

pub use self::core::alert_store::{BucketAlertStore, ALERTS_PREFIX};
pub use domain::model::{AlertConfigDesc, TemplateDesc};
pub use domain::ports::{AlertStore, Bucket};
pub use utils::error::{AlertStoreError, Result};
