use crate::domain::model::AlertConfigDesc;
use crate::utils::error::{AlertStoreError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Separator between path segments of object keys.
pub const DIR_DELIM: &str = "/";

/// Minimal object storage surface needed to persist tenant configs.
#[async_trait]
pub trait Bucket: Send + Sync {
    /// Lists entries directly under `dir`. Objects are returned as full keys,
    /// sub-directories as full keys ending with [`DIR_DELIM`].
    async fn iter(&self, dir: &str) -> Result<Vec<String>>;

    async fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Creates or overwrites the object at `key`.
    async fn upload(&self, key: &str, data: &[u8]) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<()>;

    fn is_obj_not_found(&self, err: &AlertStoreError) -> bool {
        matches!(err, AlertStoreError::ObjectNotFound { .. })
    }

    fn name(&self) -> &str;
}

#[async_trait]
impl<B: Bucket + ?Sized> Bucket for Arc<B> {
    async fn iter(&self, dir: &str) -> Result<Vec<String>> {
        (**self).iter(dir).await
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        (**self).get(key).await
    }

    async fn upload(&self, key: &str, data: &[u8]) -> Result<()> {
        (**self).upload(key, data).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key).await
    }

    fn is_obj_not_found(&self, err: &AlertStoreError) -> bool {
        (**self).is_obj_not_found(err)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Persistence of per-tenant alertmanager configurations.
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Loads every stored config, keyed by tenant.
    async fn list_alert_configs(&self) -> Result<HashMap<String, AlertConfigDesc>>;

    async fn list_all_users(&self) -> Result<Vec<String>>;

    /// Returns [`AlertStoreError::ConfigNotFound`] when the tenant has no config.
    async fn get_alert_config(&self, tenant: &str) -> Result<AlertConfigDesc>;

    /// Loads the configs of the given tenants. Tenants without a config are omitted.
    async fn get_alert_configs(
        &self,
        tenants: &[String],
    ) -> Result<HashMap<String, AlertConfigDesc>>;

    async fn set_alert_config(&self, cfg: &AlertConfigDesc) -> Result<()>;

    /// Deleting a tenant with no stored config succeeds.
    async fn delete_alert_config(&self, tenant: &str) -> Result<()>;
}
