use crate::core::prefixed::PrefixedBucket;
use crate::domain::model::AlertConfigDesc;
use crate::domain::ports::{AlertStore, Bucket, DIR_DELIM};
use crate::utils::error::{AlertStoreError, Result};
use crate::utils::validation::validate_tenant_id;
use async_trait::async_trait;
use std::collections::HashMap;

/// Bucket prefix under which all tenants' alertmanager configs are stored.
pub const ALERTS_PREFIX: &str = "alerts";

/// [`AlertStore`] backed by an object storage bucket. Each tenant's config
/// is a single object named after the tenant under [`ALERTS_PREFIX`].
pub struct BucketAlertStore<B: Bucket> {
    bucket: PrefixedBucket<B>,
}

impl<B: Bucket> BucketAlertStore<B> {
    pub fn new(bucket: B) -> Self {
        Self {
            bucket: PrefixedBucket::new(bucket, ALERTS_PREFIX),
        }
    }

    async fn fetch(&self, key: &str) -> Result<AlertConfigDesc> {
        let buf = self.bucket.get(key).await?;
        AlertConfigDesc::from_bytes(&buf)
    }

    async fn tenant_keys(&self) -> Result<Vec<String>> {
        let keys = self.bucket.iter("").await?;
        Ok(keys
            .into_iter()
            .filter(|key| {
                if key.ends_with(DIR_DELIM) {
                    tracing::warn!(entry = %key, "skipping directory entry under alerts prefix");
                    return false;
                }
                true
            })
            .collect())
    }
}

#[async_trait]
impl<B: Bucket> AlertStore for BucketAlertStore<B> {
    async fn list_alert_configs(&self) -> Result<HashMap<String, AlertConfigDesc>> {
        let mut cfgs = HashMap::new();

        for tenant in self.tenant_keys().await? {
            let cfg = self
                .fetch(&tenant)
                .await
                .map_err(|e| AlertStoreError::FetchConfigError {
                    tenant: tenant.clone(),
                    source: Box::new(e),
                })?;

            cfgs.insert(cfg.user.clone(), cfg);
        }

        tracing::debug!(bucket = self.bucket.name(), count = cfgs.len(), "listed alertmanager configs");
        Ok(cfgs)
    }

    async fn list_all_users(&self) -> Result<Vec<String>> {
        let mut tenants = self.tenant_keys().await?;
        tenants.sort();
        Ok(tenants)
    }

    async fn get_alert_config(&self, tenant: &str) -> Result<AlertConfigDesc> {
        match self.fetch(tenant).await {
            Err(e) if self.bucket.is_obj_not_found(&e) => {
                tracing::debug!(tenant, "no alertmanager config stored");
                Err(AlertStoreError::ConfigNotFound {
                    tenant: tenant.to_string(),
                })
            }
            other => other,
        }
    }

    async fn get_alert_configs(
        &self,
        tenants: &[String],
    ) -> Result<HashMap<String, AlertConfigDesc>> {
        let mut cfgs = HashMap::with_capacity(tenants.len());

        for tenant in tenants {
            match self.get_alert_config(tenant).await {
                Ok(cfg) => {
                    cfgs.insert(tenant.clone(), cfg);
                }
                Err(AlertStoreError::ConfigNotFound { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(cfgs)
    }

    async fn set_alert_config(&self, cfg: &AlertConfigDesc) -> Result<()> {
        validate_tenant_id(&cfg.user)?;

        self.bucket.upload(&cfg.user, &cfg.to_bytes()).await?;
        tracing::info!(tenant = %cfg.user, templates = cfg.templates.len(), "stored alertmanager config");
        Ok(())
    }

    async fn delete_alert_config(&self, tenant: &str) -> Result<()> {
        match self.bucket.delete(tenant).await {
            Ok(()) => {
                tracing::info!(tenant, "deleted alertmanager config");
                Ok(())
            }
            Err(e) if self.bucket.is_obj_not_found(&e) => {
                tracing::debug!(tenant, "alertmanager config already absent");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
