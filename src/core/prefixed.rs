use crate::domain::ports::{Bucket, DIR_DELIM};
use crate::utils::error::{AlertStoreError, Result};
use async_trait::async_trait;

/// Confines every operation of the wrapped bucket under `<prefix>/`.
#[derive(Debug, Clone)]
pub struct PrefixedBucket<B: Bucket> {
    bucket: B,
    prefix: String,
}

impl<B: Bucket> PrefixedBucket<B> {
    pub fn new(bucket: B, prefix: impl Into<String>) -> Self {
        Self {
            bucket,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn inner(&self) -> &B {
        &self.bucket
    }

    fn full_name(&self, name: &str) -> String {
        format!("{}{}{}", self.prefix, DIR_DELIM, name)
    }

    fn strip_prefix<'a>(&self, key: &'a str) -> &'a str {
        key.strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_prefix(DIR_DELIM))
            .unwrap_or(key)
    }
}

#[async_trait]
impl<B: Bucket> Bucket for PrefixedBucket<B> {
    async fn iter(&self, dir: &str) -> Result<Vec<String>> {
        let keys = self.bucket.iter(&self.full_name(dir)).await?;
        Ok(keys
            .iter()
            .map(|key| self.strip_prefix(key).to_string())
            .collect())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        self.bucket.get(&self.full_name(key)).await
    }

    async fn upload(&self, key: &str, data: &[u8]) -> Result<()> {
        self.bucket.upload(&self.full_name(key), data).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.bucket.delete(&self.full_name(key)).await
    }

    fn is_obj_not_found(&self, err: &AlertStoreError) -> bool {
        self.bucket.is_obj_not_found(err)
    }

    fn name(&self) -> &str {
        self.bucket.name()
    }
}
