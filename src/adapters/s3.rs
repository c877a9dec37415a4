use crate::domain::ports::{Bucket, DIR_DELIM};
use crate::utils::error::{AlertStoreError, Result};
use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;

#[derive(Debug, Clone)]
pub struct S3Bucket {
    client: S3Client,
    bucket: String,
}

impl S3Bucket {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

fn list_prefix(dir: &str) -> Option<String> {
    match dir {
        "" => None,
        dir if dir.ends_with(DIR_DELIM) => Some(dir.to_string()),
        dir => Some(format!("{}{}", dir, DIR_DELIM)),
    }
}

fn sdk_failure<E, R>(operation: &str, key: &str, err: SdkError<E, R>) -> AlertStoreError
where
    E: std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    AlertStoreError::bucket(operation, key, DisplayErrorContext(&err).to_string())
}

#[async_trait]
impl Bucket for S3Bucket {
    async fn iter(&self, dir: &str) -> Result<Vec<String>> {
        let prefix = list_prefix(dir);
        let mut keys = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let resp = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .set_prefix(prefix.clone())
                .delimiter(DIR_DELIM)
                .set_continuation_token(continuation_token.take())
                .send()
                .await
                .map_err(|e| sdk_failure("list", dir, e))?;

            keys.extend(
                resp.common_prefixes()
                    .iter()
                    .filter_map(|p| p.prefix().map(str::to_string)),
            );
            keys.extend(
                resp.contents()
                    .iter()
                    .filter_map(|o| o.key())
                    // Some S3-compatible stores list the directory marker itself.
                    .filter(|key| Some(*key) != prefix.as_deref())
                    .map(str::to_string),
            );

            match resp.next_continuation_token() {
                Some(token) if resp.is_truncated().unwrap_or(false) => {
                    continuation_token = Some(token.to_string());
                }
                _ => break,
            }
        }

        keys.sort();
        tracing::debug!(bucket = %self.bucket, dir, count = keys.len(), "listed objects");
        Ok(keys)
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let resp = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(SdkError::ServiceError(e)) if e.err().is_no_such_key() => {
                return Err(AlertStoreError::ObjectNotFound {
                    key: key.to_string(),
                });
            }
            Err(e) => return Err(sdk_failure("get", key, e)),
        };

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| AlertStoreError::bucket("get", key, e.to_string()))?;

        Ok(data.into_bytes().to_vec())
    }

    async fn upload(&self, key: &str, data: &[u8]) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data.to_vec()))
            .send()
            .await
            .map_err(|e| sdk_failure("upload", key, e))?;

        tracing::debug!(bucket = %self.bucket, key, bytes = data.len(), "uploaded object");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        // DeleteObject succeeds for missing keys, so this never reports not found.
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| sdk_failure("delete", key, e))?;
        Ok(())
    }

    fn name(&self) -> &str {
        "s3"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_prefix() {
        assert_eq!(list_prefix(""), None);
        assert_eq!(list_prefix("alerts"), Some("alerts/".to_string()));
        assert_eq!(list_prefix("alerts/"), Some("alerts/".to_string()));
    }
}
