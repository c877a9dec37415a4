use crate::domain::ports::{Bucket, DIR_DELIM};
use crate::utils::error::{AlertStoreError, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

/// Bucket kept entirely in memory, ordered by key.
#[derive(Debug, Default)]
pub struct InMemoryBucket {
    objects: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryBucket {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl Bucket for InMemoryBucket {
    async fn iter(&self, dir: &str) -> Result<Vec<String>> {
        let prefix = if dir.is_empty() || dir.ends_with(DIR_DELIM) {
            dir.to_string()
        } else {
            format!("{}{}", dir, DIR_DELIM)
        };

        let objects = self.objects.read().await;
        let mut entries = BTreeSet::new();

        for key in objects.keys().filter(|key| key.starts_with(&prefix)) {
            let rest = &key[prefix.len()..];
            match rest.find(DIR_DELIM) {
                Some(idx) => entries.insert(format!("{}{}", prefix, &rest[..=idx])),
                None => entries.insert(key.clone()),
            };
        }

        Ok(entries.into_iter().collect())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        self.objects
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| AlertStoreError::ObjectNotFound {
                key: key.to_string(),
            })
    }

    async fn upload(&self, key: &str, data: &[u8]) -> Result<()> {
        self.objects
            .write()
            .await
            .insert(key.to_string(), data.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        match self.objects.write().await.remove(key) {
            Some(_) => Ok(()),
            None => Err(AlertStoreError::ObjectNotFound {
                key: key.to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "inmemory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter_lists_one_level() {
        tokio_test::block_on(async {
            let bucket = InMemoryBucket::new();
            bucket.upload("a/1", b"").await.unwrap();
            bucket.upload("a/b/2", b"").await.unwrap();
            bucket.upload("a/b/3", b"").await.unwrap();
            bucket.upload("c", b"").await.unwrap();

            assert_eq!(bucket.iter("").await.unwrap(), vec!["a/", "c"]);
            assert_eq!(bucket.iter("a").await.unwrap(), vec!["a/1", "a/b/"]);
            assert_eq!(bucket.iter("a/b/").await.unwrap(), vec!["a/b/2", "a/b/3"]);
            assert!(bucket.iter("missing").await.unwrap().is_empty());
        });
    }

    #[test]
    fn test_missing_objects_report_not_found() {
        tokio_test::block_on(async {
            let bucket = InMemoryBucket::new();

            let err = bucket.get("nope").await.unwrap_err();
            assert!(bucket.is_obj_not_found(&err));

            let err = bucket.delete("nope").await.unwrap_err();
            assert!(bucket.is_obj_not_found(&err));
        });
    }

    #[test]
    fn test_upload_overwrites() {
        tokio_test::block_on(async {
            let bucket = InMemoryBucket::new();
            bucket.upload("k", b"one").await.unwrap();
            bucket.upload("k", b"two").await.unwrap();

            assert_eq!(bucket.get("k").await.unwrap(), b"two".to_vec());
            assert_eq!(bucket.len().await, 1);
        });
    }
}
