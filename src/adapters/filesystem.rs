use crate::domain::ports::{Bucket, DIR_DELIM};
use crate::utils::error::{AlertStoreError, Result};
use async_trait::async_trait;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// File name prefix of in-flight uploads. Such files are never listed.
const UPLOAD_TEMP_PREFIX: &str = ".alert-store-upload-";

/// Bucket whose objects are plain files below a root directory.
#[derive(Debug, Clone)]
pub struct FilesystemBucket {
    root: PathBuf,
}

impl FilesystemBucket {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, key: &str) -> Result<PathBuf> {
        let key = key.trim_end_matches(DIR_DELIM);
        if key.is_empty() {
            return Ok(self.root.clone());
        }

        let mut path = self.root.clone();
        for segment in key.split(DIR_DELIM) {
            if segment.is_empty() || segment == "." || segment == ".." || segment.contains('\\') {
                return Err(AlertStoreError::bucket(
                    "resolve",
                    key,
                    "object key must be a relative path without '.' or '..' segments",
                ));
            }
            path.push(segment);
        }
        Ok(path)
    }
}

fn not_found_or(err: std::io::Error, key: &str) -> AlertStoreError {
    if err.kind() == ErrorKind::NotFound {
        object_not_found(key)
    } else {
        AlertStoreError::IoError(err)
    }
}

fn object_not_found(key: &str) -> AlertStoreError {
    AlertStoreError::ObjectNotFound {
        key: key.to_string(),
    }
}

// Directories are prefixes, not objects.
async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}

#[async_trait]
impl Bucket for FilesystemBucket {
    async fn iter(&self, dir: &str) -> Result<Vec<String>> {
        let dir_path = self.object_path(dir)?;
        let prefix = match dir.trim_end_matches(DIR_DELIM) {
            "" => String::new(),
            trimmed => format!("{}{}", trimmed, DIR_DELIM),
        };

        let mut read_dir = match tokio::fs::read_dir(&dir_path).await {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        while let Some(entry) = read_dir.next_entry().await? {
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 file name");
                continue;
            };

            if name.starts_with(UPLOAD_TEMP_PREFIX) {
                continue;
            }

            if entry.file_type().await?.is_dir() {
                keys.push(format!("{}{}{}", prefix, name, DIR_DELIM));
            } else {
                keys.push(format!("{}{}", prefix, name));
            }
        }

        keys.sort();
        Ok(keys)
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.object_path(key)?;
        if is_dir(&path).await {
            return Err(object_not_found(key));
        }

        tokio::fs::read(&path)
            .await
            .map_err(|e| not_found_or(e, key))
    }

    async fn upload(&self, key: &str, data: &[u8]) -> Result<()> {
        let path = self.object_path(key)?;

        let parent = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());
        tokio::fs::create_dir_all(&parent).await?;

        // Write next to the target and rename over it, so readers see either
        // the old or the new object and never a partial one.
        let target = path.clone();
        let body = data.to_vec();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut tmp = tempfile::Builder::new()
                .prefix(UPLOAD_TEMP_PREFIX)
                .tempfile_in(&parent)?;
            tmp.write_all(&body)?;
            tmp.as_file().sync_all()?;
            tmp.persist(&target)
                .map_err(|e| AlertStoreError::IoError(e.error))?;
            Ok(())
        })
        .await
        .map_err(|e| AlertStoreError::bucket("upload", key, e.to_string()))??;

        tracing::debug!(path = %path.display(), bytes = data.len(), "wrote object");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.object_path(key)?;
        if is_dir(&path).await {
            return Err(object_not_found(key));
        }

        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| not_found_or(e, key))
    }

    fn name(&self) -> &str {
        "filesystem"
    }
}
