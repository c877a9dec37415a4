use crate::config::toml_config::{Backend, FilesystemConfig, S3Config, StoreConfig};
use crate::utils::error::{AlertStoreError, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "alert-store")]
#[command(about = "Manage per-tenant alertmanager configurations stored in a bucket")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the storage backend from the config file
    #[arg(long, value_enum)]
    pub backend: Option<BackendArg>,

    /// Root directory of the filesystem backend
    #[arg(long)]
    pub dir: Option<String>,

    /// S3 bucket name
    #[arg(long)]
    pub bucket: Option<String>,

    /// S3 region
    #[arg(long)]
    pub region: Option<String>,

    /// Custom S3 endpoint, e.g. a MinIO server
    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Filesystem,
    S3,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Filesystem => Backend::Filesystem,
            BackendArg::S3 => Backend::S3,
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print every stored config as JSON
    List,
    /// Print the tenants that have a stored config
    Users,
    /// Print the config of a tenant as JSON
    Get { tenant: String },
    /// Store (overwrite) the config of a tenant
    Set {
        tenant: String,
        /// Alertmanager configuration file
        #[arg(long)]
        config_file: PathBuf,
        /// Template files, stored under their file name
        #[arg(long = "template")]
        templates: Vec<PathBuf>,
    },
    /// Delete the config of a tenant
    Delete { tenant: String },
}

impl CliConfig {
    /// Loads the config file (or a `./data` filesystem default) and applies flag overrides.
    pub fn store_config(&self) -> Result<StoreConfig> {
        let mut config = match &self.config {
            Some(path) => StoreConfig::from_file(path)?,
            None => StoreConfig::filesystem("./data"),
        };

        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut StoreConfig) {
        let storage = &mut config.storage;

        if let Some(backend) = self.backend {
            storage.backend = backend.into();
        }

        if let Some(dir) = &self.dir {
            storage.filesystem = Some(FilesystemConfig { dir: dir.clone() });
        }

        if self.bucket.is_some() || self.region.is_some() || self.endpoint.is_some() {
            let s3 = storage.s3.get_or_insert_with(|| S3Config {
                bucket: String::new(),
                region: "us-east-1".to_string(),
                endpoint: None,
                force_path_style: false,
            });
            if let Some(bucket) = &self.bucket {
                s3.bucket = bucket.clone();
            }
            if let Some(region) = &self.region {
                s3.region = region.clone();
            }
            if let Some(endpoint) = &self.endpoint {
                s3.endpoint = Some(endpoint.clone());
                s3.force_path_style = true;
            }
        }
    }
}

/// Reads a file given on the command line, naming it in the error.
pub fn read_input_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| AlertStoreError::ConfigError {
        message: format!("failed to read '{}': {}", path.display(), e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set_command() {
        let cli = CliConfig::try_parse_from([
            "alert-store",
            "--dir",
            "/tmp/alerts",
            "set",
            "team-a",
            "--config-file",
            "am.yaml",
            "--template",
            "a.tmpl",
            "--template",
            "b.tmpl",
        ])
        .unwrap();

        match &cli.command {
            Command::Set {
                tenant, templates, ..
            } => {
                assert_eq!(tenant, "team-a");
                assert_eq!(templates.len(), 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let config = cli.store_config().unwrap();
        assert_eq!(config.storage.backend, Backend::Filesystem);
        assert_eq!(config.storage.filesystem.unwrap().dir, "/tmp/alerts");
    }

    #[test]
    fn test_s3_overrides() {
        let cli = CliConfig::try_parse_from([
            "alert-store",
            "--backend",
            "s3",
            "--bucket",
            "tenant-alerts",
            "--endpoint",
            "http://localhost:9000",
            "users",
        ])
        .unwrap();

        let config = cli.store_config().unwrap();
        let s3 = config.storage.s3.unwrap();
        assert_eq!(config.storage.backend, Backend::S3);
        assert_eq!(s3.bucket, "tenant-alerts");
        assert_eq!(s3.region, "us-east-1");
        assert!(s3.force_path_style);
    }
}
