use std::path::Path;
use serde::Deserialize;

use crate::repository::backends::DatabaseConfigs;
use crate::storage::backends::BackendConfigs;

#[derive(Debug, Deserialize)]
pub struct RuntimeConfig {
    /// The set storage backend configuration.
    ///
    /// Uploaded files are written under this backend.
    pub backend: BackendConfigs,

    /// The metadata database configuration.
    pub database: DatabaseConfigs,

    /// The maximum upload size in KiB.
    ///
    /// Uploaded files larger than this are rejected with a 413,
    /// other endpoints are unaffected. Unlimited if not set.
    #[serde(default)]
    pub max_upload_size: Option<usize>,
}

impl RuntimeConfig {
    /// Loads the runtime config from a given YAML file.
    pub async fn from_file(file: impl AsRef<Path>) -> anyhow::Result<Self> {
        let data = tokio::fs::read_to_string(file).await?;
        Self::from_yaml(&data)
    }

    pub fn from_yaml(data: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str::<Self>(data)?)
    }

    #[inline]
    pub fn max_upload_bytes(&self) -> Option<usize> {
        self.max_upload_size.map(|kib| kib * 1024)
    }
}
